//! Query criteria for the hike collection.
//!
//! Filters are turned into a parameterised `WHERE` clause so that matching runs
//! inside SQLite rather than over a fully loaded collection.

use crate::libs::error::{HikeError, Result};
use crate::libs::formatter::to_storage_date;
use chrono::NaiveDate;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Independently optional advanced-search criteria, combined with AND.
///
/// A criteria value with nothing set matches every hike. Callers that want to
/// refuse an empty search must check [`SearchCriteria::is_empty`] themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Exact hike date.
    pub date: Option<NaiveDate>,
    /// Inclusive lower bound on length in km.
    pub min_length: Option<f64>,
    /// Inclusive upper bound on length in km.
    pub max_length: Option<f64>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn min_length(mut self, km: f64) -> Self {
        self.min_length = Some(km);
        self
    }

    pub fn max_length(mut self, km: f64) -> Self {
        self.max_length = Some(km);
        self
    }

    /// True when no criterion would restrict the result.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.name).is_none()
            && non_blank(&self.location).is_none()
            && self.date.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
    }

    /// Rejects inverted length bounds.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(HikeError::InvalidRange { min, max });
            }
        }
        Ok(())
    }

    /// Builds the `WHERE` clause and its bound values.
    pub(crate) fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clause = String::from("WHERE 1=1");
        let mut values = Vec::new();

        if let Some(name) = non_blank(&self.name) {
            clause.push_str(" AND name LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(name)));
        }
        if let Some(location) = non_blank(&self.location) {
            clause.push_str(" AND location LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(location)));
        }
        if let Some(date) = self.date {
            clause.push_str(" AND date = ?");
            values.push(Value::Text(to_storage_date(date)));
        }
        if let Some(min) = self.min_length {
            clause.push_str(" AND length >= ?");
            values.push(Value::Real(min));
        }
        if let Some(max) = self.max_length {
            clause.push_str(" AND length <= ?");
            values.push(Value::Real(max));
        }

        (clause, values)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Wraps a user term in `%...%`, escaping LIKE wildcards so they match literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Which hikes a listing should return.
#[derive(Debug, Clone, PartialEq)]
pub enum HikeFilter {
    All,
    ByName(String),
    Advanced(SearchCriteria),
}

/// Listing order for hikes. Ties are broken by id so results are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HikeSort {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
    LengthAsc,
    LengthDesc,
}

impl HikeSort {
    pub const ALL: [HikeSort; 6] = [
        HikeSort::DateDesc,
        HikeSort::DateAsc,
        HikeSort::NameAsc,
        HikeSort::NameDesc,
        HikeSort::LengthAsc,
        HikeSort::LengthDesc,
    ];

    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            HikeSort::DateDesc => "ORDER BY date DESC, id DESC",
            HikeSort::DateAsc => "ORDER BY date ASC, id ASC",
            HikeSort::NameAsc => "ORDER BY name COLLATE NOCASE ASC, id ASC",
            HikeSort::NameDesc => "ORDER BY name COLLATE NOCASE DESC, id DESC",
            HikeSort::LengthAsc => "ORDER BY length ASC, id ASC",
            HikeSort::LengthDesc => "ORDER BY length DESC, id DESC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HikeSort::DateDesc => "Date (Newest First)",
            HikeSort::DateAsc => "Date (Oldest First)",
            HikeSort::NameAsc => "Name (A-Z)",
            HikeSort::NameDesc => "Name (Z-A)",
            HikeSort::LengthAsc => "Length (Shortest First)",
            HikeSort::LengthDesc => "Length (Longest First)",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            HikeSort::DateDesc => "date_desc",
            HikeSort::DateAsc => "date_asc",
            HikeSort::NameAsc => "name_asc",
            HikeSort::NameDesc => "name_desc",
            HikeSort::LengthAsc => "length_asc",
            HikeSort::LengthDesc => "length_desc",
        }
    }
}

impl fmt::Display for HikeSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HikeSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|sort| sort.key() == value)
            .ok_or_else(|| format!("unknown sort order '{}', expected one of: date_desc, date_asc, name_asc, name_desc, length_asc, length_desc", s))
    }
}
