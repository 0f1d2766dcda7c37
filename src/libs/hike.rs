use crate::libs::error::{HikeError, Result};
use crate::libs::formatter::{parse_stored_date, to_storage_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PARKING_YES: &str = "Yes";
pub const PARKING_NO: &str = "No";

/// A recorded hike.
///
/// `id` is `None` until the hike has been inserted; rows read back from the
/// store always carry `Some(id)`. Text columns are kept as persisted so that
/// rows written by older versions (free-text difficulty, legacy dates) still
/// load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hike {
    pub id: Option<i64>,
    pub name: String,
    pub location: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// `"Yes"` or `"No"`.
    pub parking_available: String,
    pub length_km: f64,
    pub difficulty: String,
    pub description: String,
    pub estimated_duration: String,
    /// `0` means the group size is not tracked.
    pub max_group_size: u32,
}

impl Hike {
    pub fn new(name: &str, location: &str, date: NaiveDate, length_km: f64, difficulty: Difficulty) -> Self {
        Hike {
            id: None,
            name: name.to_string(),
            location: location.to_string(),
            date: to_storage_date(date),
            parking_available: PARKING_NO.to_string(),
            length_km,
            difficulty: difficulty.to_string(),
            description: String::new(),
            estimated_duration: EstimatedDuration::default().to_string(),
            max_group_size: 0,
        }
    }

    pub fn with_parking(mut self, available: bool) -> Self {
        self.parking_available = parking_label(available).to_string();
        self
    }

    pub fn with_duration(mut self, duration: EstimatedDuration) -> Self {
        self.estimated_duration = duration.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_max_group_size(mut self, size: u32) -> Self {
        self.max_group_size = size;
        self
    }

    /// The hike date as a calendar value, if the stored text can be parsed.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_stored_date(&self.date)
    }

    pub fn has_parking(&self) -> bool {
        self.parking_available.eq_ignore_ascii_case(PARKING_YES)
    }

    /// Caller-side checks run before a hike is handed to the store.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HikeError::ValidationFailed("Please enter hike name".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(HikeError::ValidationFailed("Please enter location".to_string()));
        }
        if self.calendar_date().is_none() {
            return Err(HikeError::ValidationFailed("Please select date".to_string()));
        }
        if !self.length_km.is_finite() || self.length_km <= 0.0 {
            return Err(HikeError::ValidationFailed("Length must be greater than 0".to_string()));
        }
        Ok(())
    }
}

pub fn parking_label(available: bool) -> &'static str {
    if available {
        PARKING_YES
    } else {
        PARKING_NO
    }
}

/// The four canonical difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard, Difficulty::VeryHard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
        }
    }

    /// Case-insensitive match of a stored difficulty column.
    ///
    /// Anything other than the four labels (including blank) yields `None`.
    pub fn classify(raw: &str) -> Option<Difficulty> {
        Self::ALL.into_iter().find(|level| level.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ");
        Difficulty::classify(&normalized).ok_or_else(|| format!("unknown difficulty '{}', expected one of: Easy, Moderate, Hard, Very Hard", s))
    }
}

/// Bucketed estimate of how long a hike takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EstimatedDuration {
    #[default]
    UnderOneHour,
    OneToTwoHours,
    TwoToFourHours,
    FourToSixHours,
    SixToEightHours,
    OverEightHours,
}

impl EstimatedDuration {
    pub const ALL: [EstimatedDuration; 6] = [
        EstimatedDuration::UnderOneHour,
        EstimatedDuration::OneToTwoHours,
        EstimatedDuration::TwoToFourHours,
        EstimatedDuration::FourToSixHours,
        EstimatedDuration::SixToEightHours,
        EstimatedDuration::OverEightHours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatedDuration::UnderOneHour => "Less than 1 hour",
            EstimatedDuration::OneToTwoHours => "1-2 hours",
            EstimatedDuration::TwoToFourHours => "2-4 hours",
            EstimatedDuration::FourToSixHours => "4-6 hours",
            EstimatedDuration::SixToEightHours => "6-8 hours",
            EstimatedDuration::OverEightHours => "More than 8 hours",
        }
    }
}

impl fmt::Display for EstimatedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimatedDuration {
    type Err = String;

    /// Accepts the full label (`"2-4 hours"`) or its short form (`"<1"`, `"2-4"`, `">8"`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value = s.trim();
        let short = match value {
            "<1" => Some(EstimatedDuration::UnderOneHour),
            "1-2" => Some(EstimatedDuration::OneToTwoHours),
            "2-4" => Some(EstimatedDuration::TwoToFourHours),
            "4-6" => Some(EstimatedDuration::FourToSixHours),
            "6-8" => Some(EstimatedDuration::SixToEightHours),
            ">8" => Some(EstimatedDuration::OverEightHours),
            _ => None,
        };
        short
            .or_else(|| Self::ALL.into_iter().find(|d| d.as_str().eq_ignore_ascii_case(value)))
            .ok_or_else(|| format!("unknown duration '{}', expected one of: <1, 1-2, 2-4, 4-6, 6-8, >8", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hike {
        Hike::new("Ridge Walk", "Lake District", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 5.0, Difficulty::Easy)
    }

    #[test]
    fn test_new_hike_defaults() {
        let hike = sample();
        assert_eq!(hike.id, None);
        assert_eq!(hike.date, "2024-06-01");
        assert_eq!(hike.parking_available, "No");
        assert_eq!(hike.estimated_duration, "Less than 1 hour");
        assert_eq!(hike.max_group_size, 0);
        assert!(hike.description.is_empty());
    }

    #[test]
    fn test_builders_set_optional_fields() {
        let hike = sample()
            .with_parking(true)
            .with_duration(EstimatedDuration::TwoToFourHours)
            .with_description("Windy at the top")
            .with_max_group_size(8);
        assert!(hike.has_parking());
        assert_eq!(hike.estimated_duration, "2-4 hours");
        assert_eq!(hike.description, "Windy at the top");
        assert_eq!(hike.max_group_size, 8);
    }

    #[test]
    fn test_validate_rejects_blank_name_and_bad_length() {
        let mut hike = sample();
        hike.name = "   ".to_string();
        assert!(matches!(hike.validate(), Err(HikeError::ValidationFailed(_))));

        let mut hike = sample();
        hike.length_km = 0.0;
        assert!(hike.validate().is_err());

        let mut hike = sample();
        hike.length_km = f64::NAN;
        assert!(hike.validate().is_err());

        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_difficulty_classify_is_case_insensitive() {
        assert_eq!(Difficulty::classify("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::classify("VERY HARD"), Some(Difficulty::VeryHard));
        assert_eq!(Difficulty::classify(""), None);
        assert_eq!(Difficulty::classify("Extreme"), None);
    }

    #[test]
    fn test_difficulty_from_str_accepts_cli_spellings() {
        assert_eq!("very-hard".parse::<Difficulty>(), Ok(Difficulty::VeryHard));
        assert_eq!("Moderate".parse::<Difficulty>(), Ok(Difficulty::Moderate));
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_duration_from_str() {
        assert_eq!("2-4".parse::<EstimatedDuration>(), Ok(EstimatedDuration::TwoToFourHours));
        assert_eq!("more than 8 hours".parse::<EstimatedDuration>(), Ok(EstimatedDuration::OverEightHours));
        assert!("forever".parse::<EstimatedDuration>().is_err());
    }
}
