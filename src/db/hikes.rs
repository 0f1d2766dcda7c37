//! Hike storage and the hike query engine.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hikelog::db::db::Db;
//! use hikelog::libs::hike::{Difficulty, Hike};
//! use hikelog::libs::search::SearchCriteria;
//!
//! let mut db = Db::open_in_memory()?;
//! let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
//! let id = db.hikes()?.insert(&Hike::new("Ridge Loop", "Snowdonia", date, 7.5, Difficulty::Hard))?;
//!
//! let found = db.hikes()?.advanced_search(&SearchCriteria::new().name("ridge").min_length(5.0))?;
//! assert_eq!(found[0].id, Some(id));
//! # Ok::<(), hikelog::libs::error::HikeError>(())
//! ```

use crate::libs::error::{HikeError, Result};
use crate::libs::formatter::canonical_date;
use crate::libs::hike::Hike;
use crate::libs::search::{like_pattern, HikeFilter, HikeSort, SearchCriteria};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const HIKE_COLUMNS: &str =
    "id, name, location, date, parking_available, length, difficulty, description, estimated_duration, max_group_size";
const INSERT_HIKE: &str = "INSERT INTO hikes (name, location, date, parking_available, length, difficulty, description, estimated_duration, max_group_size)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_HIKE: &str = "UPDATE hikes SET name = ?2, location = ?3, date = ?4, parking_available = ?5, length = ?6,
    difficulty = ?7, description = ?8, estimated_duration = ?9, max_group_size = ?10 WHERE id = ?1";
const DELETE_HIKE: &str = "DELETE FROM hikes WHERE id = ?1";
const DELETE_HIKE_OBSERVATIONS: &str = "DELETE FROM observations WHERE hike_id = ?1";
const DELETE_ALL_HIKES: &str = "DELETE FROM hikes";
const DELETE_ALL_OBSERVATIONS: &str = "DELETE FROM observations";
const COUNT_HIKES: &str = "SELECT COUNT(*) FROM hikes";
const WHERE_NAME: &str = "WHERE name LIKE ?1 ESCAPE '\\'";

pub struct Hikes<'a> {
    conn: &'a mut Connection,
}

impl<'a> Hikes<'a> {
    pub(crate) fn new(conn: &'a mut Connection) -> Self {
        Self { conn }
    }

    /// Inserts a new hike and returns the id the store assigned.
    ///
    /// Any `id` already set on `hike` is ignored. A date given as `DD/MM/YYYY`
    /// is written as `YYYY-MM-DD` so listings and date searches see it in
    /// calendar order.
    ///
    /// # Arguments
    ///
    /// * `hike` - The hike to store
    ///
    /// # Returns
    ///
    /// The new row id, or [`HikeError::StorageUnavailable`] when the file cannot be written.
    pub fn insert(&mut self, hike: &Hike) -> Result<i64> {
        self.conn.execute(
            INSERT_HIKE,
            params![
                hike.name,
                hike.location,
                canonical_date(&hike.date),
                hike.parking_available,
                hike.length_km,
                hike.difficulty,
                hike.description,
                hike.estimated_duration,
                hike.max_group_size,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(hike_id = id, "hike inserted");
        Ok(id)
    }

    /// Looks a hike up by id.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no hike has that id. Missing ids are a normal result here,
    /// not an error.
    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Hike>> {
        self.conn
            .query_row(&format!("SELECT {} FROM hikes WHERE id = ?1", HIKE_COLUMNS), params![id], hike_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Like [`Hikes::get_by_id`], but a missing row is [`HikeError::NotFound`].
    pub fn get(&mut self, id: i64) -> Result<Hike> {
        self.get_by_id(id)?.ok_or(HikeError::NotFound { entity: "Hike", id })
    }

    /// Every hike, newest first.
    pub fn list(&mut self) -> Result<Vec<Hike>> {
        self.fetch(HikeFilter::All)
    }

    /// Case-insensitive substring search on the name, newest first.
    ///
    /// An empty term matches every hike.
    pub fn search_by_name(&mut self, term: &str) -> Result<Vec<Hike>> {
        self.fetch(HikeFilter::ByName(term.to_string()))
    }

    /// All supplied criteria combined with AND, newest first.
    ///
    /// Fails with [`HikeError::InvalidRange`] before querying when the length
    /// bounds are inverted. Criteria with nothing set match every hike.
    pub fn advanced_search(&mut self, criteria: &SearchCriteria) -> Result<Vec<Hike>> {
        self.fetch(HikeFilter::Advanced(criteria.clone()))
    }

    /// Hikes matching `filter` in the default newest-first order.
    pub fn fetch(&mut self, filter: HikeFilter) -> Result<Vec<Hike>> {
        self.fetch_sorted(filter, HikeSort::default())
    }

    /// Hikes matching `filter`, ordered by `sort`.
    ///
    /// Matching runs inside SQLite with bound parameters. Ties in the sort
    /// key are broken by id, so repeated calls return the same order.
    ///
    /// # Arguments
    ///
    /// * `filter` - Which hikes to return
    /// * `sort` - Listing order
    ///
    /// # Returns
    ///
    /// The matching hikes, or [`HikeError::InvalidRange`] for an advanced
    /// filter whose length bounds are inverted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hikelog::db::db::Db;
    /// use hikelog::libs::search::{HikeFilter, HikeSort};
    ///
    /// let mut db = Db::open_in_memory()?;
    /// let longest_first = db.hikes()?.fetch_sorted(HikeFilter::All, HikeSort::LengthDesc)?;
    /// assert!(longest_first.is_empty());
    /// # Ok::<(), hikelog::libs::error::HikeError>(())
    /// ```
    pub fn fetch_sorted(&mut self, filter: HikeFilter, sort: HikeSort) -> Result<Vec<Hike>> {
        let (where_clause, values) = match filter {
            HikeFilter::All => (String::new(), vec![]),
            HikeFilter::ByName(term) => (WHERE_NAME.to_string(), vec![Value::Text(like_pattern(&term))]),
            HikeFilter::Advanced(criteria) => {
                criteria.validate()?;
                criteria.to_sql()
            }
        };

        let sql = format!("SELECT {} FROM hikes {} {}", HIKE_COLUMNS, where_clause, sort.order_by());
        let mut stmt = self.conn.prepare(&sql)?;
        let hike_iter = stmt.query_map(params_from_iter(values.iter()), hike_from_row)?;

        let mut hikes = Vec::new();
        for hike in hike_iter {
            hikes.push(hike?);
        }
        Ok(hikes)
    }

    /// Number of stored hikes.
    pub fn count(&mut self) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_HIKES, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Replaces every field of the stored hike with `hike`'s values, keyed by `hike.id`.
    ///
    /// The date is normalised the same way as in [`Hikes::insert`].
    ///
    /// # Returns
    ///
    /// The number of rows changed: `0` when no hike has that id, or
    /// [`HikeError::ValidationFailed`] when `hike.id` is `None`.
    pub fn update(&mut self, hike: &Hike) -> Result<usize> {
        let id = hike
            .id
            .ok_or_else(|| HikeError::ValidationFailed("cannot update a hike that has not been saved".to_string()))?;
        let affected = self.conn.execute(
            UPDATE_HIKE,
            params![
                id,
                hike.name,
                hike.location,
                canonical_date(&hike.date),
                hike.parking_available,
                hike.length_km,
                hike.difficulty,
                hike.description,
                hike.estimated_duration,
                hike.max_group_size,
            ],
        )?;
        Ok(affected)
    }

    /// Deletes a hike and all of its observations in one transaction.
    ///
    /// Returns the number of hikes removed (`0` or `1`).
    pub fn delete(&mut self, id: i64) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let observations = tx.execute(DELETE_HIKE_OBSERVATIONS, params![id])?;
        let hikes = tx.execute(DELETE_HIKE, params![id])?;
        tx.commit()?;

        tracing::debug!(hike_id = id, hikes, observations, "hike deleted");
        Ok(hikes)
    }

    /// Deletes every hike and every observation in one transaction.
    ///
    /// # Returns
    ///
    /// The number of hikes removed. Observations are removed as well but not counted.
    pub fn delete_all(&mut self) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let observations = tx.execute(DELETE_ALL_OBSERVATIONS, [])?;
        let hikes = tx.execute(DELETE_ALL_HIKES, [])?;
        tx.commit()?;

        tracing::debug!(hikes, observations, "all hikes deleted");
        Ok(hikes)
    }
}

fn hike_from_row(row: &Row<'_>) -> rusqlite::Result<Hike> {
    Ok(Hike {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        location: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        parking_available: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        length_km: row.get::<_, Option<f64>>(5)?.unwrap_or_default(),
        difficulty: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        description: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        estimated_duration: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        max_group_size: row.get::<_, Option<u32>>(9)?.unwrap_or_default(),
    })
}
