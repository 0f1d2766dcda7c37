//! Persistent store for the hike journal.
//!
//! Built on SQLite through `rusqlite`. A single [`db::Db`] handle owns the
//! connection; table access goes through short-lived views borrowed from it:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hikelog::db::db::Db;
//! use hikelog::libs::hike::{Difficulty, Hike};
//! use hikelog::libs::observation::Observation;
//!
//! let mut db = Db::open_in_memory()?;
//! let date = NaiveDate::from_ymd_opt(2024, 9, 14).unwrap();
//! let hike_id = db.hikes()?.insert(&Hike::new("Coastal Path", "Cornwall", date, 12.0, Difficulty::Moderate))?;
//!
//! let seen_at = date.and_hms_opt(10, 15, 0).unwrap();
//! db.observations()?.insert(&Observation::new(hike_id, "Seals on the rocks", seen_at, None))?;
//!
//! db.hikes()?.delete(hike_id)?;
//! assert!(db.observations()?.fetch_for_hike(hike_id)?.is_empty());
//! # Ok::<(), hikelog::libs::error::HikeError>(())
//! ```

/// Store handle, connection lifecycle and open-time configuration.
pub mod db;

/// Versioned schema evolution, including the upgrade of pre-versioning files.
pub mod migrations;

/// Hike CRUD, cascading deletes, name search and advanced search.
pub mod hikes;

/// Observation CRUD scoped to a parent hike.
pub mod observations;
