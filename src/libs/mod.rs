//! Core library modules for hikelog.
//!
//! - **Entities**: [`hike`], [`observation`] and their validation rules
//! - **Queries**: [`search`] criteria, filters and sort orders
//! - **Aggregation**: [`statistics`] over the whole collection
//! - **Infrastructure**: [`config`], [`data_storage`], [`error`], [`messages`]
//! - **Console**: [`formatter`] conversions and [`view`] tables
//!
//! ```rust,no_run
//! use hikelog::db::db::Db;
//! use hikelog::libs::statistics::Statistics;
//!
//! let mut db = Db::new()?;
//! let stats = Statistics::compute(&mut db)?;
//! println!("{} hikes, {:.1} km", stats.total_hikes, stats.total_distance_km);
//! # Ok::<(), hikelog::libs::error::HikeError>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod hike;
pub mod messages;
pub mod observation;
pub mod search;
pub mod statistics;
pub mod view;
