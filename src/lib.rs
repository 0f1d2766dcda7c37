//! # Hikelog - a personal hike journal
//!
//! Records planned and completed hikes together with timestamped trail
//! observations, answers name and multi-criteria searches, and summarises the
//! collection.
//!
//! ## Features
//!
//! - **Hikes**: create, edit, list in several orders and delete
//! - **Observations**: per-hike notes that are removed together with their hike
//! - **Search**: case-insensitive name search and AND-combined advanced criteria
//! - **Statistics**: totals, difficulty distribution and upcoming hikes
//! - **Migrations**: versioned schema upgrades for existing journal files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hikelog::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
