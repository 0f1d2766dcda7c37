//! Display implementation for hikelog messages.
//!
//! All user-facing text lives in this one match so wording stays consistent
//! across commands and can be reviewed in a single place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === HIKE MESSAGES ===
            Message::HikeCreated(id, name) => format!("Hike '{}' saved with id {}", name, id),
            Message::HikeUpdated(name) => format!("Hike '{}' updated", name),
            Message::HikeDeleted(name) => format!("Hike '{}' and its observations deleted", name),
            Message::HikeNotFound(id) => format!("Hike #{} not found", id),
            Message::HikesCleared(count) => format!("Deleted {} hike(s) and all their observations", count),
            Message::HikesHeader => "Hikes:".to_string(),
            Message::HikeDetailsHeader(name) => format!("Hike: {}", name),
            Message::NoHikesFound => "No hikes recorded yet".to_string(),
            Message::NoHikesMatching(term) => format!("No hikes found matching '{}'", term),
            Message::NoHikesMatchingCriteria => "No hikes match the given criteria".to_string(),
            Message::HikesFound(count) => format!("{} hike(s) found", count),
            Message::EmptySearchCriteria => "Please enter at least one search criteria".to_string(),
            Message::NegativeLength => "Length bounds cannot be negative".to_string(),
            Message::ConfirmDeleteHike(name, 0) => format!("Delete hike '{}'?", name),
            Message::ConfirmDeleteHike(name, count) => {
                format!("Delete hike '{}' together with its {} observation(s)?", name, count)
            }
            Message::ConfirmClearAll(count) => format!("Delete ALL {} hike(s) and every observation? This cannot be undone", count),

            // === OBSERVATION MESSAGES ===
            Message::ObservationCreated(hike) => format!("Observation added to '{}'", hike),
            Message::ObservationUpdated => "Observation updated".to_string(),
            Message::ObservationDeleted(id) => format!("Observation #{} deleted", id),
            Message::ObservationNotFound(id) => format!("Observation #{} not found", id),
            Message::ObservationsHeader(hike) => format!("Observations for '{}':", hike),
            Message::NoObservationsForHike(hike) => format!("No observations recorded for '{}'", hike),
            Message::ConfirmDeleteObservation(id) => format!("Delete observation #{}?", id),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader(user) => format!("Statistics for {}", user),
            Message::DifficultyHeader => "Difficulty distribution:".to_string(),
            Message::UpcomingHeader => "Upcoming hikes:".to_string(),
            Message::NoUpcomingHikes => "No upcoming hikes planned".to_string(),
            Message::SkippedUnparseableDates(count) => format!("{} hike(s) skipped because their date could not be read", count),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Settings saved".to_string(),
            Message::PromptUserName => "Enter your name".to_string(),
            Message::PromptSortOrder => "Default hike sort order".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::NoChangesDetected => "No changes given, nothing to update".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::OrphanObservationsRemoved(count) => format!("Removed {} observation(s) that referenced missing hikes", count),
            Message::DatabaseVersion(current, latest) => format!("Database schema version {} of {}", current, latest),
            Message::PendingMigrationsHeader => "Migrations to apply on next open:".to_string(),
            Message::NoMigrationsApplied => "No migrations have been applied to this file yet".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };
        write!(f, "{}", text)
    }
}
