#[derive(Debug, Clone)]
pub enum Message {
    // === HIKE MESSAGES ===
    HikeCreated(i64, String), // id, name
    HikeUpdated(String),      // name
    HikeDeleted(String),      // name
    HikeNotFound(i64),
    HikesCleared(usize),
    HikesHeader,
    HikeDetailsHeader(String), // name
    NoHikesFound,
    NoHikesMatching(String), // search term
    NoHikesMatchingCriteria,
    HikesFound(usize),
    EmptySearchCriteria,
    NegativeLength,
    ConfirmDeleteHike(String, usize), // name, observation count
    ConfirmClearAll(usize),           // hike count

    // === OBSERVATION MESSAGES ===
    ObservationCreated(String), // hike name
    ObservationUpdated,
    ObservationDeleted(i64),
    ObservationNotFound(i64),
    ObservationsHeader(String),     // hike name
    NoObservationsForHike(String), // hike name
    ConfirmDeleteObservation(i64),

    // === STATISTICS MESSAGES ===
    StatisticsHeader(String), // user name
    DifficultyHeader,
    UpcomingHeader,
    NoUpcomingHikes,
    SkippedUnparseableDates(usize),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    PromptUserName,
    PromptSortOrder,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    NoChangesDetected,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    OrphanObservationsRemoved(usize),
    DatabaseVersion(u32, u32), // current, latest
    PendingMigrationsHeader,
    NoMigrationsApplied,
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
}
