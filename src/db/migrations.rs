//! Database schema migration management and versioning.
//!
//! Every open goes through [`init_with_migrations`], which applies whatever
//! versions are missing in a single transaction: either the whole upgrade
//! lands or the file is left exactly as it was.
//!
//! Databases created before versioning existed already contain `hikes` and
//! `observations` tables, possibly without the cascading foreign key and with
//! `DD/MM/YYYY` dates. Versions 2 and 3 bring such files up to date; on a fresh
//! database they find nothing to do.
//!
//! ```rust
//! use hikelog::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert_eq!(get_db_version(&conn)?, 3);
//! # Ok::<(), hikelog::libs::error::HikeError>(())
//! ```

use crate::libs::error::Result;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

/// Tracks which schema versions have been applied.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SCHEMA_HIKES: &str = "CREATE TABLE IF NOT EXISTS hikes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    location TEXT,
    date TEXT,
    parking_available TEXT,
    length REAL,
    difficulty TEXT,
    description TEXT,
    estimated_duration TEXT,
    max_group_size INTEGER
)";

const SCHEMA_OBSERVATIONS: &str = "CREATE TABLE IF NOT EXISTS observations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hike_id INTEGER NOT NULL,
    observation TEXT NOT NULL,
    time TEXT,
    comment TEXT,
    FOREIGN KEY (hike_id) REFERENCES hikes(id) ON DELETE CASCADE
)";

const SCHEMA_OBSERVATIONS_NEW: &str = "CREATE TABLE observations_new (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hike_id INTEGER NOT NULL,
    observation TEXT NOT NULL,
    time TEXT,
    comment TEXT,
    FOREIGN KEY (hike_id) REFERENCES hikes(id) ON DELETE CASCADE
)";

const HAS_CASCADE_RULE: &str = "SELECT COUNT(*) FROM pragma_foreign_key_list('observations')
    WHERE \"table\" = 'hikes' COLLATE NOCASE AND on_delete = 'CASCADE'";
/// Highest observation id ever handed out, including rows about to be dropped as orphans.
const OBSERVATION_HIGH_WATER: &str = "SELECT MAX(
        COALESCE((SELECT MAX(id) FROM observations), 0),
        COALESCE((SELECT MAX(seq) FROM sqlite_sequence WHERE name = 'observations' COLLATE NOCASE), 0)
    )";
const SEED_OBSERVATION_SEQUENCE: &str = "INSERT INTO sqlite_sequence (name, seq) VALUES ('observations', ?1)";
const DELETE_ORPHANS: &str = "DELETE FROM observations WHERE hike_id IS NULL OR hike_id NOT IN (SELECT id FROM hikes)";
const COPY_OBSERVATIONS: &str = "INSERT INTO observations_new (id, hike_id, observation, time, comment)
    SELECT id, hike_id, COALESCE(observation, ''), time, comment FROM observations";

/// `DD/MM/YYYY` -> `YYYY-MM-DD`.
const NORMALIZE_HIKE_DATES: &str = "UPDATE hikes
    SET date = substr(date, 7, 4) || '-' || substr(date, 4, 2) || '-' || substr(date, 1, 2)
    WHERE date GLOB '[0-9][0-9]/[0-9][0-9]/[0-9][0-9][0-9][0-9]'";
/// `dd/MM/yyyy HH:mm` -> `yyyy-MM-dd HH:mm`.
const NORMALIZE_OBSERVATION_TIMES: &str = "UPDATE observations
    SET time = substr(time, 7, 4) || '-' || substr(time, 4, 2) || '-' || substr(time, 1, 2) || substr(time, 11)
    WHERE time GLOB '[0-9][0-9]/[0-9][0-9]/[0-9][0-9][0-9][0-9] [0-9][0-9]:[0-9][0-9]*'";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all schema versions, applied in order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: base tables. IF NOT EXISTS keeps pre-versioning files intact.
        self.add_migration(1, "create_hikes_and_observations", |tx| {
            tx.execute(SCHEMA_HIKES, [])?;
            tx.execute(SCHEMA_OBSERVATIONS, [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_hikes_date ON hikes(date)", [])?;
            Ok(())
        });

        // Version 2: rebuild observations with ON DELETE CASCADE, dropping orphans.
        self.add_migration(2, "observations_cascade", |tx| {
            let has_cascade: i64 = tx.query_row(HAS_CASCADE_RULE, [], |row| row.get(0))?;
            if has_cascade == 0 {
                tx.execute(SCHEMA_OBSERVATIONS_NEW, [])?;
                // sqlite_sequence exists once the AUTOINCREMENT table above does.
                let high_water: i64 = tx.query_row(OBSERVATION_HIGH_WATER, [], |row| row.get(0))?;
                let orphans = tx.execute(DELETE_ORPHANS, [])?;
                if orphans > 0 {
                    tracing::warn!(orphans, "removed observations referencing missing hikes");
                    msg_debug!(Message::OrphanObservationsRemoved(orphans));
                }
                tx.execute(COPY_OBSERVATIONS, [])?;
                tx.execute("DROP TABLE observations", [])?;
                tx.execute("ALTER TABLE observations_new RENAME TO observations", [])?;
                // Ids of removed orphans are never handed out again.
                tx.execute("DELETE FROM sqlite_sequence WHERE name = 'observations' COLLATE NOCASE", [])?;
                tx.execute(SEED_OBSERVATION_SEQUENCE, params![high_water])?;
            }
            tx.execute("CREATE INDEX IF NOT EXISTS idx_observations_hike_id ON observations(hike_id)", [])?;
            Ok(())
        });

        // Version 3: canonical, calendar-sortable timestamps.
        self.add_migration(3, "canonical_timestamps", |tx| {
            let dates = tx.execute(NORMALIZE_HIKE_DATES, [])?;
            let times = tx.execute(NORMALIZE_OBSERVATION_TIMES, [])?;
            tracing::debug!(dates, times, "normalized legacy timestamps");
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every pending migration inside one transaction.
    ///
    /// The bookkeeping table is created in the same transaction, so a failed
    /// upgrade leaves the file as it was before the call.
    ///
    /// # Arguments
    ///
    /// * `conn` - Connection to the journal file
    ///
    /// # Returns
    ///
    /// `Ok(())` when the schema is current afterwards, or the error of the
    /// first migration that failed.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(&tx)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            tx.commit()?;
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        for migration in pending {
            tracing::info!("{}", Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    // Dropping the transaction rolls every pending version back.
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest applied version, or 0 for a database that has never been migrated.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let has_table: Option<String> = conn
            .query_row("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'migrations'", [], |row| row.get(0))
            .optional()?;
        if has_table.is_none() {
            return Ok(0);
        }
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    /// Versions newer than the file's current one, as `(version, name)` in the order they would run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hikelog::db::migrations::MigrationManager;
    /// use rusqlite::Connection;
    ///
    /// let conn = Connection::open_in_memory()?;
    /// let pending = MigrationManager::new().pending_migrations(&conn)?;
    /// assert_eq!(pending[0], (1, "create_hikes_and_observations"));
    /// # Ok::<(), hikelog::libs::error::HikeError>(())
    /// ```
    pub fn pending_migrations(&self, conn: &Connection) -> Result<Vec<(u32, &'static str)>> {
        let current_version = self.get_current_version(conn)?;
        Ok(self
            .migrations
            .iter()
            .filter(|m| m.version > current_version)
            .map(|m| (m.version, m.name))
            .collect())
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        if self.get_current_version(conn)? == 0 {
            return Ok(false);
        }
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        if self.get_current_version(conn)? == 0 {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
