use crate::db::hikes::Hikes;
use crate::db::migrations::init_with_migrations;
use crate::db::observations::Observations;
use crate::libs::config::Config;
use crate::libs::error::{HikeError, Result};
use crate::msg_debug;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "hikelog.db";

/// The journal's single long-lived store handle.
///
/// Open it once at start-up and keep it for the life of the process. After
/// [`Db::close`] every operation fails with [`HikeError::StorageUnavailable`].
/// Only one writer is expected at a time.
pub struct Db {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl Db {
    /// Opens the database configured in `config.json` (or the default location).
    pub fn new() -> Result<Db> {
        let path = Config::read()?.database_file()?;
        Self::open(path)
    }

    /// Opens (or creates) the database at `path` and applies pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let path = path.as_ref();
        msg_debug!(format!("Opening database at {}", path.display()));
        let mut conn = Connection::open(path).map_err(|e| HikeError::StorageUnavailable(e.to_string()))?;
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db {
            conn: Some(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory database, mostly useful for tests.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory().map_err(|e| HikeError::StorageUnavailable(e.to_string()))?;
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn: Some(conn), path: None })
    }

    /// Opens the file without running migrations, for schema inspection.
    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path.as_ref()).map_err(|e| HikeError::StorageUnavailable(e.to_string()))?;
        Self::configure(&conn)?;
        Ok(conn)
    }

    fn configure(conn: &Connection) -> Result<()> {
        // Foreign keys are off by default in SQLite and must be enabled per connection.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    /// File backing this handle; `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Raw connection for ad-hoc queries.
    ///
    /// # Returns
    ///
    /// [`HikeError::StorageUnavailable`] once the handle has been closed.
    pub fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(closed)
    }

    pub fn conn_mut(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or_else(closed)
    }

    /// Borrows the hike table. Needs `&mut` because deletes open a transaction.
    pub fn hikes(&mut self) -> Result<Hikes<'_>> {
        Ok(Hikes::new(self.conn_mut()?))
    }

    pub fn observations(&self) -> Result<Observations<'_>> {
        Ok(Observations::new(self.conn()?))
    }

    /// Closes the handle. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            if let Err((conn, err)) = conn.close() {
                self.conn = Some(conn);
                return Err(err.into());
            }
            msg_debug!("Database closed");
        }
        Ok(())
    }
}

fn closed() -> HikeError {
    HikeError::StorageUnavailable("the hike journal has been closed".to_string())
}
