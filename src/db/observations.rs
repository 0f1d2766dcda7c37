use crate::libs::error::{HikeError, Result};
use crate::libs::formatter::canonical_time;
use crate::libs::observation::Observation;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_OBSERVATION: &str = "INSERT INTO observations (hike_id, observation, time, comment) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_OBSERVATION: &str = "UPDATE observations SET observation = ?2, time = ?3, comment = ?4 WHERE id = ?1";
const DELETE_OBSERVATION: &str = "DELETE FROM observations WHERE id = ?1";
const SELECT_OBSERVATION_BY_ID: &str = "SELECT id, hike_id, observation, time, comment FROM observations WHERE id = ?1";
const SELECT_OBSERVATIONS_BY_HIKE: &str =
    "SELECT id, hike_id, observation, time, comment FROM observations WHERE hike_id = ?1 ORDER BY time DESC, id DESC";
const COUNT_OBSERVATIONS_BY_HIKE: &str = "SELECT COUNT(*) FROM observations WHERE hike_id = ?1";

pub struct Observations<'a> {
    conn: &'a Connection,
}

impl<'a> Observations<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts an observation and returns its id.
    ///
    /// Fails with [`HikeError::ConstraintViolation`] when `hike_id` does not
    /// reference an existing hike.
    pub fn insert(&self, observation: &Observation) -> Result<i64> {
        self.conn.execute(
            INSERT_OBSERVATION,
            params![observation.hike_id, observation.observation, canonical_time(&observation.time), observation.comment],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(observation_id = id, hike_id = observation.hike_id, "observation inserted");
        Ok(id)
    }

    /// Looks an observation up by id; `Ok(None)` when it does not exist.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Observation>> {
        self.conn
            .query_row(SELECT_OBSERVATION_BY_ID, params![id], observation_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Like [`Observations::get_by_id`], but a missing row is [`HikeError::NotFound`].
    pub fn get(&self, id: i64) -> Result<Observation> {
        self.get_by_id(id)?.ok_or(HikeError::NotFound { entity: "Observation", id })
    }

    /// Observations of one hike, latest first.
    ///
    /// Times are stored as `YYYY-MM-DD HH:MM`, so the text order is the
    /// chronological one. Equal times fall back to the newest id.
    ///
    /// # Arguments
    ///
    /// * `hike_id` - Owning hike; an unknown id yields an empty list
    pub fn fetch_for_hike(&self, hike_id: i64) -> Result<Vec<Observation>> {
        let mut stmt = self.conn.prepare(SELECT_OBSERVATIONS_BY_HIKE)?;
        let observation_iter = stmt.query_map(params![hike_id], observation_from_row)?;

        let mut observations = Vec::new();
        for observation in observation_iter {
            observations.push(observation?);
        }
        Ok(observations)
    }

    pub fn count_for_hike(&self, hike_id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_OBSERVATIONS_BY_HIKE, params![hike_id], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Rewrites text, time and comment. The owning hike never changes.
    pub fn update(&self, observation: &Observation) -> Result<usize> {
        let id = observation
            .id
            .ok_or_else(|| HikeError::ValidationFailed("cannot update an observation that has not been saved".to_string()))?;
        let affected = self.conn.execute(
            UPDATE_OBSERVATION,
            params![id, observation.observation, canonical_time(&observation.time), observation.comment],
        )?;
        Ok(affected)
    }

    /// Deletes one observation.
    ///
    /// # Returns
    ///
    /// The number of rows removed: `0` when the id was already gone.
    pub fn delete(&self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_OBSERVATION, params![id])?)
    }
}

fn observation_from_row(row: &Row<'_>) -> rusqlite::Result<Observation> {
    Ok(Observation {
        id: row.get(0)?,
        hike_id: row.get(1)?,
        observation: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        time: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        comment: row.get(4)?,
    })
}
