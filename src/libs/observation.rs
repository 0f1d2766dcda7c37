use crate::libs::error::{HikeError, Result};
use crate::libs::formatter::{parse_stored_time, to_storage_time};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A timestamped field note attached to a hike.
///
/// `hike_id` is fixed at creation; updates only touch the text, time and comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: Option<i64>,
    pub hike_id: i64,
    pub observation: String,
    /// Local wall-clock time as `YYYY-MM-DD HH:MM`.
    pub time: String,
    pub comment: Option<String>,
}

impl Observation {
    pub fn new(hike_id: i64, observation: &str, time: NaiveDateTime, comment: Option<&str>) -> Self {
        Observation {
            id: None,
            hike_id,
            observation: observation.to_string(),
            time: to_storage_time(time),
            comment: comment.filter(|c| !c.trim().is_empty()).map(str::to_string),
        }
    }

    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        parse_stored_time(&self.time)
    }

    pub fn validate(&self) -> Result<()> {
        if self.observation.trim().is_empty() {
            return Err(HikeError::ValidationFailed("Please enter an observation".to_string()));
        }
        if self.recorded_at().is_none() {
            return Err(HikeError::ValidationFailed("Please select a time for the observation".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 30, 0).unwrap()
    }

    #[test]
    fn test_new_observation_uses_canonical_time() {
        let obs = Observation::new(3, "Red kite overhead", noon(), Some("near the cairn"));
        assert_eq!(obs.id, None);
        assert_eq!(obs.hike_id, 3);
        assert_eq!(obs.time, "2024-06-01 12:30");
        assert_eq!(obs.comment.as_deref(), Some("near the cairn"));
        assert_eq!(obs.recorded_at(), Some(noon()));
    }

    #[test]
    fn test_blank_comment_is_dropped() {
        let obs = Observation::new(1, "Fog", noon(), Some("  "));
        assert_eq!(obs.comment, None);
    }

    #[test]
    fn test_validate_requires_text() {
        let obs = Observation::new(1, "", noon(), None);
        assert!(matches!(obs.validate(), Err(HikeError::ValidationFailed(_))));
        assert!(Observation::new(1, "Fog", noon(), None).validate().is_ok());
    }
}
