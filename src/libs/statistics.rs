//! Summary figures over the whole hike collection.
//!
//! Nothing is cached: each call reads the current hikes, asks the store for
//! each hike's observation count and derives the figures from scratch.
//!
//! ## Difficulty distribution
//!
//! Hikes are bucketed by a case-insensitive match of the free-text difficulty
//! column against `easy`, `moderate`, `hard` and `very hard`. Anything else is
//! left out of all four buckets, so the bucket counts can add up to less than
//! the hike total. Percentages use integer division:
//!
//! ```text
//! percent = bucket_count * 100 / total_hikes   (0 when there are no hikes)
//! ```
//!
//! ## Upcoming hikes
//!
//! A hike is upcoming when its date lies strictly after the current moment,
//! which for a whole-day date means any day after today. Hikes whose date
//! cannot be read are logged and skipped; they never fail the computation.

use crate::db::db::Db;
use crate::libs::error::{HikeError, Result};
use crate::libs::hike::{Difficulty, Hike};
use chrono::{Local, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyBucket {
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyBreakdown {
    pub easy: DifficultyBucket,
    pub moderate: DifficultyBucket,
    pub hard: DifficultyBucket,
    pub very_hard: DifficultyBucket,
}

impl DifficultyBreakdown {
    pub fn bucket(&self, difficulty: Difficulty) -> DifficultyBucket {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Moderate => self.moderate,
            Difficulty::Hard => self.hard,
            Difficulty::VeryHard => self.very_hard,
        }
    }

    /// Hikes that landed in one of the four buckets.
    pub fn classified(&self) -> usize {
        self.easy.count + self.moderate.count + self.hard.count + self.very_hard.count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_hikes: usize,
    pub total_observations: usize,
    pub total_distance_km: f64,
    pub difficulty: DifficultyBreakdown,
    /// Soonest first.
    pub upcoming_hikes: Vec<Hike>,
    /// Hikes left out of the upcoming list because their date was unreadable.
    pub skipped_dates: usize,
}

impl Statistics {
    /// Computes the statistics as of the current local time.
    ///
    /// # Arguments
    ///
    /// * `db` - Open journal handle
    ///
    /// # Returns
    ///
    /// The figures, or a storage error if the hikes or observation counts
    /// cannot be read. Unreadable hike dates never fail the call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hikelog::db::db::Db;
    /// use hikelog::libs::statistics::Statistics;
    ///
    /// let mut db = Db::open_in_memory()?;
    /// let stats = Statistics::compute(&mut db)?;
    /// assert_eq!(stats.total_hikes, 0);
    /// assert_eq!(stats.difficulty.easy.percent, 0);
    /// # Ok::<(), hikelog::libs::error::HikeError>(())
    /// ```
    pub fn compute(db: &mut Db) -> Result<Self> {
        Self::compute_at(db, Local::now().naive_local())
    }

    /// Computes the statistics as of `now`.
    pub fn compute_at(db: &mut Db, now: NaiveDateTime) -> Result<Self> {
        let hikes = db.hikes()?.list()?;

        let observations = db.observations()?;
        let mut total_observations = 0;
        for id in hikes.iter().filter_map(|hike| hike.id) {
            total_observations += observations.count_for_hike(id)?;
        }

        Ok(Self::summarize(hikes, total_observations, now))
    }

    /// Derives every figure from an already loaded collection.
    pub fn summarize(hikes: Vec<Hike>, total_observations: usize, now: NaiveDateTime) -> Self {
        let total_distance_km = hikes.iter().map(|hike| hike.length_km).sum();
        let difficulty = difficulty_breakdown(&hikes);
        let (upcoming_hikes, skipped_dates) = upcoming_hikes(&hikes, now);

        Statistics {
            total_hikes: hikes.len(),
            total_observations,
            total_distance_km,
            difficulty,
            upcoming_hikes,
            skipped_dates,
        }
    }
}

/// Share of `total` as a whole percentage, rounded down; `0` when `total` is `0`.
pub fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count * 100 / total) as u32
}

pub fn difficulty_breakdown(hikes: &[Hike]) -> DifficultyBreakdown {
    let (mut easy, mut moderate, mut hard, mut very_hard) = (0, 0, 0, 0);
    for hike in hikes {
        match Difficulty::classify(&hike.difficulty) {
            Some(Difficulty::Easy) => easy += 1,
            Some(Difficulty::Moderate) => moderate += 1,
            Some(Difficulty::Hard) => hard += 1,
            Some(Difficulty::VeryHard) => very_hard += 1,
            None => {}
        }
    }

    let total = hikes.len();
    let bucket = |count| DifficultyBucket {
        count,
        percent: percent_of(count, total),
    };
    DifficultyBreakdown {
        easy: bucket(easy),
        moderate: bucket(moderate),
        hard: bucket(hard),
        very_hard: bucket(very_hard),
    }
}

/// Hikes dated strictly after `now`, soonest first, plus the number skipped.
pub fn upcoming_hikes(hikes: &[Hike], now: NaiveDateTime) -> (Vec<Hike>, usize) {
    let mut upcoming = Vec::new();
    let mut skipped = 0;

    for hike in hikes {
        match hike.calendar_date() {
            Some(date) if date.and_time(NaiveTime::MIN) > now => upcoming.push((date, hike.clone())),
            Some(_) => {}
            None => {
                skipped += 1;
                let skip = HikeError::ParseSkip {
                    hike_id: hike.id.unwrap_or_default(),
                    field: "date",
                    value: hike.date.clone(),
                };
                tracing::warn!(hike_id = hike.id, "{}", skip);
            }
        }
    }

    upcoming.sort_by_key(|(date, hike)| (*date, hike.id));
    (upcoming.into_iter().map(|(_, hike)| hike).collect(), skipped)
}
