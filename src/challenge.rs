use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::models::ChallengeDuration;

pub const MIN_DAILY_TARGET: u32 = 1;
pub const MAX_DAILY_TARGET: u32 = 50;

/// Coding-challenge cadence: a fixed-length challenge with a daily problem target.
///
/// `current_streak` is its own counter. It is unrelated to the activity calendar
/// streak and only changes through [`extend_streak`](Self::extend_streak) and
/// [`reset_streak`](Self::reset_streak).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "ChallengeState", into = "ChallengeState")]
pub struct ChallengeTracker {
    duration: ChallengeDuration,
    daily_target: u32,
    completed_days: u32,
    missed_days: u32,
    current_streak: u32,
}

/// Persisted shape of the tracker, checked on the way in.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeState {
    duration_days: ChallengeDuration,
    daily_target: u32,
    #[serde(default)]
    completed_days: u32,
    #[serde(default)]
    missed_days: u32,
    #[serde(default)]
    current_streak: u32,
}

impl TryFrom<ChallengeState> for ChallengeTracker {
    type Error = TrackerError;

    fn try_from(state: ChallengeState) -> Result<Self> {
        check_target(state.daily_target)?;
        if state.completed_days > state.duration_days.days() {
            return Err(TrackerError::Validation(format!(
                "{} completed days exceed a {} day challenge",
                state.completed_days,
                state.duration_days.days()
            )));
        }
        Ok(Self {
            duration: state.duration_days,
            daily_target: state.daily_target,
            completed_days: state.completed_days,
            missed_days: state.missed_days,
            current_streak: state.current_streak,
        })
    }
}

impl From<ChallengeTracker> for ChallengeState {
    fn from(t: ChallengeTracker) -> Self {
        Self {
            duration_days: t.duration,
            daily_target: t.daily_target,
            completed_days: t.completed_days,
            missed_days: t.missed_days,
            current_streak: t.current_streak,
        }
    }
}

impl Default for ChallengeTracker {
    fn default() -> Self {
        Self {
            duration: ChallengeDuration::default(),
            daily_target: MIN_DAILY_TARGET,
            completed_days: 0,
            missed_days: 0,
            current_streak: 0,
        }
    }
}

fn check_target(value: u32) -> Result<()> {
    if !(MIN_DAILY_TARGET..=MAX_DAILY_TARGET).contains(&value) {
        return Err(TrackerError::Validation(format!(
            "daily target must be between {} and {}, got {}",
            MIN_DAILY_TARGET, MAX_DAILY_TARGET, value
        )));
    }
    Ok(())
}

impl ChallengeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> ChallengeDuration {
        self.duration
    }

    pub fn duration_days(&self) -> u32 {
        self.duration.days()
    }

    pub fn daily_target(&self) -> u32 {
        self.daily_target
    }

    pub fn completed_days(&self) -> u32 {
        self.completed_days
    }

    pub fn missed_days(&self) -> u32 {
        self.missed_days
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    /// Accepts 30, 100 or 365. Shrinking below the days already completed is rejected.
    pub fn set_duration(&mut self, days: u32) -> Result<()> {
        let duration = ChallengeDuration::try_from(days)?;
        if self.completed_days > duration.days() {
            return Err(TrackerError::Validation(format!(
                "already completed {} days, more than a {} day challenge",
                self.completed_days, days
            )));
        }
        self.duration = duration;
        tracing::debug!(days, "challenge duration set");
        Ok(())
    }

    /// Rejects values outside 1..=50 instead of clamping them.
    pub fn set_daily_target(&mut self, value: u32) -> Result<()> {
        check_target(value)?;
        self.daily_target = value;
        tracing::debug!(value, "daily target set");
        Ok(())
    }

    /// Counts one more completed day. Fails once the challenge is fully completed.
    pub fn record_completed_day(&mut self) -> Result<u32> {
        if self.completed_days >= self.duration.days() {
            return Err(TrackerError::Validation(format!(
                "all {} days of the challenge are already completed",
                self.duration.days()
            )));
        }
        self.completed_days += 1;
        tracing::debug!(completed = self.completed_days, "challenge day completed");
        Ok(self.completed_days)
    }

    pub fn record_missed_day(&mut self) -> u32 {
        self.missed_days = self.missed_days.saturating_add(1);
        tracing::debug!(missed = self.missed_days, "challenge day missed");
        self.missed_days
    }

    pub fn extend_streak(&mut self) -> u32 {
        self.current_streak = self.current_streak.saturating_add(1);
        tracing::debug!(streak = self.current_streak, "challenge streak extended");
        self.current_streak
    }

    pub fn reset_streak(&mut self) {
        self.current_streak = 0;
        tracing::debug!("challenge streak reset");
    }

    /// Completed share of the challenge, capped to 0..=100.
    pub fn progress_percent(&self) -> f64 {
        let pct = self.completed_days as f64 / self.duration.days() as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.completed_days >= self.duration.days()
    }
}
