use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// The three activities tracked on the calendar for a single day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityFlags {
    /// A planned task was finished.
    #[serde(default)]
    pub task: bool,
    /// Some learning time was logged.
    #[serde(default)]
    pub learning: bool,
    /// At least one coding problem was solved.
    #[serde(default)]
    pub leetcode: bool,
}

impl ActivityFlags {
    pub fn new(task: bool, learning: bool, leetcode: bool) -> Self {
        Self { task, learning, leetcode }
    }

    /// Number of flags that are set.
    pub fn count(&self) -> usize {
        [self.task, self.learning, self.leetcode]
            .iter()
            .filter(|f| **f)
            .count()
    }
}

/// A recorded calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub flags: ActivityFlags,
}

/// Calendar coloring class for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
    None,
    One,
    Two,
    All,
}

impl Intensity {
    pub fn from_flags(flags: &ActivityFlags) -> Self {
        match flags.count() {
            0 => Intensity::None,
            1 => Intensity::One,
            2 => Intensity::Two,
            _ => Intensity::All,
        }
    }

    pub fn is_active(&self) -> bool {
        *self != Intensity::None
    }
}

/// Stage of a job application. Labels match the persisted format.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobStatus {
    #[serde(rename = "Connection Sent")]
    ConnectionSent,
    #[serde(rename = "Connection Accepted")]
    ConnectionAccepted,
    #[serde(rename = "Messaged")]
    Messaged,
    #[serde(rename = "Ready to Refer")]
    ReadyToRefer,
    #[serde(rename = "No Reply")]
    NoReply,
    #[serde(rename = "Referred")]
    Referred,
    #[serde(rename = "Applied")]
    Applied,
    #[serde(rename = "Job Expired")]
    JobExpired,
}

impl JobStatus {
    pub const ALL: [JobStatus; 8] = [
        JobStatus::ConnectionSent,
        JobStatus::ConnectionAccepted,
        JobStatus::Messaged,
        JobStatus::ReadyToRefer,
        JobStatus::NoReply,
        JobStatus::Referred,
        JobStatus::Applied,
        JobStatus::JobExpired,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::ConnectionSent => "Connection Sent",
            JobStatus::ConnectionAccepted => "Connection Accepted",
            JobStatus::Messaged => "Messaged",
            JobStatus::ReadyToRefer => "Ready to Refer",
            JobStatus::NoReply => "No Reply",
            JobStatus::Referred => "Referred",
            JobStatus::Applied => "Applied",
            JobStatus::JobExpired => "Job Expired",
        }
    }

    /// The status following this one in `ALL`, wrapping around. Used by the TUI to cycle.
    pub fn cycle(&self) -> JobStatus {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobStatus {
    type Err = TrackerError;

    /// Accepts the display label or any spelling that differs only in case,
    /// spaces, dashes or underscores ("Ready to Refer", "ready-to-refer", "ReadyToRefer").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        JobStatus::ALL
            .iter()
            .copied()
            .find(|status| {
                let label: String = status
                    .label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                label == wanted
            })
            .ok_or_else(|| TrackerError::Validation(format!("unknown job status '{}'", s)))
    }
}

/// A tracked job application.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Unique identifier, never reassigned.
    pub id: u64,
    /// Company name.
    pub company: String,
    /// The company's own posting identifier.
    #[serde(rename = "jobId")]
    pub external_job_id: String,
    /// Role title.
    pub position: String,
    /// Day the job was added.
    pub date_added: NaiveDate,
    /// Link to the posting.
    pub job_link: String,
    /// Current pipeline stage.
    pub status: JobStatus,
}

/// Input for adding a job.
#[derive(Debug, Clone, Default)]
pub struct NewJob {
    pub company: String,
    pub external_job_id: String,
    pub position: String,
    pub job_link: String,
}

/// Field edits for an existing job. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub company: Option<String>,
    pub external_job_id: Option<String>,
    pub position: Option<String>,
    pub job_link: Option<String>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.external_job_id.is_none()
            && self.position.is_none()
            && self.job_link.is_none()
    }
}

/// A single learnable topic inside a category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

/// A skill category owning an ordered list of topics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl SkillCategory {
    pub fn completed_count(&self) -> usize {
        self.topics.iter().filter(|t| t.completed).count()
    }

    /// Completed share in percent; 0 for a category without topics.
    pub fn progress(&self) -> f64 {
        if self.topics.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.topics.len() as f64 * 100.0
    }

    pub fn is_fully_completed(&self) -> bool {
        !self.topics.is_empty() && self.topics.iter().all(|t| t.completed)
    }
}

/// Allowed lengths of the coding challenge.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum ChallengeDuration {
    #[default]
    Thirty,
    Hundred,
    Year,
}

impl ChallengeDuration {
    pub fn days(&self) -> u32 {
        match self {
            ChallengeDuration::Thirty => 30,
            ChallengeDuration::Hundred => 100,
            ChallengeDuration::Year => 365,
        }
    }
}

impl TryFrom<u32> for ChallengeDuration {
    type Error = TrackerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            30 => Ok(ChallengeDuration::Thirty),
            100 => Ok(ChallengeDuration::Hundred),
            365 => Ok(ChallengeDuration::Year),
            other => Err(TrackerError::Validation(format!(
                "challenge duration must be 30, 100 or 365 days, got {}",
                other
            ))),
        }
    }
}

impl From<ChallengeDuration> for u32 {
    fn from(d: ChallengeDuration) -> u32 {
        d.days()
    }
}

/// The registered user's profile, stored under the `user` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Registration timestamp (RFC 3339).
    pub joined_date: String,
}

/// A company where a referral contact is available.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReferralCompany {
    pub id: u64,
    pub name: String,
    pub status: String,
}
