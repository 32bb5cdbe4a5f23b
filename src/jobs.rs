use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{require, Result, TrackerError};
use crate::models::{JobPatch, JobRecord, JobStatus, NewJob};

/// Which status changes `set_status` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// Only moves along the referral pipeline, plus dropping out to
    /// `NoReply` / `JobExpired`.
    WorkflowEnforced,
}

impl StatusPolicy {
    pub fn allows(&self, from: JobStatus, to: JobStatus) -> bool {
        if from == to {
            return true;
        }
        match self {
            StatusPolicy::Permissive => true,
            StatusPolicy::WorkflowEnforced => {
                use JobStatus as S;
                match (from, to) {
                    (S::JobExpired, _) => false,
                    (_, S::JobExpired) => true,
                    (S::NoReply, S::Messaged) => true,
                    (S::NoReply, _) => false,
                    (_, S::NoReply) => true,
                    (S::ConnectionSent, S::ConnectionAccepted)
                    | (S::ConnectionAccepted, S::Messaged)
                    | (S::Messaged, S::ReadyToRefer)
                    | (S::ReadyToRefer, S::Referred)
                    | (S::Referred, S::Applied) => true,
                    _ => false,
                }
            }
        }
    }

    /// The status the TUI moves a job to next, or `None` when nothing follows.
    ///
    /// Permissive cycles through every status. The workflow walks the pipeline
    /// forward and sends `NoReply` back to `Messaged`.
    pub fn next_status(&self, from: JobStatus) -> Option<JobStatus> {
        match self {
            StatusPolicy::Permissive => Some(from.cycle()),
            StatusPolicy::WorkflowEnforced => {
                let start = PIPELINE_ORDER.iter().position(|s| *s == from)?;
                (1..PIPELINE_ORDER.len())
                    .map(|step| PIPELINE_ORDER[(start + step) % PIPELINE_ORDER.len()])
                    .find(|to| self.allows(from, *to))
            }
        }
    }
}

/// Pipeline stages in the order a referral normally moves through them.
const PIPELINE_ORDER: [JobStatus; 8] = [
    JobStatus::ConnectionSent,
    JobStatus::ConnectionAccepted,
    JobStatus::Messaged,
    JobStatus::ReadyToRefer,
    JobStatus::Referred,
    JobStatus::Applied,
    JobStatus::JobExpired,
    JobStatus::NoReply,
];

impl FromStr for StatusPolicy {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(StatusPolicy::Permissive),
            "workflow" | "workflow-enforced" | "enforced" => Ok(StatusPolicy::WorkflowEnforced),
            other => Err(TrackerError::Validation(format!("unknown status policy '{}'", other))),
        }
    }
}

/// Owns the job applications being tracked.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JobPipelineStore {
    #[serde(default)]
    jobs: Vec<JobRecord>,
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(skip)]
    policy: StatusPolicy,
}

fn first_id() -> u64 {
    1
}

impl Default for JobPipelineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobPipelineStore {
    pub fn new() -> Self {
        Self { jobs: Vec::new(), next_id: first_id(), policy: StatusPolicy::default() }
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn get(&self, id: u64) -> Option<&JobRecord> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Adds a job dated today with status `ConnectionSent`.
    pub fn add(&mut self, job: NewJob) -> Result<u64> {
        self.add_on(job, Local::now().date_naive())
    }

    pub fn add_on(&mut self, job: NewJob, date_added: NaiveDate) -> Result<u64> {
        require("company", &job.company)?;
        require("job id", &job.external_job_id)?;
        require("position", &job.position)?;
        require("job link", &job.job_link)?;

        // ids from an older blob may be ahead of the counter
        let id = self
            .jobs
            .iter()
            .map(|j| j.id.saturating_add(1))
            .max()
            .unwrap_or(0)
            .max(self.next_id);
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| TrackerError::Validation("no job ids left".to_string()))?;
        self.jobs.push(JobRecord {
            id,
            company: job.company,
            external_job_id: job.external_job_id,
            position: job.position,
            date_added,
            job_link: job.job_link,
            status: JobStatus::ConnectionSent,
        });
        tracing::debug!(id, "job added");
        Ok(id)
    }

    pub fn set_status(&mut self, id: u64, status: JobStatus) -> Result<()> {
        let policy = self.policy;
        let job = self.find_mut(id)?;
        if !policy.allows(job.status, status) {
            return Err(TrackerError::Validation(format!(
                "cannot move job {} from '{}' to '{}'",
                id, job.status, status
            )));
        }
        job.status = status;
        tracing::debug!(id, %status, "job status changed");
        Ok(())
    }

    /// Overwrites every field present in `patch`. All fields are checked before any is written.
    pub fn update(&mut self, id: u64, patch: JobPatch) -> Result<()> {
        let fields = [
            ("company", &patch.company),
            ("job id", &patch.external_job_id),
            ("position", &patch.position),
            ("job link", &patch.job_link),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                require(name, v)?;
            }
        }
        let job = self.find_mut(id)?;
        if let Some(c) = patch.company { job.company = c; }
        if let Some(j) = patch.external_job_id { job.external_job_id = j; }
        if let Some(p) = patch.position { job.position = p; }
        if let Some(l) = patch.job_link { job.job_link = l; }
        tracing::debug!(id, "job updated");
        Ok(())
    }

    /// Deletes a job. Unknown ids are reported as `NotFound`.
    pub fn remove(&mut self, id: u64) -> Result<JobRecord> {
        let idx = self
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(id, "job removed");
        Ok(self.jobs.remove(idx))
    }

    pub fn count_by_status(&self) -> BTreeMap<JobStatus, usize> {
        let mut counts = BTreeMap::new();
        for job in &self.jobs {
            *counts.entry(job.status).or_insert(0) += 1;
        }
        counts
    }

    /// Jobs whose posting has not expired.
    pub fn active_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.status != JobStatus::JobExpired)
            .count()
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut JobRecord> {
        self.jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: u64) -> TrackerError {
    TrackerError::NotFound(format!("job {}", id))
}
