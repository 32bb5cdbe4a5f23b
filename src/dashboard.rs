use chrono::NaiveDate;

use crate::activity::ActivityStore;
use crate::challenge::ChallengeTracker;
use crate::error::Result;
use crate::jobs::{JobPipelineStore, StatusPolicy};
use crate::progress::{self, Badge, DashboardSummary};
use crate::referrals::ReferralList;
use crate::skills::SkillTree;
use crate::storage::{
    load_json, KeyValueStore, ACTIVITY_KEY, CHALLENGE_KEY, JOBS_KEY, REFERRALS_KEY,
    SKILLS_KEY,
};

/// All trackers together, as loaded from and saved to one store.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub activity: ActivityStore,
    pub jobs: JobPipelineStore,
    pub skills: SkillTree,
    pub challenge: ChallengeTracker,
    pub referrals: ReferralList,
}

impl Dashboard {
    /// Loads every tracker; any one that is missing or unreadable starts empty.
    pub fn load(store: &dyn KeyValueStore, policy: StatusPolicy) -> Self {
        let jobs: JobPipelineStore = load_json(store, JOBS_KEY).unwrap_or_default();
        Self {
            activity: load_json(store, ACTIVITY_KEY).unwrap_or_default(),
            jobs: jobs.with_policy(policy),
            skills: load_json(store, SKILLS_KEY).unwrap_or_default(),
            challenge: load_json(store, CHALLENGE_KEY).unwrap_or_default(),
            referrals: load_json(store, REFERRALS_KEY).unwrap_or_default(),
        }
    }

    /// Encodes every tracker, then hands them to the store as one write.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let entries = [
            (ACTIVITY_KEY, serde_json::to_string(&self.activity)?),
            (JOBS_KEY, serde_json::to_string(&self.jobs)?),
            (SKILLS_KEY, serde_json::to_string(&self.skills)?),
            (CHALLENGE_KEY, serde_json::to_string(&self.challenge)?),
            (REFERRALS_KEY, serde_json::to_string(&self.referrals)?),
        ];
        store.set_many(&entries)
    }

    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        progress::summarize(&self.activity, &self.jobs, &self.skills, &self.challenge, today)
    }

    pub fn badges(&self) -> Vec<Badge> {
        progress::completion_badges(&self.skills, &self.challenge)
    }
}
