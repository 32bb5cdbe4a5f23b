use chrono::NaiveDate;

use crate::activity::ActivityStore;
use crate::challenge::ChallengeTracker;
use crate::jobs::JobPipelineStore;
use crate::skills::SkillTree;

/// An achievement shown next to the trackers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    /// Every topic of the category is completed.
    CategoryMastered { category_id: u64, name: String },
    /// All days of the coding challenge are completed.
    ChallengeComplete { days: u32 },
}

impl Badge {
    pub fn label(&self) -> String {
        match self {
            Badge::CategoryMastered { name, .. } => format!("{} mastered", name),
            Badge::ChallengeComplete { days } => format!("{}-day challenge complete", days),
        }
    }
}

/// Completed topics over all topics in all categories, in percent. 0 when there are no topics.
pub fn overall_learning_percent(skills: &SkillTree) -> f64 {
    let (done, total) = skills
        .categories()
        .iter()
        .fold((0usize, 0usize), |(done, total), c| {
            (done + c.completed_count(), total + c.topics.len())
        });
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64 * 100.0
}

/// Badges earned right now, categories first in their display order.
pub fn completion_badges(skills: &SkillTree, challenge: &ChallengeTracker) -> Vec<Badge> {
    let mut badges: Vec<Badge> = skills
        .categories()
        .iter()
        .filter(|c| c.is_fully_completed())
        .map(|c| Badge::CategoryMastered { category_id: c.id, name: c.name.clone() })
        .collect();
    if challenge.is_complete() {
        badges.push(Badge::ChallengeComplete { days: challenge.duration_days() });
    }
    badges
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub active_jobs: usize,
    pub learning_percent: f64,
    pub challenge_completed_days: u32,
    pub challenge_missed_days: u32,
    pub activity_streak: u32,
}

pub fn summarize(
    activity: &ActivityStore,
    jobs: &JobPipelineStore,
    skills: &SkillTree,
    challenge: &ChallengeTracker,
    today: NaiveDate,
) -> DashboardSummary {
    DashboardSummary {
        active_jobs: jobs.active_count(),
        learning_percent: overall_learning_percent(skills),
        challenge_completed_days: challenge.completed_days(),
        challenge_missed_days: challenge.missed_days(),
        activity_streak: activity.current_streak(today),
    }
}
