use serde::{Deserialize, Serialize};

use crate::error::{require, Result, TrackerError};
use crate::models::{SkillCategory, Topic};

/// Categories of learnable topics with per-topic completion.
///
/// Topic and category ids come from one shared counter, so a topic id is never
/// reused anywhere in the tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SkillTree {
    #[serde(default)]
    categories: Vec<SkillCategory>,
    #[serde(default = "first_id")]
    next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for SkillTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillTree {
    pub fn new() -> Self {
        Self { categories: Vec::new(), next_id: first_id() }
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn category(&self, id: u64) -> Result<&SkillCategory> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| category_not_found(id))
    }

    pub fn add_category(&mut self, name: &str) -> Result<u64> {
        require("category name", name)?;
        let id = self.allocate_id()?;
        self.categories.push(SkillCategory {
            id,
            name: name.trim().to_string(),
            topics: Vec::new(),
        });
        tracing::debug!(id, "category added");
        Ok(id)
    }

    pub fn add_topic(&mut self, category_id: u64, name: &str) -> Result<u64> {
        // existence first, so a stale category id reports NotFound even with an empty name
        self.category(category_id)?;
        require("topic name", name)?;
        let id = self.allocate_id()?;
        let category = self.category_mut(category_id)?;
        category.topics.push(Topic {
            id,
            name: name.trim().to_string(),
            completed: false,
        });
        tracing::debug!(category_id, id, "topic added");
        Ok(id)
    }

    /// Flips a topic's completion flag and returns the new value.
    pub fn toggle_topic(&mut self, category_id: u64, topic_id: u64) -> Result<bool> {
        let topic = self.topic_mut(category_id, topic_id)?;
        topic.completed = !topic.completed;
        let completed = topic.completed;
        tracing::debug!(category_id, topic_id, completed, "topic toggled");
        Ok(completed)
    }

    pub fn remove_topic(&mut self, category_id: u64, topic_id: u64) -> Result<Topic> {
        let category = self.category_mut(category_id)?;
        let idx = category
            .topics
            .iter()
            .position(|t| t.id == topic_id)
            .ok_or_else(|| topic_not_found(category_id, topic_id))?;
        tracing::debug!(category_id, topic_id, "topic removed");
        Ok(category.topics.remove(idx))
    }

    /// Removes a category together with all of its topics.
    pub fn remove_category(&mut self, category_id: u64) -> Result<SkillCategory> {
        let idx = self
            .categories
            .iter()
            .position(|c| c.id == category_id)
            .ok_or_else(|| category_not_found(category_id))?;
        tracing::debug!(category_id, "category removed");
        Ok(self.categories.remove(idx))
    }

    pub fn progress(&self, category_id: u64) -> Result<f64> {
        self.category(category_id).map(SkillCategory::progress)
    }

    pub fn is_fully_completed(&self, category_id: u64) -> Result<bool> {
        self.category(category_id).map(SkillCategory::is_fully_completed)
    }

    fn allocate_id(&mut self) -> Result<u64> {
        let highest = self
            .categories
            .iter()
            .flat_map(|c| std::iter::once(c.id).chain(c.topics.iter().map(|t| t.id)))
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(highest.saturating_add(1));
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| TrackerError::Validation("no skill ids left".to_string()))?;
        Ok(id)
    }

    fn category_mut(&mut self, id: u64) -> Result<&mut SkillCategory> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| category_not_found(id))
    }

    fn topic_mut(&mut self, category_id: u64, topic_id: u64) -> Result<&mut Topic> {
        self.category_mut(category_id)?
            .topics
            .iter_mut()
            .find(|t| t.id == topic_id)
            .ok_or_else(|| topic_not_found(category_id, topic_id))
    }
}

fn category_not_found(id: u64) -> TrackerError {
    TrackerError::NotFound(format!("category {}", id))
}

fn topic_not_found(category_id: u64, topic_id: u64) -> TrackerError {
    TrackerError::NotFound(format!("topic {} in category {}", topic_id, category_id))
}
