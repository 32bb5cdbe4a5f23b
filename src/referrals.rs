use serde::{Deserialize, Serialize};

use crate::error::{require, Result, TrackerError};
use crate::models::ReferralCompany;

pub const DEFAULT_REFERRAL_STATUS: &str = "Available anytime";

/// Companies where the user can ask for a referral.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReferralList {
    #[serde(default)]
    companies: Vec<ReferralCompany>,
    #[serde(default = "first_id")]
    next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for ReferralList {
    fn default() -> Self {
        Self { companies: Vec::new(), next_id: first_id() }
    }
}

impl ReferralList {
    pub fn companies(&self) -> &[ReferralCompany] {
        &self.companies
    }

    pub fn add(&mut self, name: &str) -> Result<u64> {
        require("company name", name)?;
        let id = self
            .companies
            .iter()
            .map(|c| c.id.saturating_add(1))
            .max()
            .unwrap_or(0)
            .max(self.next_id);
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| TrackerError::Validation("no referral ids left".to_string()))?;
        self.companies.push(ReferralCompany {
            id,
            name: name.trim().to_string(),
            status: DEFAULT_REFERRAL_STATUS.to_string(),
        });
        tracing::debug!(id, "referral company added");
        Ok(id)
    }

    pub fn remove(&mut self, id: u64) -> Result<ReferralCompany> {
        let idx = self
            .companies
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TrackerError::NotFound(format!("referral company {}", id)))?;
        tracing::debug!(id, "referral company removed");
        Ok(self.companies.remove(idx))
    }
}
