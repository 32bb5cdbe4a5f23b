use std::path::PathBuf;

use crate::jobs::StatusPolicy;

pub const DB_ENV: &str = "CAREERDASH_DB";
pub const POLICY_ENV: &str = "CAREERDASH_STATUS_POLICY";

/// Runtime settings, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Location of the persisted store.
    pub db_path: PathBuf,
    pub status_policy: StatusPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl Settings {
    /// The store path is determined in the following order:
    /// 1. `CAREERDASH_DB` environment variable.
    /// 2. `~/.local/share/careerdash/store.json` (on Linux).
    /// 3. `./store.json` (fallback).
    pub fn from_env() -> Self {
        let db_path = std::env::var(DB_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_db_path());
        let status_policy = match std::env::var(POLICY_ENV) {
            Ok(raw) => raw.parse::<StatusPolicy>().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "ignoring {}", POLICY_ENV);
                StatusPolicy::default()
            }),
            Err(_) => StatusPolicy::default(),
        };
        Self { db_path, status_policy }
    }
}

fn default_db_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(mut p) => {
            p.push("careerdash");
            p.push("store.json");
            p
        }
        None => PathBuf::from("store.json"),
    }
}
