//! Core of `careerdash`: the stores behind a personal career-progress dashboard.
//!
//! Each tracker owns its records and derives its numbers on every read:
//!
//! *   [`activity`]: daily activity calendar, intensity classes and the streak scan.
//! *   [`jobs`]: job applications and their pipeline status.
//! *   [`skills`]: skill categories, topics and completion percentages.
//! *   [`challenge`]: coding-challenge duration, daily target and day counters.
//! *   [`progress`]: overall learning percentage, badges and the dashboard summary.
//!
//! Everything is persisted as JSON values in a [`storage::KeyValueStore`].

pub mod activity;
pub mod challenge;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod jobs;
pub mod models;
pub mod profile;
pub mod progress;
pub mod referrals;
pub mod skills;
pub mod storage;
pub mod tui;

pub use error::{Result, TrackerError};
