use careerdash::commands::*;
use careerdash::dashboard::Dashboard;
use careerdash::jobs::StatusPolicy;
use careerdash::models::{JobPatch, JobStatus};
use careerdash::profile::{self, Registration};
use careerdash::referrals::ReferralList;
use careerdash::TrackerError;
use careerdash::storage::{FileStore, MemoryStore};
use chrono::NaiveDate;
use tempfile::TempDir;

fn load(store: &MemoryStore) -> Dashboard {
    Dashboard::load(store, StatusPolicy::Permissive)
}

fn add_meta(store: &mut MemoryStore) -> u64 {
    assert!(cmd_job_add(store, "Meta".into(), "META-2024-001".into(), "Software Engineer".into(), "https://www.metacareers.com/jobs/123456".into(), true));
    load(store).jobs.jobs().last().unwrap().id
}

#[test]
fn test_job_add_and_status() {
    let mut store = MemoryStore::new();
    let id = add_meta(&mut store);

    assert!(cmd_job_status(&mut store, StatusPolicy::Permissive, id, "applied".into(), true));
    assert!(cmd_job_status(&mut store, StatusPolicy::Permissive, id, "Connection Sent".into(), true));
    assert_eq!(load(&store).jobs.get(id).unwrap().status, JobStatus::ConnectionSent);

    assert!(!cmd_job_status(&mut store, StatusPolicy::Permissive, id, "Hired".into(), true));
    assert!(!cmd_job_status(&mut store, StatusPolicy::WorkflowEnforced, id, "Applied".into(), true));
    assert_eq!(load(&store).jobs.get(id).unwrap().status, JobStatus::ConnectionSent);
}

#[test]
fn test_job_add_empty_link_is_rejected() {
    let mut store = MemoryStore::new();
    assert!(!cmd_job_add(&mut store, "Meta".into(), "META-1".into(), "SWE".into(), "".into(), true));
    assert!(load(&store).jobs.is_empty());
}

#[test]
fn test_job_edit_and_remove() {
    let mut store = MemoryStore::new();
    let id = add_meta(&mut store);

    assert!(!cmd_job_edit(&mut store, id, JobPatch::default(), true));
    let patch = JobPatch { position: Some("Staff Engineer".into()), ..Default::default() };
    assert!(cmd_job_edit(&mut store, id, patch, true));
    assert_eq!(load(&store).jobs.get(id).unwrap().position, "Staff Engineer");

    assert!(cmd_job_remove(&mut store, id, true));
    assert!(!cmd_job_remove(&mut store, id, true));
    assert!(load(&store).jobs.is_empty());
}

#[test]
fn test_record_day_and_bad_date() {
    let mut store = MemoryStore::new();
    assert!(cmd_record_day(&mut store, Some("2026-01-13".into()), true, false, false, true));
    assert!(cmd_record_day(&mut store, Some("2026-01-14".into()), false, true, true, true));
    assert!(!cmd_record_day(&mut store, Some("14/01/2026".into()), true, true, true, true));

    let dash = load(&store);
    assert_eq!(dash.activity.len(), 2);
    assert_eq!(dash.activity.current_streak(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()), 2);
}

#[test]
fn test_skill_commands() {
    let mut store = MemoryStore::new();
    assert!(cmd_skill_add_category(&mut store, "DSA".into(), true));
    let cat = load(&store).skills.categories()[0].id;
    assert!(cmd_skill_add_topic(&mut store, cat, "Arrays".into(), true));
    assert!(cmd_skill_add_topic(&mut store, cat, "Graphs".into(), true));
    assert!(!cmd_skill_add_topic(&mut store, cat + 100, "Heaps".into(), true));

    let topic = load(&store).skills.category(cat).unwrap().topics[0].id;
    assert!(cmd_skill_toggle(&mut store, cat, topic, true));
    assert_eq!(load(&store).skills.progress(cat).unwrap(), 50.0);

    assert!(cmd_skill_remove_topic(&mut store, cat, topic, true));
    assert_eq!(load(&store).skills.progress(cat).unwrap(), 0.0);

    assert!(cmd_skill_remove_category(&mut store, cat, true));
    assert!(load(&store).skills.categories().is_empty());
}

#[test]
fn test_challenge_commands() {
    let mut store = MemoryStore::new();
    assert!(cmd_challenge_duration(&mut store, 100, true));
    assert!(!cmd_challenge_duration(&mut store, 50, true));
    assert!(cmd_challenge_target(&mut store, 50, true));
    assert!(!cmd_challenge_target(&mut store, 51, true));
    assert!(!cmd_challenge_target(&mut store, 0, true));
    assert!(cmd_challenge_complete(&mut store, true));
    assert!(cmd_challenge_miss(&mut store, true));
    assert!(cmd_challenge_streak(&mut store, false, true));

    let c = load(&store).challenge;
    assert_eq!(c.duration_days(), 100);
    assert_eq!(c.daily_target(), 50);
    assert_eq!(c.completed_days(), 1);
    assert_eq!(c.missed_days(), 1);
    assert_eq!(c.current_streak(), 1);

    assert!(cmd_challenge_streak(&mut store, true, true));
    assert_eq!(load(&store).challenge.current_streak(), 0);
}

#[test]
fn test_referral_commands() {
    let mut store = MemoryStore::new();
    assert!(cmd_referral_add(&mut store, "Google".into(), true));
    assert!(!cmd_referral_add(&mut store, " ".into(), true));
    let dash = load(&store);
    let google = &dash.referrals.companies()[0];
    assert_eq!(google.status, "Available anytime");
    assert!(cmd_referral_remove(&mut store, google.id, true));
    assert!(load(&store).referrals.companies().is_empty());
}

#[test]
fn test_profile_commands() {
    let mut store = MemoryStore::new();
    let edit = ProfileEdit { bio: Some("Backend dev".into()), ..Default::default() };
    assert!(!cmd_profile_edit(&mut store, edit.clone(), true));

    let form = Registration {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    };
    assert!(cmd_register(&mut store, form, true));
    assert!(cmd_profile_edit(&mut store, edit, true));
    assert_eq!(profile::load_profile(&store).unwrap().bio.as_deref(), Some("Backend dev"));

    let blank = ProfileEdit { email: Some("".into()), ..Default::default() };
    assert!(!cmd_profile_edit(&mut store, blank, true));

    assert!(cmd_logout(&mut store, true));
    assert!(!profile::is_authenticated(&store));
}

#[test]
fn test_reset_with_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let mut store = FileStore::new(&path);
    assert!(cmd_skill_add_category(&mut store, "OOPS".into(), true));
    assert!(path.exists());

    cmd_reset(&mut store, true);
    assert!(!path.exists());
    assert!(Dashboard::load(&store, StatusPolicy::Permissive).skills.categories().is_empty());
}

#[test]
fn test_referral_ids_exhausted() {
    let mut list = ReferralList::default();
    list.add("Google").unwrap();
    let mut value = serde_json::to_value(&list).unwrap();
    value["companies"][0]["id"] = serde_json::json!(u64::MAX);
    let mut list: ReferralList = serde_json::from_value(value).unwrap();

    assert!(matches!(list.add("Stripe"), Err(TrackerError::Validation(_))));
    assert_eq!(list.companies().len(), 1);
}
