use careerdash::jobs::{JobPipelineStore, StatusPolicy};
use careerdash::models::{JobPatch, JobStatus, NewJob};
use careerdash::TrackerError;
use chrono::NaiveDate;

fn meta() -> NewJob {
    NewJob {
        company: "Meta".into(),
        external_job_id: "META-2024-001".into(),
        position: "Software Engineer".into(),
        job_link: "https://www.metacareers.com/jobs/123456".into(),
    }
}

fn netflix() -> NewJob {
    NewJob {
        company: "Netflix".into(),
        external_job_id: "NFLX-2024-042".into(),
        position: "Frontend Developer".into(),
        job_link: "https://jobs.netflix.com/jobs/123456".into(),
    }
}

#[test]
fn test_add_defaults() {
    let mut store = JobPipelineStore::new();
    let day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
    let id = store.add_on(meta(), day).unwrap();

    let job = store.get(id).unwrap();
    assert_eq!(job.status, JobStatus::ConnectionSent);
    assert_eq!(job.date_added, day);
    assert_eq!(job.company, "Meta");
}

#[test]
fn test_add_rejects_empty_fields() {
    let mut store = JobPipelineStore::new();
    store.add(meta()).unwrap();

    let mut no_link = netflix();
    no_link.job_link = String::new();
    assert!(matches!(store.add(no_link), Err(TrackerError::Validation(_))));

    let mut blank_company = netflix();
    blank_company.company = "   ".into();
    assert!(matches!(store.add(blank_company), Err(TrackerError::Validation(_))));

    assert_eq!(store.len(), 1);
}

#[test]
fn test_ids_unique_after_removal() {
    let mut store = JobPipelineStore::new();
    let a = store.add(meta()).unwrap();
    let b = store.add(netflix()).unwrap();
    assert_ne!(a, b);

    store.remove(b).unwrap();
    let c = store.add(netflix()).unwrap();
    assert_ne!(c, b);
    assert_ne!(c, a);
}

#[test]
fn test_status_any_to_any_when_permissive() {
    let mut store = JobPipelineStore::new();
    let id = store.add(meta()).unwrap();

    store.set_status(id, JobStatus::Applied).unwrap();
    store.set_status(id, JobStatus::ConnectionSent).unwrap();
    assert_eq!(store.get(id).unwrap().status, JobStatus::ConnectionSent);

    store.set_status(id, JobStatus::JobExpired).unwrap();
    store.set_status(id, JobStatus::Referred).unwrap();
    assert_eq!(store.get(id).unwrap().status, JobStatus::Referred);
}

#[test]
fn test_status_unknown_id() {
    let mut store = JobPipelineStore::new();
    assert!(matches!(store.set_status(42, JobStatus::Applied), Err(TrackerError::NotFound(_))));
}

#[test]
fn test_workflow_policy() {
    let mut store = JobPipelineStore::new().with_policy(StatusPolicy::WorkflowEnforced);
    let id = store.add(meta()).unwrap();

    assert!(matches!(store.set_status(id, JobStatus::Applied), Err(TrackerError::Validation(_))));
    assert_eq!(store.get(id).unwrap().status, JobStatus::ConnectionSent);

    for status in [
        JobStatus::ConnectionAccepted,
        JobStatus::Messaged,
        JobStatus::NoReply,
        JobStatus::Messaged,
        JobStatus::ReadyToRefer,
        JobStatus::Referred,
        JobStatus::Applied,
        JobStatus::JobExpired,
    ] {
        store.set_status(id, status).unwrap();
    }
    assert!(store.set_status(id, JobStatus::Messaged).is_err());
    assert!(store.set_status(id, JobStatus::JobExpired).is_ok());
}

#[test]
fn test_workflow_applied_may_drop_out() {
    let policy = StatusPolicy::WorkflowEnforced;
    assert!(policy.allows(JobStatus::Applied, JobStatus::NoReply));
    assert!(policy.allows(JobStatus::Applied, JobStatus::JobExpired));
    assert!(!policy.allows(JobStatus::Applied, JobStatus::Referred));
    assert!(!policy.allows(JobStatus::Applied, JobStatus::ConnectionSent));
}

#[test]
fn test_next_status_follows_policy() {
    let workflow = StatusPolicy::WorkflowEnforced;
    let mut status = JobStatus::ConnectionSent;
    let mut path = Vec::new();
    while let Some(next) = workflow.next_status(status) {
        path.push(next);
        status = next;
    }
    assert_eq!(
        path,
        [
            JobStatus::ConnectionAccepted,
            JobStatus::Messaged,
            JobStatus::ReadyToRefer,
            JobStatus::Referred,
            JobStatus::Applied,
            JobStatus::JobExpired,
        ]
    );
    assert_eq!(workflow.next_status(JobStatus::NoReply), Some(JobStatus::Messaged));
    assert_eq!(StatusPolicy::Permissive.next_status(JobStatus::Applied), Some(JobStatus::JobExpired));
    assert_eq!(StatusPolicy::Permissive.next_status(JobStatus::JobExpired), Some(JobStatus::ConnectionSent));
}

#[test]
fn test_add_when_ids_exhausted() {
    let mut store = JobPipelineStore::new();
    store.add(meta()).unwrap();
    let mut value = serde_json::to_value(&store).unwrap();
    value["jobs"][0]["id"] = serde_json::json!(u64::MAX);
    let mut store: JobPipelineStore = serde_json::from_value(value).unwrap();

    assert!(matches!(store.add(netflix()), Err(TrackerError::Validation(_))));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_update_validates_before_writing() {
    let mut store = JobPipelineStore::new();
    let id = store.add(meta()).unwrap();

    let bad = JobPatch {
        company: Some("Meta Platforms".into()),
        job_link: Some("".into()),
        ..Default::default()
    };
    assert!(matches!(store.update(id, bad), Err(TrackerError::Validation(_))));
    assert_eq!(store.get(id).unwrap().company, "Meta");

    let good = JobPatch { position: Some("Staff Engineer".into()), ..Default::default() };
    store.update(id, good).unwrap();
    let job = store.get(id).unwrap();
    assert_eq!(job.position, "Staff Engineer");
    assert_eq!(job.external_job_id, "META-2024-001");

    let patch = JobPatch { company: Some("X".into()), ..Default::default() };
    assert!(matches!(store.update(99, patch), Err(TrackerError::NotFound(_))));
}

#[test]
fn test_remove_missing_is_not_found() {
    let mut store = JobPipelineStore::new();
    let id = store.add(meta()).unwrap();
    store.remove(id).unwrap();
    assert!(matches!(store.remove(id), Err(TrackerError::NotFound(_))));
    assert!(store.is_empty());
}

#[test]
fn test_status_parsing_and_counts() {
    assert_eq!("Ready to Refer".parse::<JobStatus>().unwrap(), JobStatus::ReadyToRefer);
    assert_eq!("no-reply".parse::<JobStatus>().unwrap(), JobStatus::NoReply);
    assert_eq!("JOB_EXPIRED".parse::<JobStatus>().unwrap(), JobStatus::JobExpired);
    assert!(matches!("Hired".parse::<JobStatus>(), Err(TrackerError::Validation(_))));

    let mut store = JobPipelineStore::new();
    let a = store.add(meta()).unwrap();
    store.add(netflix()).unwrap();
    store.set_status(a, JobStatus::JobExpired).unwrap();

    let counts = store.count_by_status();
    assert_eq!(counts.get(&JobStatus::JobExpired), Some(&1));
    assert_eq!(counts.get(&JobStatus::ConnectionSent), Some(&1));
    assert_eq!(store.active_count(), 1);
}

#[test]
fn test_record_wire_format() {
    let mut store = JobPipelineStore::new();
    let day = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
    let id = store.add_on(netflix(), day).unwrap();
    store.set_status(id, JobStatus::Messaged).unwrap();

    let value = serde_json::to_value(store.get(id).unwrap()).unwrap();
    assert_eq!(value["jobId"], "NFLX-2024-042");
    assert_eq!(value["dateAdded"], "2026-01-12");
    assert_eq!(value["jobLink"], "https://jobs.netflix.com/jobs/123456");
    assert_eq!(value["status"], "Messaged");
}
