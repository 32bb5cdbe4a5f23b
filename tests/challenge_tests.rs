use careerdash::challenge::ChallengeTracker;
use careerdash::TrackerError;

#[yare::parameterized(
    zero = { 0, false },
    one = { 1, true },
    mid = { 25, true },
    fifty = { 50, true },
    fifty_one = { 51, false },
)]
fn daily_target_bounds(value: u32, accepted: bool) {
    let mut c = ChallengeTracker::new();
    c.set_daily_target(7).unwrap();
    let result = c.set_daily_target(value);
    assert_eq!(result.is_ok(), accepted);
    if accepted {
        assert_eq!(c.daily_target(), value);
    } else {
        assert!(matches!(result, Err(TrackerError::Validation(_))));
        assert_eq!(c.daily_target(), 7);
    }
}

#[yare::parameterized(
    thirty = { 30, true },
    hundred = { 100, true },
    year = { 365, true },
    zero = { 0, false },
    sixty = { 60, false },
)]
fn duration_values(days: u32, accepted: bool) {
    let mut c = ChallengeTracker::new();
    assert_eq!(c.set_duration(days).is_ok(), accepted);
    if accepted {
        assert_eq!(c.duration_days(), days);
    } else {
        assert_eq!(c.duration_days(), 30);
    }
}

#[test]
fn test_defaults() {
    let c = ChallengeTracker::new();
    assert_eq!(c.duration_days(), 30);
    assert_eq!(c.daily_target(), 1);
    assert_eq!(c.completed_days(), 0);
    assert_eq!(c.missed_days(), 0);
    assert_eq!(c.current_streak(), 0);
    assert_eq!(c.progress_percent(), 0.0);
}

#[test]
fn test_counters_do_not_touch_streak() {
    let mut c = ChallengeTracker::new();
    for _ in 0..12 {
        c.record_completed_day().unwrap();
    }
    c.record_missed_day();
    c.record_missed_day();
    assert_eq!(c.completed_days(), 12);
    assert_eq!(c.missed_days(), 2);
    assert_eq!(c.current_streak(), 0);
    assert_eq!(c.progress_percent(), 40.0);

    c.extend_streak();
    c.extend_streak();
    assert_eq!(c.current_streak(), 2);
    c.reset_streak();
    assert_eq!(c.current_streak(), 0);
}

#[test]
fn test_completed_days_capped_at_duration() {
    let mut c = ChallengeTracker::new();
    for _ in 0..30 {
        c.record_completed_day().unwrap();
    }
    assert!(c.is_complete());
    assert!(matches!(c.record_completed_day(), Err(TrackerError::Validation(_))));
    assert_eq!(c.completed_days(), 30);
    assert_eq!(c.progress_percent(), 100.0);

    c.set_duration(100).unwrap();
    assert_eq!(c.progress_percent(), 30.0);
    c.record_completed_day().unwrap();
    assert!(matches!(c.set_duration(30), Err(TrackerError::Validation(_))));
    assert_eq!(c.duration_days(), 100);
}

#[test]
fn test_serialized_shape_and_validation_on_load() {
    let mut c = ChallengeTracker::new();
    c.set_duration(100).unwrap();
    c.set_daily_target(3).unwrap();
    let value = serde_json::to_value(&c).unwrap();
    assert_eq!(value["durationDays"], 100);
    assert_eq!(value["dailyTarget"], 3);

    let back: ChallengeTracker = serde_json::from_value(value).unwrap();
    assert_eq!(back, c);

    let bad_target = r#"{"durationDays":30,"dailyTarget":80}"#;
    assert!(serde_json::from_str::<ChallengeTracker>(bad_target).is_err());
    let bad_duration = r#"{"durationDays":45,"dailyTarget":1}"#;
    assert!(serde_json::from_str::<ChallengeTracker>(bad_duration).is_err());
    let overfull = r#"{"durationDays":30,"dailyTarget":1,"completedDays":31}"#;
    assert!(serde_json::from_str::<ChallengeTracker>(overfull).is_err());
}

#[test]
fn test_counters_saturate_instead_of_overflowing() {
    let stored = r#"{"durationDays":30,"dailyTarget":1,"missedDays":4294967295,"currentStreak":4294967295}"#;
    let mut c: ChallengeTracker = serde_json::from_str(stored).unwrap();

    assert_eq!(c.record_missed_day(), u32::MAX);
    assert_eq!(c.extend_streak(), u32::MAX);
    c.reset_streak();
    assert_eq!(c.current_streak(), 0);
}
