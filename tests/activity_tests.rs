use careerdash::activity::{ActivityStore, CalendarCell, MonthView};
use careerdash::models::{ActivityFlags, Intensity};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn all() -> ActivityFlags {
    ActivityFlags::new(true, true, true)
}

/// January 2026 sample calendar: days 1, 2, 5 and 7-14 recorded.
fn january_fixture() -> ActivityStore {
    let mut store = ActivityStore::new();
    store.record_day(date(2026, 1, 1), all());
    store.record_day(date(2026, 1, 2), ActivityFlags::new(true, false, true));
    store.record_day(date(2026, 1, 5), ActivityFlags::new(true, true, false));
    for d in 7..=14 {
        store.record_day(date(2026, 1, d), all());
    }
    store
}

#[test]
fn test_intensity_classes() {
    let mut store = ActivityStore::new();
    store.record_day(date(2026, 3, 1), ActivityFlags::new(false, false, false));
    store.record_day(date(2026, 3, 2), ActivityFlags::new(false, true, false));
    store.record_day(date(2026, 3, 3), ActivityFlags::new(true, false, true));
    store.record_day(date(2026, 3, 4), all());

    assert_eq!(store.intensity(date(2026, 3, 1)), Intensity::None);
    assert_eq!(store.intensity(date(2026, 3, 2)), Intensity::One);
    assert_eq!(store.intensity(date(2026, 3, 3)), Intensity::Two);
    assert_eq!(store.intensity(date(2026, 3, 4)), Intensity::All);
    assert_eq!(store.intensity(date(2026, 3, 5)), Intensity::None);
}

#[test]
fn test_record_day_overwrites_instead_of_merging() {
    let mut store = ActivityStore::new();
    let day = date(2026, 1, 14);
    store.record_day(day, all());
    store.record_day(day, ActivityFlags::new(false, true, false));

    assert_eq!(store.intensity(day), Intensity::One);
    assert_eq!(store.day(day).unwrap().flags, ActivityFlags::new(false, true, false));
    assert_eq!(store.len(), 1);
    let days: Vec<_> = store.days().collect();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date, day);
}

#[test]
fn test_streak_from_sample_calendar() {
    let store = january_fixture();
    assert_eq!(store.current_streak(date(2026, 1, 14)), 8);
    assert_eq!(store.current_streak(date(2026, 1, 5)), 1);
    assert_eq!(store.current_streak(date(2026, 1, 2)), 2);
}

#[test]
fn test_streak_is_zero_when_reference_day_inactive() {
    let mut store = january_fixture();
    assert_eq!(store.current_streak(date(2026, 1, 15)), 0);
    assert_eq!(store.current_streak(date(2026, 1, 6)), 0);

    store.record_day(date(2026, 1, 15), ActivityFlags::default());
    assert_eq!(store.current_streak(date(2026, 1, 15)), 0);
}

#[test]
fn test_streak_empty_store() {
    assert_eq!(ActivityStore::new().current_streak(date(2026, 1, 1)), 0);
}

#[test]
fn test_streak_crosses_month_and_year() {
    let mut store = ActivityStore::new();
    for d in 29..=31 {
        store.record_day(date(2025, 12, d), ActivityFlags::new(false, false, true));
    }
    store.record_day(date(2026, 1, 1), ActivityFlags::new(true, false, false));
    store.record_day(date(2026, 1, 2), ActivityFlags::new(true, false, false));

    assert_eq!(store.current_streak(date(2026, 1, 2)), 5);
}

#[test]
fn test_streak_crosses_leap_day() {
    let mut store = ActivityStore::new();
    store.record_day(date(2024, 2, 28), all());
    store.record_day(date(2024, 2, 29), all());
    store.record_day(date(2024, 3, 1), all());
    assert_eq!(store.current_streak(date(2024, 3, 1)), 3);
}

#[test]
fn test_month_view_layout() {
    // January 2026 starts on a Thursday
    let jan = MonthView::new(2026, 1).unwrap();
    assert_eq!(jan.days_in_month(), 31);
    assert_eq!(jan.first_weekday_offset(), 4);

    assert_eq!(MonthView::new(2024, 2).unwrap().days_in_month(), 29);
    assert_eq!(MonthView::new(2025, 2).unwrap().days_in_month(), 28);
    assert_eq!(MonthView::new(2026, 4).unwrap().days_in_month(), 30);
    assert!(MonthView::new(2026, 13).is_err());
}

#[test]
fn test_month_navigation_wraps_years() {
    let jan = MonthView::parse("2026-01").unwrap();
    let dec = jan.previous();
    assert_eq!((dec.year(), dec.month()), (2025, 12));
    assert_eq!(dec.next(), jan);
    assert_eq!(MonthView::containing(date(2026, 1, 14)), jan);
    assert!(MonthView::parse("January").is_err());
}

#[test]
fn test_month_cells_carry_intensity() {
    let store = january_fixture();
    let jan = MonthView::new(2026, 1).unwrap();
    let cells = jan.cells(&store);

    assert_eq!(cells.len(), 4 + 31);
    assert!(cells[..4].iter().all(|c| *c == CalendarCell::Blank));
    assert_eq!(
        cells[4 + 1],
        CalendarCell::Day { date: date(2026, 1, 2), intensity: Intensity::Two }
    );
    assert_eq!(jan.weeks(&store).len(), 5);
    assert_eq!(store.active_days_in(&jan), 11);
    assert_eq!(store.active_days_in(&jan.next()), 0);
}
