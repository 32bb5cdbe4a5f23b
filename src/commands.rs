use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::activity::{CalendarCell, MonthView};
use crate::dashboard::Dashboard;
use crate::error::{Result, TrackerError};
use crate::jobs::StatusPolicy;
use crate::models::{ActivityFlags, Intensity, JobPatch, JobStatus, NewJob};
use crate::profile::{self, Registration};
use crate::storage::KeyValueStore;

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| TrackerError::Validation(format!("invalid date '{}': {}. Use YYYY-MM-DD.", s, e)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Loads the dashboard, applies `f` and saves on success. Prints the returned
/// message or the error unless `silent`.
fn mutate<F>(store: &mut dyn KeyValueStore, policy: StatusPolicy, silent: bool, f: F) -> bool
where
    F: FnOnce(&mut Dashboard) -> Result<String>,
{
    let mut dash = Dashboard::load(&*store, policy);
    let outcome = f(&mut dash).and_then(|msg| dash.save(store).map(|_| msg));
    match outcome {
        Ok(msg) => {
            if !silent { println!("{}", msg); }
            true
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            false
        }
    }
}

fn report(result: Result<String>, silent: bool) -> bool {
    match result {
        Ok(msg) => {
            if !silent { println!("{}", msg); }
            true
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            false
        }
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn intensity_color(intensity: Intensity) -> Color {
    match intensity {
        Intensity::All => Color::Green,
        Intensity::Two => Color::Blue,
        Intensity::One => Color::Yellow,
        Intensity::None => Color::Reset,
    }
}

fn status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::ConnectionSent => Color::Grey,
        JobStatus::ConnectionAccepted => Color::Cyan,
        JobStatus::Messaged => Color::Magenta,
        JobStatus::ReadyToRefer => Color::Yellow,
        JobStatus::NoReply => Color::Red,
        JobStatus::Referred => Color::Green,
        JobStatus::Applied => Color::DarkCyan,
        JobStatus::JobExpired => Color::DarkGrey,
    }
}

/// Records (overwrites) the activity flags for a day.
pub fn cmd_record_day(store: &mut dyn KeyValueStore, date: Option<String>, task: bool, learning: bool, leetcode: bool, silent: bool) -> bool {
    let date = match date.as_deref().map(parse_date).transpose() {
        Ok(d) => d.unwrap_or_else(today),
        Err(e) => return report(Err(e), silent),
    };
    mutate(store, StatusPolicy::default(), silent, |dash| {
        dash.activity.record_day(date, ActivityFlags::new(task, learning, leetcode));
        Ok(format!("Recorded {} ({} of 3 activities).", date, ActivityFlags::new(task, learning, leetcode).count()))
    })
}

/// Prints the activity streak ending at `as_of` (default today).
pub fn cmd_streak(store: &dyn KeyValueStore, as_of: Option<String>) {
    let reference = match as_of.as_deref().map(parse_date).transpose() {
        Ok(d) => d.unwrap_or_else(today),
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let dash = Dashboard::load(store, StatusPolicy::default());
    let streak = dash.activity.current_streak(reference);
    println!("{} day streak (as of {})", streak, reference);
}

/// Prints a month grid colored by activity intensity.
pub fn cmd_calendar(store: &dyn KeyValueStore, month: Option<String>) {
    let view = match month.as_deref().map(MonthView::parse).transpose() {
        Ok(v) => v.unwrap_or_else(|| MonthView::containing(today())),
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let dash = Dashboard::load(store, StatusPolicy::default());
    let now = today();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(header(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]));
    for week in view.weeks(&dash.activity) {
        table.add_row(week.iter().map(|cell| match cell {
            CalendarCell::Blank => Cell::new(""),
            CalendarCell::Day { date, intensity } => {
                let mut c = Cell::new(date.format("%e").to_string()).fg(intensity_color(*intensity));
                if *date == now {
                    c = c.add_attribute(Attribute::Underlined);
                }
                if intensity.is_active() {
                    c = c.add_attribute(Attribute::Bold);
                }
                c
            }
        }));
    }
    println!("{}", view.title());
    println!("{table}");
    println!(
        "{} active days | streak: {} days | green = all, blue = 2, yellow = 1",
        dash.activity.active_days_in(&view),
        dash.activity.current_streak(now)
    );
}

pub fn cmd_job_add(store: &mut dyn KeyValueStore, company: String, job_id: String, position: String, job_link: String, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let id = dash.jobs.add(NewJob {
            company,
            external_job_id: job_id,
            position,
            job_link,
        })?;
        Ok(format!("Job added (id = {})", id))
    })
}

/// Lists jobs in the order they were added.
pub fn cmd_job_list(store: &dyn KeyValueStore) {
    let dash = Dashboard::load(store, StatusPolicy::default());
    if dash.jobs.is_empty() {
        println!("No jobs found.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["ID", "Company", "Job ID", "Position", "Added", "Status", "Link"]));
    for j in dash.jobs.jobs() {
        table.add_row(vec![
            Cell::new(j.id),
            Cell::new(&j.company),
            Cell::new(&j.external_job_id),
            Cell::new(&j.position),
            Cell::new(j.date_added),
            Cell::new(j.status).fg(status_color(j.status)),
            Cell::new(&j.job_link),
        ]);
    }
    println!("{table}");
}

pub fn cmd_job_status(store: &mut dyn KeyValueStore, policy: StatusPolicy, id: u64, status: String, silent: bool) -> bool {
    mutate(store, policy, silent, |dash| {
        let status: JobStatus = status.parse()?;
        dash.jobs.set_status(id, status)?;
        Ok(format!("Job {} is now '{}'.", id, status))
    })
}

pub fn cmd_job_edit(store: &mut dyn KeyValueStore, id: u64, patch: JobPatch, silent: bool) -> bool {
    if patch.is_empty() {
        return report(Err(TrackerError::Validation("nothing to change".into())), silent);
    }
    mutate(store, StatusPolicy::default(), silent, |dash| {
        dash.jobs.update(id, patch)?;
        Ok(format!("Job {} updated.", id))
    })
}

pub fn cmd_job_remove(store: &mut dyn KeyValueStore, id: u64, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        dash.jobs.remove(id)?;
        Ok(format!("Job {} removed.", id))
    })
}

pub fn cmd_skill_add_category(store: &mut dyn KeyValueStore, name: String, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let id = dash.skills.add_category(&name)?;
        Ok(format!("Category added (id = {})", id))
    })
}

pub fn cmd_skill_add_topic(store: &mut dyn KeyValueStore, category_id: u64, name: String, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let id = dash.skills.add_topic(category_id, &name)?;
        Ok(format!("Topic added (id = {})", id))
    })
}

pub fn cmd_skill_toggle(store: &mut dyn KeyValueStore, category_id: u64, topic_id: u64, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let done = dash.skills.toggle_topic(category_id, topic_id)?;
        let pct = dash.skills.progress(category_id)?;
        Ok(format!(
            "Topic {} marked {} ({:.0}% of category).",
            topic_id,
            if done { "done" } else { "not done" },
            pct
        ))
    })
}

pub fn cmd_skill_remove_topic(store: &mut dyn KeyValueStore, category_id: u64, topic_id: u64, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let topic = dash.skills.remove_topic(category_id, topic_id)?;
        Ok(format!("Topic '{}' removed.", topic.name))
    })
}

pub fn cmd_skill_remove_category(store: &mut dyn KeyValueStore, category_id: u64, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let cat = dash.skills.remove_category(category_id)?;
        Ok(format!("Category '{}' removed with {} topics.", cat.name, cat.topics.len()))
    })
}

/// Lists categories with their topics and progress.
pub fn cmd_skill_list(store: &dyn KeyValueStore) {
    let dash = Dashboard::load(store, StatusPolicy::default());
    if dash.skills.categories().is_empty() {
        println!("No skill categories found.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["Cat", "Topic", "Name", "Done", "Progress"]));
    for c in dash.skills.categories() {
        let progress_color = if c.is_fully_completed() { Color::Green } else { Color::Reset };
        table.add_row(vec![
            Cell::new(c.id).add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(&c.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{}/{}", c.completed_count(), c.topics.len())),
            Cell::new(format!("{:.0}%", c.progress())).fg(progress_color),
        ]);
        for t in &c.topics {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(t.id),
                Cell::new(&t.name),
                Cell::new(if t.completed { "x" } else { "" }).fg(Color::Green),
                Cell::new(""),
            ]);
        }
    }
    println!("{table}");
}

pub fn cmd_challenge_show(store: &dyn KeyValueStore) {
    let dash = Dashboard::load(store, StatusPolicy::default());
    let c = &dash.challenge;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header(&["Duration", "Daily Target", "Completed", "Progress", "Streak", "Missed"]));
    table.add_row(vec![
        Cell::new(format!("{} days", c.duration_days())),
        Cell::new(format!("{} {}", c.daily_target(), if c.daily_target() == 1 { "problem" } else { "problems" })),
        Cell::new(format!("{}/{}", c.completed_days(), c.duration_days())),
        Cell::new(format!("{:.1}%", c.progress_percent())),
        Cell::new(c.current_streak()),
        Cell::new(c.missed_days()).fg(if c.missed_days() > 0 { Color::Red } else { Color::Reset }),
    ]);
    println!("{table}");
    if c.missed_days() > 0 {
        println!("You've missed {} {}. Stay consistent!", c.missed_days(), if c.missed_days() == 1 { "day" } else { "days" });
    }
}

pub fn cmd_challenge_duration(store: &mut dyn KeyValueStore, days: u32, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        dash.challenge.set_duration(days)?;
        Ok(format!("Challenge set to {} days.", days))
    })
}

pub fn cmd_challenge_target(store: &mut dyn KeyValueStore, target: u32, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        dash.challenge.set_daily_target(target)?;
        Ok(format!("Daily target set to {}.", target))
    })
}

pub fn cmd_challenge_complete(store: &mut dyn KeyValueStore, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let done = dash.challenge.record_completed_day()?;
        Ok(format!("{}/{} days completed.", done, dash.challenge.duration_days()))
    })
}

pub fn cmd_challenge_miss(store: &mut dyn KeyValueStore, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let missed = dash.challenge.record_missed_day();
        Ok(format!("{} missed days.", missed))
    })
}

/// Extends the challenge streak, or resets it when `reset` is set.
pub fn cmd_challenge_streak(store: &mut dyn KeyValueStore, reset: bool, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        if reset {
            dash.challenge.reset_streak();
            Ok("Challenge streak reset.".to_string())
        } else {
            Ok(format!("Challenge streak: {} days.", dash.challenge.extend_streak()))
        }
    })
}

pub fn cmd_referral_add(store: &mut dyn KeyValueStore, name: String, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let id = dash.referrals.add(&name)?;
        Ok(format!("Referral company added (id = {})", id))
    })
}

pub fn cmd_referral_list(store: &dyn KeyValueStore) {
    let dash = Dashboard::load(store, StatusPolicy::default());
    if dash.referrals.companies().is_empty() {
        println!("No referral companies found.");
        return;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header(&["ID", "Company", "Status"]));
    for c in dash.referrals.companies() {
        table.add_row(vec![Cell::new(c.id), Cell::new(&c.name), Cell::new(&c.status).fg(Color::Green)]);
    }
    println!("{table}");
}

pub fn cmd_referral_remove(store: &mut dyn KeyValueStore, id: u64, silent: bool) -> bool {
    mutate(store, StatusPolicy::default(), silent, |dash| {
        let c = dash.referrals.remove(id)?;
        Ok(format!("Referral company '{}' removed.", c.name))
    })
}

pub fn cmd_register(store: &mut dyn KeyValueStore, form: Registration, silent: bool) -> bool {
    let result = profile::register(store, form).map(|p| format!("Registration successful! Welcome, {}.", p.name));
    report(result, silent)
}

pub fn cmd_profile_show(store: &dyn KeyValueStore) {
    if !profile::is_authenticated(store) {
        println!("Not logged in.");
        return;
    }
    let Some(p) = profile::load_profile(store) else {
        println!("No profile found.");
        return;
    };
    let joined = chrono::DateTime::parse_from_rfc3339(&p.joined_date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| p.joined_date.clone());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let rows = [
        ("Name", Some(p.name.clone())),
        ("Email", Some(p.email.clone())),
        ("Phone", p.phone.clone()),
        ("Location", p.location.clone()),
        ("Job Title", p.job_title.clone()),
        ("Bio", p.bio.clone()),
        ("Joined", Some(joined)),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(value.unwrap_or_else(|| "-".into())),
        ]);
    }
    println!("{table}");
}

/// Field edits for the profile. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
}

pub fn cmd_profile_edit(store: &mut dyn KeyValueStore, edit: ProfileEdit, silent: bool) -> bool {
    let Some(mut p) = profile::load_profile(&*store) else {
        return report(Err(TrackerError::NotFound("profile; register first".into())), silent);
    };
    if let Some(n) = edit.name { p.name = n; }
    if let Some(e) = edit.email { p.email = e; }
    if let Some(v) = edit.phone { p.phone = Some(v); }
    if let Some(v) = edit.location { p.location = Some(v); }
    if let Some(v) = edit.job_title { p.job_title = Some(v); }
    if let Some(v) = edit.bio { p.bio = Some(v); }
    let result = profile::save_profile(store, p).map(|_| "Profile updated successfully.".to_string());
    report(result, silent)
}

pub fn cmd_logout(store: &mut dyn KeyValueStore, silent: bool) -> bool {
    report(profile::logout(store).map(|_| "Logged out successfully.".to_string()), silent)
}

/// Prints the headline numbers and earned badges.
pub fn cmd_stats(store: &dyn KeyValueStore) {
    let dash = Dashboard::load(store, StatusPolicy::default());
    let s = dash.summary(today());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(header(&["Active Jobs", "Learning Progress", "LeetCode Days", "Current Streak"]));
    table.add_row(vec![
        Cell::new(s.active_jobs).fg(Color::Blue),
        Cell::new(format!("{:.0}%", s.learning_percent)).fg(Color::Green),
        Cell::new(format!("{}/{}", s.challenge_completed_days, dash.challenge.duration_days())).fg(Color::Yellow),
        Cell::new(format!("{} days", s.activity_streak)).fg(Color::Cyan),
    ]);
    println!("{table}");

    let counts = dash.jobs.count_by_status();
    if !counts.is_empty() {
        let line: Vec<String> = counts.iter().map(|(status, n)| format!("{}: {}", status, n)).collect();
        println!("{}", line.join(" | "));
    }
    for badge in dash.badges() {
        println!("* {}", badge.label());
    }
}

/// Deletes everything in the store, including the profile.
pub fn cmd_reset(store: &mut dyn KeyValueStore, force: bool) {
    if !force {
        print!("Are you sure you want to delete all tracked data and your profile? This cannot be undone. [y/N] ");
        let mut input = String::new();
        if io::stdout().flush().is_err() || io::stdin().read_line(&mut input).is_err() {
            eprintln!("Could not read confirmation.");
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = store.clear() {
        eprintln!("Failed to reset store: {}", e);
    } else {
        println!("Store reset successfully.");
    }
}
