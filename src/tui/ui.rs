use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Tabs},
    Frame,
};

use super::app::{App, InputField, InputMode, SkillRow, ViewMode};
use crate::activity::CalendarCell;
use crate::models::{Intensity, JobStatus};
use crate::storage::KeyValueStore;

pub fn ui<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Summary
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help / status
        ].as_ref())
        .split(f.area());

    let titles: Vec<Line> = ViewMode::ALL.iter().map(|v| Line::from(v.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.view_mode.index())
        .block(Block::default().borders(Borders::ALL).title("careerdash"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    let s = app.dashboard.summary(app.today);
    let summary = Paragraph::new(format!(
        "Active jobs: {}   Learning: {:.0}%   LeetCode: {}/{} days   Streak: {} days",
        s.active_jobs,
        s.learning_percent,
        s.challenge_completed_days,
        app.dashboard.challenge.duration_days(),
        s.activity_streak
    ))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, chunks[1]);

    match app.view_mode {
        ViewMode::Jobs => render_jobs(f, app, chunks[2]),
        ViewMode::Skills => render_skills(f, app, chunks[2]),
        ViewMode::Challenge => render_challenge(f, app, chunks[2]),
        ViewMode::Calendar => render_calendar(f, app, chunks[2]),
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view_mode {
            ViewMode::Jobs => "q: Quit | Tab: View | a: Add | s: Next Status | n: No Reply | x: Expired | d: Del",
            ViewMode::Skills => "q: Quit | Tab: View | a: Add Topic | A: Add Category | Space: Toggle | d: Del",
            ViewMode::Challenge => "q: Quit | Tab: View | D: Duration | t: Target | c: Day Done | m: Missed | s: Streak+1 | r: Reset Streak",
            ViewMode::Calendar => "q: Quit | Tab: View | h/l: Month | g: Today | 1: Task | 2: Learning | 3: LeetCode",
        },
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };
    let status = match &app.message {
        Some(msg) if app.input_mode == InputMode::Normal => msg.as_str(),
        _ => help_text,
    };
    let help = Paragraph::new(status)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(help_text));
    f.render_widget(help, chunks[3]);

    if app.input_mode != InputMode::Normal {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.input_mode {
            InputMode::Adding => match app.add_state.step {
                0 => "Add Job: Enter Company",
                1 => "Add Job: Enter Job ID",
                2 => "Add Job: Enter Position",
                _ => "Add Job: Enter Job Link",
            },
            _ => match app.input_field {
                InputField::CategoryName => "Add Category: Enter Name",
                InputField::TopicName => "Add Topic: Enter Name",
                InputField::DailyTarget => "Set Daily Target (1-50 problems)",
                InputField::None => "Edit",
            },
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);
    }
}

fn status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::ConnectionSent => Color::Gray,
        JobStatus::ConnectionAccepted => Color::LightBlue,
        JobStatus::Messaged => Color::Magenta,
        JobStatus::ReadyToRefer => Color::Yellow,
        JobStatus::NoReply => Color::Red,
        JobStatus::Referred => Color::Green,
        JobStatus::Applied => Color::Cyan,
        JobStatus::JobExpired => Color::DarkGray,
    }
}

fn intensity_color(intensity: Intensity) -> Color {
    match intensity {
        Intensity::All => Color::Green,
        Intensity::Two => Color::Blue,
        Intensity::One => Color::Yellow,
        Intensity::None => Color::Reset,
    }
}

fn render_jobs<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let rows: Vec<Row> = app
        .dashboard
        .jobs
        .jobs()
        .iter()
        .map(|j| {
            Row::new(vec![
                Cell::from(j.id.to_string()),
                Cell::from(j.company.clone()),
                Cell::from(j.external_job_id.clone()),
                Cell::from(j.position.clone()),
                Cell::from(j.date_added.to_string()),
                Cell::from(j.status.label()).style(Style::default().fg(status_color(j.status))),
                Cell::from(j.job_link.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(20),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["ID", "Company", "Job ID", "Position", "Added", "Status", "Link"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(format!("Job Tracker ({})", app.dashboard.jobs.len())))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.job_state);
}

fn render_skills<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let skills = &app.dashboard.skills;
    let rows: Vec<Row> = app
        .skill_rows
        .iter()
        .filter_map(|row| match *row {
            SkillRow::Category(id) => skills.category(id).ok().map(|c| {
                let style = if c.is_fully_completed() {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Row::new(vec![
                    Cell::from(c.name.clone()),
                    Cell::from(format!("{}/{}", c.completed_count(), c.topics.len())),
                    Cell::from(progress_bar(c.progress(), 20)),
                ])
                .style(style)
            }),
            SkillRow::Topic(cat, topic) => skills
                .category(cat)
                .ok()
                .and_then(|c| c.topics.iter().find(|t| t.id == topic))
                .map(|t| {
                    let mark = if t.completed { "[x]" } else { "[ ]" };
                    let style = if t.completed { Style::default().fg(Color::Green) } else { Style::default() };
                    Row::new(vec![Cell::from(format!("   {} {}", mark, t.name)), Cell::from(""), Cell::from("")]).style(style)
                }),
        })
        .collect();

    let widths = [Constraint::Min(30), Constraint::Length(8), Constraint::Length(28)];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Skill", "Done", "Progress"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title("Skill Learning Tracker"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.skill_state);
}

fn progress_bar(pct: f64, width: usize) -> String {
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!("{}{} {:>3.0}%", "#".repeat(filled.min(width)), ".".repeat(width - filled.min(width)), pct)
}

fn render_challenge<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let c = &app.dashboard.challenge;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!("{} Day Challenge", c.duration_days())))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(c.progress_percent() / 100.0)
        .label(format!("{}/{} days", c.completed_days(), c.duration_days()));
    f.render_widget(gauge, chunks[0]);

    let target = Paragraph::new(format!(
        "{} {} per day",
        c.daily_target(),
        if c.daily_target() == 1 { "problem" } else { "problems" }
    ))
    .block(Block::default().borders(Borders::ALL).title("Daily Target"));
    f.render_widget(target, chunks[1]);

    let mut lines = vec![
        Line::from(format!("Current streak: {}", c.current_streak())),
        Line::from(format!("Missed days: {}", c.missed_days())),
    ];
    if c.missed_days() > 0 {
        lines.push(Line::styled(
            format!("You've missed {} {}. Stay consistent!", c.missed_days(), if c.missed_days() == 1 { "day" } else { "days" }),
            Style::default().fg(Color::Red),
        ));
    }
    for badge in app.dashboard.badges() {
        lines.push(Line::styled(format!("* {}", badge.label()), Style::default().fg(Color::Green)));
    }
    let stats = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Stats"));
    f.render_widget(stats, chunks[2]);
}

fn render_calendar<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let activity = &app.dashboard.activity;
    let rows: Vec<Row> = app
        .month
        .weeks(activity)
        .iter()
        .map(|week| {
            Row::new(week.iter().map(|cell| match cell {
                CalendarCell::Blank => Cell::from(""),
                CalendarCell::Day { date, intensity } => {
                    let mut style = Style::default().fg(intensity_color(*intensity));
                    if intensity.is_active() {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    if *date == app.today {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Cell::from(date.format("%e").to_string()).style(style)
                }
            }))
        })
        .collect();

    let widths = [Constraint::Length(5); 7];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(format!(
            "{} - {} active days - green: all, blue: 2, yellow: 1",
            app.month.title(),
            activity.active_days_in(&app.month)
        )));

    f.render_widget(table, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
