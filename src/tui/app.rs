use chrono::{Local, NaiveDate};
use ratatui::widgets::TableState;

use crate::activity::MonthView;
use crate::dashboard::Dashboard;
use crate::error::{Result, TrackerError};
use crate::jobs::StatusPolicy;
use crate::models::{ActivityFlags, ChallengeDuration, JobStatus, NewJob};
use crate::storage::KeyValueStore;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Jobs,
    Skills,
    Challenge,
    Calendar,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Jobs, ViewMode::Skills, ViewMode::Challenge, ViewMode::Calendar];

    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Jobs => "Jobs",
            ViewMode::Skills => "Skills",
            ViewMode::Challenge => "Challenge",
            ViewMode::Calendar => "Calendar",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

pub enum InputField {
    None,
    CategoryName,
    TopicName,
    DailyTarget,
}

/// A row of the skills table.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SkillRow {
    Category(u64),
    Topic(u64, u64),
}

/// State for the multi-step "Add Job" wizard.
#[derive(Default)]
pub struct AddJobState {
    pub company: String,
    pub job_id: String,
    pub position: String,
    pub step: usize, // 0: Company, 1: Job ID, 2: Position, 3: Link
}

pub struct App<S: KeyValueStore> {
    pub store: S,
    pub dashboard: Dashboard,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub job_state: TableState,
    pub skill_state: TableState,
    pub skill_rows: Vec<SkillRow>,
    pub add_state: AddJobState,
    pub month: MonthView,
    pub today: NaiveDate,
    /// Last result or error, shown in the status line.
    pub message: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    /// Creates a new App instance and loads the stored dashboard.
    pub fn new(store: S, policy: StatusPolicy) -> App<S> {
        let dashboard = Dashboard::load(&store, policy);
        let today = Local::now().date_naive();
        let mut app = App {
            store,
            dashboard,
            view_mode: ViewMode::Jobs,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            job_state: TableState::default(),
            skill_state: TableState::default(),
            skill_rows: Vec::new(),
            add_state: AddJobState::default(),
            month: MonthView::containing(today),
            today,
            message: None,
        };
        app.refresh();
        app
    }

    /// Rebuilds derived rows and keeps selections in range.
    pub fn refresh(&mut self) {
        self.skill_rows = self
            .dashboard
            .skills
            .categories()
            .iter()
            .flat_map(|c| {
                std::iter::once(SkillRow::Category(c.id))
                    .chain(c.topics.iter().map(move |t| SkillRow::Topic(c.id, t.id)))
            })
            .collect();
        clamp_selection(&mut self.job_state, self.dashboard.jobs.len());
        clamp_selection(&mut self.skill_state, self.skill_rows.len());
    }

    /// Saves after a successful mutation; reports errors in the status line.
    fn apply(&mut self, outcome: Result<String>) {
        let outcome = outcome.and_then(|msg| self.dashboard.save(&mut self.store).map(|_| msg));
        match outcome {
            Ok(msg) => self.message = Some(msg),
            Err(e) => self.message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn next_view(&mut self) {
        let idx = (self.view_mode.index() + 1) % ViewMode::ALL.len();
        self.view_mode = ViewMode::ALL[idx];
    }

    pub fn set_view(&mut self, idx: usize) {
        if let Some(v) = ViewMode::ALL.get(idx) {
            self.view_mode = *v;
        }
    }

    /// Selects the next item in the current list.
    pub fn next(&mut self) {
        match self.view_mode {
            ViewMode::Jobs => step_selection(&mut self.job_state, self.dashboard.jobs.len(), true),
            ViewMode::Skills => step_selection(&mut self.skill_state, self.skill_rows.len(), true),
            ViewMode::Calendar => self.month = self.month.next(),
            ViewMode::Challenge => {}
        }
    }

    /// Selects the previous item in the current list.
    pub fn previous(&mut self) {
        match self.view_mode {
            ViewMode::Jobs => step_selection(&mut self.job_state, self.dashboard.jobs.len(), false),
            ViewMode::Skills => step_selection(&mut self.skill_state, self.skill_rows.len(), false),
            ViewMode::Calendar => self.month = self.month.previous(),
            ViewMode::Challenge => {}
        }
    }

    fn selected_job(&self) -> Option<u64> {
        self.job_state
            .selected()
            .and_then(|i| self.dashboard.jobs.jobs().get(i))
            .map(|j| j.id)
    }

    fn selected_skill_row(&self) -> Option<SkillRow> {
        self.skill_state.selected().and_then(|i| self.skill_rows.get(i).copied())
    }

    /// Moves the selected job to the next status.
    pub fn cycle_status(&mut self) {
        let Some(id) = self.selected_job() else { return };
        let policy = self.dashboard.jobs.policy();
        let outcome = match self.dashboard.jobs.get(id).map(|j| (j.status, policy.next_status(j.status))) {
            Some((_, Some(status))) => self.set_job_status(id, status),
            Some((current, None)) => Err(TrackerError::Validation(format!(
                "job {} is '{}' and cannot move on",
                id, current
            ))),
            None => Err(TrackerError::NotFound(format!("job {}", id))),
        };
        self.apply(outcome);
    }

    /// n / x: marks the selected job as `status` directly.
    pub fn mark_status(&mut self, status: JobStatus) {
        let Some(id) = self.selected_job() else { return };
        let outcome = self.set_job_status(id, status);
        self.apply(outcome);
    }

    fn set_job_status(&mut self, id: u64, status: JobStatus) -> Result<String> {
        self.dashboard
            .jobs
            .set_status(id, status)
            .map(|_| format!("Job {} is now '{}'.", id, status))
    }

    /// Space: toggles the selected topic.
    pub fn toggle_selected(&mut self) {
        if let Some(SkillRow::Topic(cat, topic)) = self.selected_skill_row() {
            let outcome = self
                .dashboard
                .skills
                .toggle_topic(cat, topic)
                .map(|done| if done { "Topic completed.".to_string() } else { "Topic reopened.".to_string() });
            self.apply(outcome);
        }
    }

    /// Deletes the selected job, topic or category.
    pub fn delete_selected(&mut self) {
        let outcome = match self.view_mode {
            ViewMode::Jobs => match self.selected_job() {
                Some(id) => self.dashboard.jobs.remove(id).map(|j| format!("Removed {} - {}.", j.company, j.position)),
                None => return,
            },
            ViewMode::Skills => match self.selected_skill_row() {
                Some(SkillRow::Category(id)) => self
                    .dashboard
                    .skills
                    .remove_category(id)
                    .map(|c| format!("Removed category '{}'.", c.name)),
                Some(SkillRow::Topic(cat, topic)) => self
                    .dashboard
                    .skills
                    .remove_topic(cat, topic)
                    .map(|t| format!("Removed topic '{}'.", t.name)),
                None => return,
            },
            _ => return,
        };
        self.apply(outcome);
    }

    /// `a`: starts the add flow for the current view.
    pub fn start_add(&mut self) {
        match self.view_mode {
            ViewMode::Jobs => {
                self.add_state = AddJobState::default();
                self.input_mode = InputMode::Adding;
                self.input_buffer.clear();
            }
            ViewMode::Skills => {
                if self.selected_skill_row().is_some() {
                    self.start_edit(InputField::TopicName);
                } else {
                    self.start_edit(InputField::CategoryName);
                }
            }
            _ => {}
        }
    }

    pub fn start_edit(&mut self, field: InputField) {
        self.input_buffer = match field {
            InputField::DailyTarget => self.dashboard.challenge.daily_target().to_string(),
            _ => String::new(),
        };
        self.input_field = field;
        self.input_mode = InputMode::Editing;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
    }

    /// Enter in an input box.
    pub fn handle_input(&mut self) {
        let input = self.input_buffer.trim().to_string();
        match self.input_mode {
            InputMode::Adding => {
                match self.add_state.step {
                    0 => self.add_state.company = input,
                    1 => self.add_state.job_id = input,
                    2 => self.add_state.position = input,
                    _ => {
                        let job = NewJob {
                            company: std::mem::take(&mut self.add_state.company),
                            external_job_id: std::mem::take(&mut self.add_state.job_id),
                            position: std::mem::take(&mut self.add_state.position),
                            job_link: input,
                        };
                        let outcome = self.dashboard.jobs.add(job).map(|id| format!("Job added (id = {}).", id));
                        self.apply(outcome);
                        self.cancel_input();
                        return;
                    }
                }
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            InputMode::Editing => {
                let outcome = match self.input_field {
                    InputField::CategoryName => self
                        .dashboard
                        .skills
                        .add_category(&input)
                        .map(|_| format!("Category '{}' added.", input)),
                    InputField::TopicName => match self.selected_skill_row() {
                        Some(SkillRow::Category(cat)) | Some(SkillRow::Topic(cat, _)) => self
                            .dashboard
                            .skills
                            .add_topic(cat, &input)
                            .map(|_| format!("Topic '{}' added.", input)),
                        None => Err(TrackerError::NotFound("no category selected".into())),
                    },
                    InputField::DailyTarget => input
                        .parse::<u32>()
                        .map_err(|_| TrackerError::Validation(format!("'{}' is not a number", input)))
                        .and_then(|n| self.dashboard.challenge.set_daily_target(n).map(|_| n))
                        .map(|n| format!("Daily target set to {}.", n)),
                    InputField::None => Ok(String::new()),
                };
                self.apply(outcome);
                self.cancel_input();
            }
            InputMode::Normal => {}
        }
    }

    /// Cycles 30 -> 100 -> 365 -> 30.
    pub fn cycle_duration(&mut self) {
        let next = match self.dashboard.challenge.duration() {
            ChallengeDuration::Thirty => 100,
            ChallengeDuration::Hundred => 365,
            ChallengeDuration::Year => 30,
        };
        let outcome = self
            .dashboard
            .challenge
            .set_duration(next)
            .map(|_| format!("Challenge set to {} days.", next));
        self.apply(outcome);
    }

    pub fn complete_challenge_day(&mut self) {
        let outcome = self
            .dashboard
            .challenge
            .record_completed_day()
            .map(|n| format!("{} days completed.", n));
        self.apply(outcome);
    }

    pub fn miss_challenge_day(&mut self) {
        let n = self.dashboard.challenge.record_missed_day();
        self.apply(Ok(format!("{} missed days.", n)));
    }

    pub fn extend_challenge_streak(&mut self) {
        let n = self.dashboard.challenge.extend_streak();
        self.apply(Ok(format!("Challenge streak: {} days.", n)));
    }

    pub fn reset_challenge_streak(&mut self) {
        self.dashboard.challenge.reset_streak();
        self.apply(Ok("Challenge streak reset.".to_string()));
    }

    /// Flips one of today's activity flags, keeping the other two.
    pub fn toggle_today(&mut self, which: Activity) {
        let mut flags = self
            .dashboard
            .activity
            .day(self.today)
            .map(|d| d.flags)
            .unwrap_or_default();
        match which {
            Activity::Task => flags.task = !flags.task,
            Activity::Learning => flags.learning = !flags.learning,
            Activity::Leetcode => flags.leetcode = !flags.leetcode,
        }
        self.dashboard.activity.record_day(self.today, flags);
        let streak = self.dashboard.activity.current_streak(self.today);
        self.apply(Ok(describe_flags(&flags, streak)));
    }

    pub fn jump_to_today(&mut self) {
        self.month = MonthView::containing(self.today);
    }
}

#[derive(Clone, Copy)]
pub enum Activity {
    Task,
    Learning,
    Leetcode,
}

fn describe_flags(flags: &ActivityFlags, streak: u32) -> String {
    format!(
        "Today: task {} | learning {} | leetcode {} | streak {} days",
        if flags.task { "yes" } else { "no" },
        if flags.learning { "yes" } else { "no" },
        if flags.leetcode { "yes" } else { "no" },
        streak
    )
}

fn step_selection(state: &mut TableState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if forward => if i >= len - 1 { 0 } else { i + 1 },
        Some(i) => if i == 0 { len - 1 } else { i - 1 },
        None => 0,
    };
    state.select(Some(i));
}

fn clamp_selection(state: &mut TableState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(i) if i >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn app() -> App<MemoryStore> {
        App::new(MemoryStore::new(), StatusPolicy::Permissive)
    }

    fn type_and_enter(app: &mut App<MemoryStore>, text: &str) {
        app.input_buffer = text.to_string();
        app.handle_input();
    }

    #[test]
    fn add_job_wizard_saves_to_store() {
        let mut app = app();
        app.start_add();
        for text in ["Meta", "META-2024-001", "Software Engineer", "https://www.metacareers.com/jobs/123456"] {
            type_and_enter(&mut app, text);
        }
        assert_eq!(app.dashboard.jobs.len(), 1);
        assert!(app.input_mode == InputMode::Normal);

        let reloaded = Dashboard::load(&app.store, StatusPolicy::Permissive);
        assert_eq!(reloaded.jobs.jobs()[0].company, "Meta");
    }

    #[test]
    fn empty_link_shows_error_and_adds_nothing() {
        let mut app = app();
        app.start_add();
        for text in ["Meta", "META-1", "SWE", "  "] {
            type_and_enter(&mut app, text);
        }
        assert!(app.dashboard.jobs.is_empty());
        assert!(app.message.as_deref().is_some_and(|m| m.contains("job link")));
    }

    fn status_of_first_job(app: &App<MemoryStore>) -> JobStatus {
        app.dashboard.jobs.jobs()[0].status
    }

    #[test]
    fn status_key_walks_workflow_to_referred() {
        let mut app = App::new(MemoryStore::new(), StatusPolicy::WorkflowEnforced);
        app.start_add();
        for text in ["Google", "GOOG-42", "SRE", "https://careers.google.com/jobs/42"] {
            type_and_enter(&mut app, text);
        }

        let mut seen = Vec::new();
        for _ in 0..4 {
            app.cycle_status();
            seen.push(status_of_first_job(&app));
        }
        assert_eq!(
            seen,
            [JobStatus::ConnectionAccepted, JobStatus::Messaged, JobStatus::ReadyToRefer, JobStatus::Referred]
        );

        let reloaded = Dashboard::load(&app.store, StatusPolicy::WorkflowEnforced);
        assert_eq!(reloaded.jobs.jobs()[0].status, JobStatus::Referred);
    }

    #[test]
    fn no_reply_job_can_be_followed_up() {
        let mut app = App::new(MemoryStore::new(), StatusPolicy::WorkflowEnforced);
        app.start_add();
        for text in ["Google", "GOOG-42", "SRE", "https://careers.google.com/jobs/42"] {
            type_and_enter(&mut app, text);
        }
        app.mark_status(JobStatus::NoReply);
        assert_eq!(status_of_first_job(&app), JobStatus::NoReply);

        app.cycle_status();
        assert_eq!(status_of_first_job(&app), JobStatus::Messaged);

        app.mark_status(JobStatus::JobExpired);
        app.cycle_status();
        assert_eq!(status_of_first_job(&app), JobStatus::JobExpired);
        assert!(app.message.as_deref().is_some_and(|m| m.contains("cannot move on")));
    }

    #[test]
    fn skill_rows_follow_tree() {
        let mut app = app();
        app.view_mode = ViewMode::Skills;
        app.start_add();
        type_and_enter(&mut app, "DSA");
        app.start_add();
        type_and_enter(&mut app, "Arrays");
        assert_eq!(app.skill_rows.len(), 2);

        app.next();
        app.toggle_selected();
        let cat = app.dashboard.skills.categories()[0].id;
        assert_eq!(app.dashboard.skills.progress(cat).unwrap(), 100.0);
    }

    #[test]
    fn toggling_today_merges_flags() {
        let mut app = app();
        app.toggle_today(Activity::Task);
        app.toggle_today(Activity::Leetcode);
        let day = app.dashboard.activity.day(app.today).unwrap();
        assert_eq!(day.flags, ActivityFlags::new(true, false, true));
    }
}
