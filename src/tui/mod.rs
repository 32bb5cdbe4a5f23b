pub mod app;
pub mod ui;

use std::{error::Error, io};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use app::{Activity, App, InputField, InputMode, ViewMode};
use ui::ui;

use crate::jobs::StatusPolicy;
use crate::models::JobStatus;
use crate::storage::KeyValueStore;

pub fn run_tui<S: KeyValueStore>(store: S, policy: StatusPolicy) -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, policy);

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend, S: KeyValueStore>(terminal: &mut Terminal<B>, app: &mut App<S>) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.input_mode {
            InputMode::Normal => {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Tab | KeyCode::Char('v') => app.next_view(),
                    KeyCode::F(n @ 1..=4) => app.set_view(n as usize - 1),
                    _ => {}
                }
                match (app.view_mode, key.code) {
                    (ViewMode::Jobs | ViewMode::Skills, KeyCode::Down | KeyCode::Char('j')) => app.next(),
                    (ViewMode::Jobs | ViewMode::Skills, KeyCode::Up | KeyCode::Char('k')) => app.previous(),
                    (ViewMode::Jobs | ViewMode::Skills, KeyCode::Char('a')) => app.start_add(),
                    (ViewMode::Jobs | ViewMode::Skills, KeyCode::Char('d') | KeyCode::Delete) => app.delete_selected(),
                    (ViewMode::Jobs, KeyCode::Char('s')) => app.cycle_status(),
                    (ViewMode::Jobs, KeyCode::Char('n')) => app.mark_status(JobStatus::NoReply),
                    (ViewMode::Jobs, KeyCode::Char('x')) => app.mark_status(JobStatus::JobExpired),
                    (ViewMode::Skills, KeyCode::Char('A')) => app.start_edit(InputField::CategoryName),
                    (ViewMode::Skills, KeyCode::Char(' ')) => app.toggle_selected(),
                    (ViewMode::Challenge, KeyCode::Char('D')) => app.cycle_duration(),
                    (ViewMode::Challenge, KeyCode::Char('t')) => app.start_edit(InputField::DailyTarget),
                    (ViewMode::Challenge, KeyCode::Char('c')) => app.complete_challenge_day(),
                    (ViewMode::Challenge, KeyCode::Char('m')) => app.miss_challenge_day(),
                    (ViewMode::Challenge, KeyCode::Char('s')) => app.extend_challenge_streak(),
                    (ViewMode::Challenge, KeyCode::Char('r')) => app.reset_challenge_streak(),
                    (ViewMode::Calendar, KeyCode::Left | KeyCode::Char('h')) => app.previous(),
                    (ViewMode::Calendar, KeyCode::Right | KeyCode::Char('l')) => app.next(),
                    (ViewMode::Calendar, KeyCode::Char('g')) => app.jump_to_today(),
                    (ViewMode::Calendar, KeyCode::Char('1')) => app.toggle_today(Activity::Task),
                    (ViewMode::Calendar, KeyCode::Char('2')) => app.toggle_today(Activity::Learning),
                    (ViewMode::Calendar, KeyCode::Char('3')) => app.toggle_today(Activity::Leetcode),
                    _ => {}
                }
            }
            InputMode::Editing | InputMode::Adding => match key.code {
                KeyCode::Enter => app.handle_input(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                _ => {}
            },
        }
    }
}
