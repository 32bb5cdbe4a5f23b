//! # careerdash
//!
//! A terminal dashboard for the job hunt. careerdash keeps track of job applications,
//! skill learning, a coding-challenge cadence and a daily activity calendar with streaks.
//!
//! ## Features
//!
//! *   **Activity Calendar**: Record tasks, learning and coding practice per day and keep a streak.
//! *   **Job Pipeline**: Track referral-driven applications through eight statuses.
//! *   **Skill Tracker**: Categories of topics with completion percentages and badges.
//! *   **Coding Challenge**: 30, 100 or 365 day challenges with a daily problem target.
//! *   **Dual Interface**: scriptable CLI and an interactive TUI.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive dashboard
//! careerdash
//!
//! # Record today's activity
//! careerdash activity record --task --leetcode
//!
//! # Show the calendar for a month
//! careerdash activity calendar --month 2026-01
//!
//! # Track a job
//! careerdash job add Meta META-2024-001 "Software Engineer" https://www.metacareers.com/jobs/123456
//! careerdash job status 1 "Ready to Refer"
//!
//! # Skills
//! careerdash skill add-category DSA
//! careerdash skill add-topic 1 "Linked Lists"
//! careerdash skill toggle 1 2
//!
//! # Challenge
//! careerdash challenge duration 100
//! careerdash challenge target 3
//! careerdash challenge complete
//! ```
//!
//! ## Data Storage
//!
//! Everything lives in one JSON file in your local data directory:
//! *   Linux: `~/.local/share/careerdash/store.json`
//! *   macOS: `~/Library/Application Support/careerdash/store.json`
//! *   Windows: `%APPDATA%\careerdash\store.json`
//!
//! Override the location with `CAREERDASH_DB`. Set `CAREERDASH_STATUS_POLICY=workflow`
//! to only allow forward moves through the job pipeline. Logging goes to stderr and is
//! controlled with `RUST_LOG`.

use std::io;

use careerdash::commands::*;
use careerdash::config::Settings;
use careerdash::models::JobPatch;
use careerdash::profile::Registration;
use careerdash::storage::FileStore;
use careerdash::tui::run_tui;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "careerdash")]
#[command(about = "Career progress dashboard for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily activity calendar
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Job application pipeline
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Skill categories and topics
    Skill {
        #[command(subcommand)]
        command: SkillCommands,
    },
    /// Coding challenge tracker
    Challenge {
        #[command(subcommand)]
        command: ChallengeCommands,
    },
    /// Companies offering referrals
    Referral {
        #[command(subcommand)]
        command: ReferralCommands,
    },
    /// Registration and profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Show dashboard numbers and badges
    Stats,
    /// Delete all stored data
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// Record what was done on a day (overwrites that day)
    Record {
        /// Day in YYYY-MM-DD, defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Finished a planned task
        #[arg(short, long)]
        task: bool,
        /// Spent time learning
        #[arg(short, long)]
        learning: bool,
        /// Solved a coding problem
        #[arg(short = 'c', long)]
        leetcode: bool,
    },
    /// Show the current streak
    Streak {
        /// Reference day in YYYY-MM-DD, defaults to today
        #[arg(short, long)]
        as_of: Option<String>,
    },
    /// Show a month calendar
    Calendar {
        /// Month in YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// Add a job
    Add {
        company: String,
        /// The company's job posting id
        job_id: String,
        position: String,
        link: String,
    },
    /// List jobs
    List,
    /// Change the status of a job
    Status {
        id: u64,
        /// e.g. "Connection Accepted", messaged, ready-to-refer
        status: String,
    },
    /// Edit a job
    Edit {
        id: u64,
        #[arg(short, long)]
        company: Option<String>,
        #[arg(short, long)]
        job_id: Option<String>,
        #[arg(short, long)]
        position: Option<String>,
        #[arg(short, long)]
        link: Option<String>,
    },
    /// Remove a job
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum SkillCommands {
    /// Add a category
    AddCategory { name: String },
    /// Add a topic to a category
    AddTopic { category: u64, name: String },
    /// Toggle a topic between done and not done
    Toggle { category: u64, topic: u64 },
    /// Remove a topic
    RemoveTopic { category: u64, topic: u64 },
    /// Remove a category and all its topics
    RemoveCategory { category: u64 },
    /// List categories and topics
    List,
}

#[derive(Subcommand)]
enum ChallengeCommands {
    /// Show the challenge
    Show,
    /// Set the duration (30, 100 or 365 days)
    Duration { days: u32 },
    /// Set the daily target (1-50 problems)
    Target { problems: u32 },
    /// Count a completed day
    Complete,
    /// Count a missed day
    Miss,
    /// Extend the challenge streak by one day
    Streak {
        /// Reset the streak to zero instead
        #[arg(short, long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
enum ReferralCommands {
    /// Add a company
    Add { name: String },
    /// List companies
    List,
    /// Remove a company
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(short, long)]
        confirm: String,
    },
    /// Show the profile
    Show,
    /// Edit profile fields
    Edit {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        job_title: Option<String>,
        #[arg(short, long)]
        bio: Option<String>,
    },
    /// Log out and forget the profile
    Logout,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // the TUI owns the terminal, so it runs without a subscriber
    if !matches!(cli.command, Some(Commands::Ui) | None) {
        init_logging();
    }

    let settings = Settings::from_env();
    let mut store = FileStore::new(&settings.db_path);

    match cli.command {
        Some(Commands::Activity { command }) => match command {
            ActivityCommands::Record { date, task, learning, leetcode } => {
                cmd_record_day(&mut store, date, task, learning, leetcode, false);
            }
            ActivityCommands::Streak { as_of } => cmd_streak(&store, as_of),
            ActivityCommands::Calendar { month } => cmd_calendar(&store, month),
        },
        Some(Commands::Job { command }) => match command {
            JobCommands::Add { company, job_id, position, link } => {
                cmd_job_add(&mut store, company, job_id, position, link, false);
            }
            JobCommands::List => cmd_job_list(&store),
            JobCommands::Status { id, status } => {
                cmd_job_status(&mut store, settings.status_policy, id, status, false);
            }
            JobCommands::Edit { id, company, job_id, position, link } => {
                let patch = JobPatch { company, external_job_id: job_id, position, job_link: link };
                cmd_job_edit(&mut store, id, patch, false);
            }
            JobCommands::Remove { id } => {
                cmd_job_remove(&mut store, id, false);
            }
        },
        Some(Commands::Skill { command }) => match command {
            SkillCommands::AddCategory { name } => {
                cmd_skill_add_category(&mut store, name, false);
            }
            SkillCommands::AddTopic { category, name } => {
                cmd_skill_add_topic(&mut store, category, name, false);
            }
            SkillCommands::Toggle { category, topic } => {
                cmd_skill_toggle(&mut store, category, topic, false);
            }
            SkillCommands::RemoveTopic { category, topic } => {
                cmd_skill_remove_topic(&mut store, category, topic, false);
            }
            SkillCommands::RemoveCategory { category } => {
                cmd_skill_remove_category(&mut store, category, false);
            }
            SkillCommands::List => cmd_skill_list(&store),
        },
        Some(Commands::Challenge { command }) => match command {
            ChallengeCommands::Show => cmd_challenge_show(&store),
            ChallengeCommands::Duration { days } => {
                cmd_challenge_duration(&mut store, days, false);
            }
            ChallengeCommands::Target { problems } => {
                cmd_challenge_target(&mut store, problems, false);
            }
            ChallengeCommands::Complete => {
                cmd_challenge_complete(&mut store, false);
            }
            ChallengeCommands::Miss => {
                cmd_challenge_miss(&mut store, false);
            }
            ChallengeCommands::Streak { reset } => {
                cmd_challenge_streak(&mut store, reset, false);
            }
        },
        Some(Commands::Referral { command }) => match command {
            ReferralCommands::Add { name } => {
                cmd_referral_add(&mut store, name, false);
            }
            ReferralCommands::List => cmd_referral_list(&store),
            ReferralCommands::Remove { id } => {
                cmd_referral_remove(&mut store, id, false);
            }
        },
        Some(Commands::Profile { command }) => match command {
            ProfileCommands::Register { name, email, password, confirm } => {
                let form = Registration { name, email, password, confirm_password: confirm };
                cmd_register(&mut store, form, false);
            }
            ProfileCommands::Show => cmd_profile_show(&store),
            ProfileCommands::Edit { name, email, phone, location, job_title, bio } => {
                let edit = ProfileEdit { name, email, phone, location, job_title, bio };
                cmd_profile_edit(&mut store, edit, false);
            }
            ProfileCommands::Logout => {
                cmd_logout(&mut store, false);
            }
        },
        Some(Commands::Stats) => cmd_stats(&store),
        Some(Commands::Reset { force }) => cmd_reset(&mut store, force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "careerdash", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui(store, settings.status_policy) {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
