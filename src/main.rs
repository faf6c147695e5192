// src/main.rs

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use revision_engine::{
    daily_revision, get_conquered_problems, get_pending_info, review_history_desc, Difficulty,
    Problem, ProblemDraft, ProblemStatus, ReviewOutcome, Scheduler, SchedulerConfig, Snapshot,
    SolveDifficulty,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "revision-tracker", about = "Spaced-repetition practice tracker")]
struct Cli {
    /// Problem snapshot file (created on first write)
    #[arg(long, default_value = "problems.json")]
    data: PathBuf,

    /// Scheduler tuning file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the current date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Track a new problem
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "LeetCode")]
        platform: String,
        #[arg(long)]
        difficulty: Difficulty,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a review outcome
    Review {
        id: i64,
        /// The attempt failed
        #[arg(long)]
        failed: bool,
        /// How the solve felt: Easy or Hard (defaults to Easy, or Hard with --failed)
        #[arg(long)]
        solve: Option<SolveDifficulty>,
        #[arg(long)]
        notes: Option<String>,
        /// Minutes spent
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Move a conquered problem back into practice
    Reset { id: i64 },
    /// Update the user-managed status label
    Status { id: i64, status: ProblemStatus },
    /// List problems due today
    Today {
        /// Seed for the maintenance sample
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List overdue problems
    Pending,
    /// List upcoming reviews
    Upcoming {
        #[arg(long)]
        days: Option<u32>,
    },
    /// List conquered problems
    Conquered,
    /// Show weak topics
    Weak,
    /// Show dashboard analytics
    Stats,
    /// Show reviews recorded on a day
    Daily {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show what each outcome would schedule
    Preview { id: i64 },
    /// Show a problem's review history
    History { id: i64 },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    debug!("Running {:?} for {}", cli.command, today);

    let config = match &cli.config {
        Some(path) => SchedulerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    let scheduler = Scheduler::new(config);
    let mut snapshot = Snapshot::load(&cli.data)
        .with_context(|| format!("loading snapshot {}", cli.data.display()))?;

    match cli.command {
        Command::Add {
            title,
            platform,
            difficulty,
            topic,
            url,
            notes,
        } => {
            let draft = ProblemDraft {
                id: snapshot.next_id(),
                title,
                platform,
                difficulty,
                topic,
                url,
                notes,
                status: ProblemStatus::NotStarted,
            };
            let problem = scheduler.initialize_problem(draft, today);
            info!("Added problem {} ({})", problem.id, problem.title);
            print_problem(&problem, today);
            snapshot.insert(problem)?;
            save(&snapshot, &cli.data)?;
        }
        Command::Review {
            id,
            failed,
            solve,
            notes,
            minutes,
        } => {
            let mut outcome = ReviewOutcome::reported(!failed, solve);
            outcome.notes = notes;
            outcome.time_spent = minutes;
            let updated = scheduler.update_after_review(snapshot.get(id)?, &outcome, today);
            print_problem(&updated, today);
            snapshot.replace(updated)?;
            save(&snapshot, &cli.data)?;
        }
        Command::Reset { id } => {
            let updated = scheduler.move_back_to_practice(snapshot.get(id)?, today);
            print_problem(&updated, today);
            snapshot.replace(updated)?;
            save(&snapshot, &cli.data)?;
        }
        Command::Status { id, status } => {
            let mut updated = snapshot.get(id)?.clone();
            updated.status = status;
            snapshot.replace(updated)?;
            save(&snapshot, &cli.data)?;
        }
        Command::Today { seed } => {
            let due = match seed {
                Some(seed) => scheduler.get_problems_for_today(
                    &snapshot.problems,
                    today,
                    &mut StdRng::seed_from_u64(seed),
                ),
                None => scheduler.get_problems_for_today(
                    &snapshot.problems,
                    today,
                    &mut rand::thread_rng(),
                ),
            };
            if due.is_empty() {
                println!("Nothing due on {}", today);
            }
            for p in due {
                print_problem(p, today);
            }
        }
        Command::Pending => {
            for p in &snapshot.problems {
                let info = get_pending_info(p, today);
                if info.is_pending {
                    println!(
                        "#{:<4} {:<40} {} day(s) overdue (since {})",
                        p.id, p.title, info.days_pending, info.scheduled_date
                    );
                }
            }
        }
        Command::Upcoming { days } => {
            let days = days.unwrap_or(scheduler.config().upcoming_horizon_days);
            for p in scheduler.get_upcoming_reviews(&snapshot.problems, today, days) {
                print_problem(p, today);
            }
        }
        Command::Conquered => {
            for p in get_conquered_problems(&snapshot.problems) {
                print_problem(p, today);
            }
        }
        Command::Weak => {
            for w in scheduler.get_weak_topics(&snapshot.problems) {
                println!(
                    "{:<30} {:>5.1}% ({} problems)",
                    w.topic, w.failure_rate, w.problem_count
                );
            }
        }
        Command::Stats => {
            let summary = scheduler.practice_summary(&snapshot.problems, today);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Daily { date } => {
            let revision = daily_revision(&snapshot.problems, date.unwrap_or(today));
            println!("{}", serde_json::to_string_pretty(&revision)?);
        }
        Command::Preview { id } => {
            let preview = scheduler.preview(snapshot.get(id)?, today);
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        Command::History { id } => {
            for r in review_history_desc(snapshot.get(id)?) {
                println!(
                    "{} {:<9} {:<4} {}",
                    r.date,
                    if r.was_correct { "correct" } else { "incorrect" },
                    r.difficulty,
                    r.notes.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

fn save(snapshot: &Snapshot, path: &std::path::Path) -> Result<()> {
    snapshot
        .save(path)
        .with_context(|| format!("saving snapshot {}", path.display()))
}

fn print_problem(p: &Problem, today: NaiveDate) {
    let marker = if p.is_conquered { "*" } else { " " };
    println!(
        "#{:<4}{} {:<40} {:<6} {:<20} next {} ({:+}d) ease {:.2} interval {}d",
        p.id,
        marker,
        p.title,
        p.difficulty,
        p.topic,
        p.next_review_date,
        (p.next_review_date - today).num_days(),
        p.ease_factor,
        p.interval
    );
}
