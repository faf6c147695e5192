// src/scheduler.rs

use crate::config::SchedulerConfig;
use crate::models::{Problem, ProblemDraft, ReviewOutcome, ReviewPreview, ReviewSession, SolveDifficulty};
use chrono::{Days, NaiveDate};
use log::{debug, info};

/// Stateless scheduling service. Every method is a pure function of its
/// arguments and the configured constants; `today` is always supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Scheduler { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // --- Public Interface ---

    pub fn initialize_problem(&self, draft: ProblemDraft, today: NaiveDate) -> Problem {
        let interval = self.config.initial_interval;
        debug!("Initializing problem {} ({})", draft.id, draft.title);

        Problem {
            id: draft.id,
            title: draft.title,
            platform: draft.platform,
            difficulty: draft.difficulty,
            topic: draft.topic,
            url: draft.url,
            notes: draft.notes,
            status: draft.status,
            ease_factor: self.config.initial_ease_factor,
            interval,
            consecutive_correct: 0,
            consecutive_easy: 0,
            is_conquered: false,
            next_review_date: add_days(today, interval),
            last_practiced: None,
            attempts: 0,
            review_history: Vec::new(),
        }
    }

    pub fn update_after_review(
        &self,
        problem: &Problem,
        outcome: &ReviewOutcome,
        today: NaiveDate,
    ) -> Problem {
        let cfg = &self.config;
        let solve = outcome.solve_difficulty;

        let mut ease_factor = problem.ease_factor;
        let mut interval = problem.interval;
        let mut consecutive_correct = problem.consecutive_correct;
        let mut consecutive_easy = problem.consecutive_easy;

        debug!(
            "[SRS Input] Problem {}: Correct: {}, Solve: {:?}, Streak: {}/{}",
            problem.id, outcome.was_correct, solve, consecutive_correct, consecutive_easy
        );

        if outcome.was_correct {
            consecutive_correct += 1;

            match solve {
                SolveDifficulty::Easy => {
                    consecutive_easy += 1;
                    ease_factor += if consecutive_easy > cfg.easy_streak_boost_after {
                        cfg.ease_increment_sustained_easy
                    } else {
                        cfg.ease_increment_early_easy
                    };
                }
                SolveDifficulty::Hard => {
                    consecutive_easy = 0;
                    ease_factor -= cfg.ease_decrement_hard;
                }
            }
            ease_factor = self.clamp_ease(ease_factor);

            interval = match consecutive_correct {
                1 => {
                    debug!("[SRS logic] Branch: First Correct");
                    cfg.first_correct_interval
                }
                2 => {
                    debug!("[SRS logic] Branch: Second Correct");
                    match solve {
                        SolveDifficulty::Easy => cfg.second_correct_interval_easy,
                        SolveDifficulty::Hard => cfg.second_correct_interval_hard,
                    }
                }
                _ => {
                    let performance = match solve {
                        SolveDifficulty::Easy => cfg.performance_multiplier_easy,
                        SolveDifficulty::Hard => cfg.performance_multiplier_hard,
                    };
                    let progressive = if consecutive_easy > cfg.progressive_streak_after {
                        cfg.progressive_multiplier_late
                    } else {
                        cfg.progressive_multiplier_early
                    };
                    debug!(
                        "[SRS logic] Branch: Growth (perf x{:.2}, progressive x{:.2})",
                        performance, progressive
                    );
                    let grown = (f64::from(interval) * ease_factor * performance * progressive).round();
                    grown.clamp(1.0, f64::from(u32::MAX)) as u32
                }
            };
        } else {
            debug!("[SRS logic] Branch: Fail");
            consecutive_correct = 0;
            consecutive_easy = 0;
            interval = cfg.fail_interval;
            ease_factor = self.clamp_ease(ease_factor - cfg.ease_decrement_fail);
        }

        let is_conquered = consecutive_easy >= cfg.conquered_threshold;
        let next_review_date = if is_conquered {
            add_days(today, cfg.conquered_review_days)
        } else {
            add_days(today, interval)
        };

        if is_conquered && !problem.is_conquered {
            info!("Problem {} conquered after {} easy solves", problem.id, consecutive_easy);
        }
        info!(
            "[SRS Result] Problem {}: Ease {:.2} -> {:.2}, Interval {}d -> {}d, Next {}",
            problem.id, problem.ease_factor, ease_factor, problem.interval, interval, next_review_date
        );

        let mut next = problem.clone();
        next.review_history.push(ReviewSession {
            problem_id: problem.id,
            date: today,
            was_correct: outcome.was_correct,
            difficulty: solve,
            notes: outcome.notes.clone(),
            time_spent: outcome.time_spent,
        });
        next.ease_factor = ease_factor;
        next.interval = interval;
        next.consecutive_correct = consecutive_correct;
        next.consecutive_easy = consecutive_easy;
        next.is_conquered = is_conquered;
        next.next_review_date = next_review_date;
        next.last_practiced = Some(today);
        next.attempts = problem.attempts + 1;
        next
    }

    /// Manual override: pull a conquered problem back into daily practice.
    pub fn move_back_to_practice(&self, problem: &Problem, today: NaiveDate) -> Problem {
        info!("Moving problem {} back to practice", problem.id);
        Problem {
            is_conquered: false,
            consecutive_easy: 0,
            interval: self.config.fail_interval,
            next_review_date: today,
            ..problem.clone()
        }
    }

    /// Next review date each outcome would produce, without recording anything.
    pub fn preview(&self, problem: &Problem, today: NaiveDate) -> ReviewPreview {
        let date_for = |outcome: ReviewOutcome| {
            self.update_after_review(problem, &outcome, today)
                .next_review_date
        };
        ReviewPreview {
            correct_easy: date_for(ReviewOutcome::correct(SolveDifficulty::Easy)),
            correct_hard: date_for(ReviewOutcome::correct(SolveDifficulty::Hard)),
            incorrect: date_for(ReviewOutcome::incorrect()),
        }
    }

    // --- Internal Helpers ---

    fn clamp_ease(&self, ease_factor: f64) -> f64 {
        ease_factor.clamp(self.config.min_ease_factor, self.config.max_ease_factor)
    }
}

/// Saturates at `NaiveDate::MAX` instead of overflowing the calendar.
pub(crate) fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
