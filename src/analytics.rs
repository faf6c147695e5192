// src/analytics.rs

use crate::models::{
    DailyRevision, PracticeSummary, Problem, ReviewSession, TopicBreakdown, WeakTopic,
};
use crate::scheduler::Scheduler;
use chrono::{Days, NaiveDate};
use log::debug;
use std::collections::{BTreeMap, HashMap};

struct TopicTally<'a> {
    topic: &'a str,
    problems: usize,
    failures: usize,
}

impl Scheduler {
    /// Topics with the highest recent failure rate.
    ///
    /// Only the last `weak_topic_window` reviews of each problem count, and the
    /// rate is taken over every available slot (`problems * window`), not over
    /// the reviews actually made. Topics smaller than `weak_topic_min_problems`
    /// are skipped.
    pub fn get_weak_topics(&self, problems: &[Problem]) -> Vec<WeakTopic> {
        let cfg = self.config();
        let window = cfg.weak_topic_window;

        let mut order: Vec<TopicTally> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for p in problems {
            let slot = *index.entry(p.topic.as_str()).or_insert_with(|| {
                order.push(TopicTally {
                    topic: p.topic.as_str(),
                    problems: 0,
                    failures: 0,
                });
                order.len() - 1
            });
            let tally = &mut order[slot];
            tally.problems += 1;
            tally.failures += p.recent_failures(window);
        }

        let mut weak: Vec<WeakTopic> = order
            .into_iter()
            .filter(|t| t.problems >= cfg.weak_topic_min_problems)
            .map(|t| WeakTopic {
                topic: t.topic.to_string(),
                failure_rate: 100.0 * t.failures as f64 / (t.problems * window) as f64,
                problem_count: t.problems,
            })
            .collect();

        weak.sort_by(|a, b| b.failure_rate.total_cmp(&a.failure_rate));
        weak.truncate(cfg.weak_topic_limit);
        debug!("Weak topics: {:?}", weak.iter().map(|w| &w.topic).collect::<Vec<_>>());
        weak
    }

    /// Dashboard numbers for the whole collection.
    pub fn practice_summary(&self, problems: &[Problem], today: NaiveDate) -> PracticeSummary {
        let total_problems = problems.len();
        let conquered_problems = problems.iter().filter(|p| p.is_conquered).count();
        let active_practice = problems
            .iter()
            .filter(|p| !p.is_conquered && p.attempts > 0)
            .count();

        let mut topic_stats: BTreeMap<String, TopicBreakdown> = BTreeMap::new();
        let mut difficulty_stats = BTreeMap::new();
        let mut status_stats = BTreeMap::new();
        for p in problems {
            let entry = topic_stats.entry(p.topic.clone()).or_default();
            entry.total += 1;
            if p.is_conquered {
                entry.conquered += 1;
            } else if p.attempts > 0 {
                entry.practicing += 1;
            } else {
                entry.not_started += 1;
            }
            *difficulty_stats.entry(p.difficulty).or_insert(0) += 1;
            *status_stats.entry(p.status).or_insert(0) += 1;
        }

        let cutoff = today
            .checked_sub_days(Days::new(u64::from(self.config().recent_activity_days)))
            .unwrap_or(NaiveDate::MIN);
        let recent_activity = problems
            .iter()
            .filter(|p| p.last_practiced.is_some_and(|d| d >= cutoff))
            .count();

        let solved: Vec<&Problem> = problems.iter().filter(|p| p.consecutive_correct > 0).collect();
        let avg_attempts = if solved.is_empty() {
            0
        } else {
            let sum: u64 = solved.iter().map(|p| u64::from(p.attempts)).sum();
            (sum as f64 / solved.len() as f64).round() as u32
        };

        let mastery_rate = if total_problems > 0 {
            (conquered_problems as f64 / total_problems as f64 * 100.0).round() as u32
        } else {
            0
        };

        let upcoming_reviews = self
            .get_upcoming_reviews(problems, today, self.config().upcoming_horizon_days)
            .into_iter()
            .map(|p| p.id)
            .collect();

        PracticeSummary {
            total_problems,
            conquered_problems,
            active_practice,
            mastery_rate,
            recent_activity,
            avg_attempts,
            topic_stats,
            difficulty_stats,
            status_stats,
            weak_topics: self.get_weak_topics(problems),
            upcoming_reviews,
        }
    }
}

/// Reviews recorded on `date` across every problem.
pub fn daily_revision(problems: &[Problem], date: NaiveDate) -> DailyRevision {
    let sessions: Vec<&ReviewSession> = problems
        .iter()
        .flat_map(|p| p.review_history.iter())
        .filter(|r| r.date == date)
        .collect();

    let timed: Vec<u32> = sessions.iter().filter_map(|r| r.time_spent).collect();
    let average_time = if timed.is_empty() {
        None
    } else {
        Some(timed.iter().map(|&t| f64::from(t)).sum::<f64>() / timed.len() as f64)
    };

    DailyRevision {
        date,
        problems_reviewed: sessions.len(),
        correct_answers: sessions.iter().filter(|r| r.was_correct).count(),
        average_time,
    }
}

/// History newest first; same-day sessions keep most-recent-first order.
pub fn review_history_desc(problem: &Problem) -> Vec<&ReviewSession> {
    let mut history: Vec<&ReviewSession> = problem.review_history.iter().rev().collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}
