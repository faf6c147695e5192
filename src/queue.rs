// src/queue.rs

use crate::models::{PendingInfo, Problem};
use crate::scheduler::{add_days, Scheduler};
use chrono::NaiveDate;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

impl Scheduler {
    /// Problems to review on `today`, highest priority first.
    ///
    /// Every non-conquered problem whose review date has arrived is included,
    /// plus a random maintenance sample of conquered problems sized
    /// `floor(conquered * maintenance_sample_rate)`. The sample comes from `rng`,
    /// so two calls with the same input may return different sets.
    pub fn get_problems_for_today<'a, R>(
        &self,
        problems: &'a [Problem],
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<&'a Problem>
    where
        R: Rng + ?Sized,
    {
        let (conquered, active): (Vec<&Problem>, Vec<&Problem>) =
            problems.iter().partition(|p| p.is_conquered);

        let mut due: Vec<&Problem> = active
            .into_iter()
            .filter(|p| p.next_review_date <= today)
            .collect();
        let due_count = due.len();

        let sample_size = self.maintenance_sample_size(conquered.len());
        due.extend(conquered.choose_multiple(rng, sample_size).copied());

        debug!(
            "Due set for {}: {} scheduled, {} maintenance (of {} conquered)",
            today,
            due_count,
            sample_size,
            conquered.len()
        );

        due.sort_by(|a, b| review_priority(a, b, today));
        due
    }

    pub fn maintenance_sample_size(&self, conquered_count: usize) -> usize {
        let size = (conquered_count as f64 * self.config().maintenance_sample_rate).floor() as usize;
        size.min(conquered_count)
    }

    /// Non-conquered problems coming up within `horizon_days`, soonest first.
    pub fn get_upcoming_reviews<'a>(
        &self,
        problems: &'a [Problem],
        today: NaiveDate,
        horizon_days: u32,
    ) -> Vec<&'a Problem> {
        let horizon = add_days(today, horizon_days);
        let mut upcoming: Vec<&Problem> = problems
            .iter()
            .filter(|p| !p.is_conquered)
            .filter(|p| p.next_review_date > today && p.next_review_date <= horizon)
            .collect();
        upcoming.sort_by_key(|p| p.next_review_date);
        upcoming
    }
}

pub fn get_pending_info(problem: &Problem, today: NaiveDate) -> PendingInfo {
    let scheduled_date = problem.next_review_date;
    let is_pending = scheduled_date < today;
    PendingInfo {
        is_pending,
        days_pending: if is_pending {
            (today - scheduled_date).num_days()
        } else {
            0
        },
        scheduled_date,
    }
}

pub fn get_conquered_problems(problems: &[Problem]) -> Vec<&Problem> {
    problems.iter().filter(|p| p.is_conquered).collect()
}

// --- Ordering ---

fn days_since_scheduled(problem: &Problem, today: NaiveDate) -> i64 {
    (today - problem.next_review_date).num_days().max(0)
}

/// Overdue before due-today, then most overdue, then most failures, then hardest.
fn review_priority(a: &Problem, b: &Problem, today: NaiveDate) -> Ordering {
    let a_overdue = a.next_review_date < today;
    let b_overdue = b.next_review_date < today;

    b_overdue
        .cmp(&a_overdue)
        .then_with(|| days_since_scheduled(b, today).cmp(&days_since_scheduled(a, today)))
        .then_with(|| b.failure_count().cmp(&a.failure_count()))
        .then_with(|| b.difficulty.cmp(&a.difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, ProblemDraft, ProblemStatus, ReviewSession, SolveDifficulty};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn problem(id: i64, difficulty: Difficulty, next: NaiveDate) -> Problem {
        let draft = ProblemDraft {
            id,
            title: format!("Problem {}", id),
            platform: "LeetCode".to_string(),
            difficulty,
            topic: "Graphs".to_string(),
            url: None,
            notes: None,
            status: ProblemStatus::Practicing,
        };
        let mut p = Scheduler::default().initialize_problem(draft, day(2024, 1, 1));
        p.next_review_date = next;
        p
    }

    fn with_failures(mut p: Problem, failures: usize) -> Problem {
        for _ in 0..failures {
            p.review_history.push(ReviewSession {
                problem_id: p.id,
                date: day(2024, 1, 1),
                was_correct: false,
                difficulty: SolveDifficulty::Hard,
                notes: None,
                time_spent: None,
            });
        }
        p
    }

    fn conquered(id: i64) -> Problem {
        let mut p = problem(id, Difficulty::Medium, day(2024, 9, 1));
        p.is_conquered = true;
        p.consecutive_easy = 8;
        p
    }

    fn ids(problems: &[&Problem]) -> Vec<i64> {
        problems.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_due_set_membership() {
        let today = day(2024, 6, 10);
        let problems = vec![
            problem(1, Difficulty::Easy, day(2024, 6, 10)),
            problem(2, Difficulty::Easy, day(2024, 6, 11)),
            problem(3, Difficulty::Easy, day(2024, 6, 1)),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let due = Scheduler::default().get_problems_for_today(&problems, today, &mut rng);
        assert_eq!(ids(&due), vec![3, 1]);
    }

    #[test]
    fn test_priority_ordering() {
        let today = day(2024, 6, 10);
        let problems = vec![
            problem(1, Difficulty::Hard, today),
            with_failures(problem(2, Difficulty::Easy, today), 2),
            problem(3, Difficulty::Easy, day(2024, 6, 9)),
            problem(4, Difficulty::Easy, day(2024, 6, 5)),
            with_failures(problem(5, Difficulty::Easy, day(2024, 6, 9)), 1),
            problem(6, Difficulty::Hard, day(2024, 6, 9)),
            problem(7, Difficulty::Medium, today),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let due = Scheduler::default().get_problems_for_today(&problems, today, &mut rng);
        // 4 is most overdue; among 1-day overdue, failures then difficulty;
        // due-today ranks by failures then difficulty.
        assert_eq!(ids(&due), vec![4, 5, 6, 3, 2, 1, 7]);
    }

    #[test]
    fn test_no_conquered_sample_below_twenty() {
        let today = day(2024, 6, 10);
        let problems: Vec<Problem> = (1..=19).map(conquered).collect();
        let s = Scheduler::default();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(s.get_problems_for_today(&problems, today, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_maintenance_sample_size_and_variation() {
        let today = day(2024, 6, 10);
        let mut problems: Vec<Problem> = (1..=100).map(conquered).collect();
        problems.push(problem(500, Difficulty::Hard, today));
        let s = Scheduler::default();

        let mut seen = HashSet::new();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let due = s.get_problems_for_today(&problems, today, &mut rng);
            assert_eq!(due.len(), 6);
            assert!(due.iter().any(|p| p.id == 500));

            let sampled: HashSet<i64> = due.iter().filter(|p| p.is_conquered).map(|p| p.id).collect();
            assert_eq!(sampled.len(), 5);
            let mut sorted: Vec<i64> = sampled.into_iter().collect();
            sorted.sort();
            seen.insert(sorted);
        }
        assert!(seen.len() > 1, "maintenance sample never varied");
    }

    #[test]
    fn test_seeded_sample_is_reproducible() {
        let today = day(2024, 6, 10);
        let problems: Vec<Problem> = (1..=60).map(conquered).collect();
        let s = Scheduler::default();
        let a = ids(&s.get_problems_for_today(&problems, today, &mut StdRng::seed_from_u64(42)));
        let b = ids(&s.get_problems_for_today(&problems, today, &mut StdRng::seed_from_u64(42)));
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_pending_info() {
        let today = day(2024, 6, 10);
        let overdue = problem(1, Difficulty::Easy, day(2024, 6, 7));
        let info = get_pending_info(&overdue, today);
        assert!(info.is_pending);
        assert_eq!(info.days_pending, 3);
        assert_eq!(info.scheduled_date, day(2024, 6, 7));

        let due_today = problem(2, Difficulty::Easy, today);
        let info = get_pending_info(&due_today, today);
        assert!(!info.is_pending);
        assert_eq!(info.days_pending, 0);

        let future = problem(3, Difficulty::Easy, day(2024, 6, 20));
        assert!(!get_pending_info(&future, today).is_pending);
    }

    #[test]
    fn test_pending_across_month_boundary() {
        let overdue = problem(1, Difficulty::Easy, day(2024, 2, 27));
        let info = get_pending_info(&overdue, day(2024, 3, 2));
        assert_eq!(info.days_pending, 4);
    }

    #[test]
    fn test_conquered_view_keeps_input_order() {
        let problems = vec![
            conquered(3),
            problem(1, Difficulty::Easy, day(2024, 6, 1)),
            conquered(2),
        ];
        assert_eq!(ids(&get_conquered_problems(&problems)), vec![3, 2]);
    }

    #[test]
    fn test_upcoming_reviews() {
        let today = day(2024, 6, 10);
        let problems = vec![
            problem(1, Difficulty::Easy, day(2024, 6, 15)),
            problem(2, Difficulty::Easy, day(2024, 6, 11)),
            problem(3, Difficulty::Easy, today),
            problem(4, Difficulty::Easy, day(2024, 6, 17)),
            problem(5, Difficulty::Easy, day(2024, 6, 18)),
            conquered(6),
        ];
        let upcoming = Scheduler::default().get_upcoming_reviews(&problems, today, 7);
        assert_eq!(ids(&upcoming), vec![2, 1, 4]);
    }

    #[test]
    fn test_upcoming_reviews_with_unbounded_horizon() {
        let today = day(2024, 6, 10);
        let problems = vec![
            problem(1, Difficulty::Easy, NaiveDate::MAX),
            problem(2, Difficulty::Easy, day(2030, 1, 1)),
            problem(3, Difficulty::Easy, today),
        ];
        let upcoming = Scheduler::default().get_upcoming_reviews(&problems, today, u32::MAX);
        assert_eq!(ids(&upcoming), vec![2, 1]);
    }
}
