// src/models.rs

use crate::error::ParseError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// --- Enumerations ---

/// Static difficulty of a problem as labelled by its platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(ParseError::Difficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How hard a single review felt. Independent of the problem's static difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveDifficulty {
    Easy,
    Hard,
}

impl SolveDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveDifficulty::Easy => "Easy",
            SolveDifficulty::Hard => "Hard",
        }
    }
}

impl FromStr for SolveDifficulty {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" | "easy" => Ok(SolveDifficulty::Easy),
            "Hard" | "hard" => Ok(SolveDifficulty::Hard),
            other => Err(ParseError::SolveDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for SolveDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// User-managed progress label. The scheduler never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ProblemStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    Practicing,
    Solved,
    Mastered,
}

impl ProblemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemStatus::NotStarted => "Not Started",
            ProblemStatus::Practicing => "Practicing",
            ProblemStatus::Solved => "Solved",
            ProblemStatus::Mastered => "Mastered",
        }
    }
}

impl FromStr for ProblemStatus {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Started" => Ok(ProblemStatus::NotStarted),
            "Practicing" => Ok(ProblemStatus::Practicing),
            "Solved" => Ok(ProblemStatus::Solved),
            "Mastered" => Ok(ProblemStatus::Mastered),
            other => Err(ParseError::Status(other.to_string())),
        }
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// --- Data Models ---

/// A problem as entered by the user, before the scheduler has touched it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDraft {
    pub id: i64,
    pub title: String,
    pub platform: String,
    pub difficulty: Difficulty,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ProblemStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub platform: String,
    pub difficulty: Difficulty,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ProblemStatus,

    // Scheduling state, owned by `Scheduler`.
    pub ease_factor: f64,
    pub interval: u32,
    pub consecutive_correct: u32,
    pub consecutive_easy: u32,
    pub is_conquered: bool,
    pub next_review_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_practiced: Option<NaiveDate>,
    pub attempts: u32,
    #[serde(default)]
    pub review_history: Vec<ReviewSession>,
}

impl Problem {
    /// Total failed reviews over the whole history.
    pub fn failure_count(&self) -> usize {
        self.review_history.iter().filter(|r| !r.was_correct).count()
    }

    /// Failed reviews among the last `window` entries of the history.
    pub fn recent_failures(&self, window: usize) -> usize {
        let start = self.review_history.len().saturating_sub(window);
        self.review_history[start..]
            .iter()
            .filter(|r| !r.was_correct)
            .count()
    }
}

/// One immutable review attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    pub problem_id: i64,
    pub date: NaiveDate,
    pub was_correct: bool,
    pub difficulty: SolveDifficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u32>,
}

/// What the user reports after working a problem.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub was_correct: bool,
    pub solve_difficulty: SolveDifficulty,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub time_spent: Option<u32>,
}

impl ReviewOutcome {
    pub fn new(was_correct: bool, solve_difficulty: SolveDifficulty) -> Self {
        ReviewOutcome {
            was_correct,
            solve_difficulty,
            notes: None,
            time_spent: None,
        }
    }

    pub fn correct(solve_difficulty: SolveDifficulty) -> Self {
        Self::new(true, solve_difficulty)
    }

    pub fn incorrect() -> Self {
        Self::new(false, SolveDifficulty::Hard)
    }

    /// Outcome as reported by a user who may leave the solve difficulty out.
    /// A missing value means Easy for a correct solve and Hard for a failure.
    pub fn reported(was_correct: bool, solve_difficulty: Option<SolveDifficulty>) -> Self {
        let default = if was_correct {
            SolveDifficulty::Easy
        } else {
            SolveDifficulty::Hard
        };
        Self::new(was_correct, solve_difficulty.unwrap_or(default))
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_time_spent(mut self, minutes: u32) -> Self {
        self.time_spent = Some(minutes);
        self
    }
}

// --- Derived Views ---

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingInfo {
    pub is_pending: bool,
    pub days_pending: i64,
    pub scheduled_date: NaiveDate,
}

/// Next review dates produced by each possible outcome.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPreview {
    pub correct_easy: NaiveDate,
    pub correct_hard: NaiveDate,
    pub incorrect: NaiveDate,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeakTopic {
    pub topic: String,
    pub failure_rate: f64,
    pub problem_count: usize,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopicBreakdown {
    pub total: usize,
    pub conquered: usize,
    pub practicing: usize,
    pub not_started: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevision {
    pub date: NaiveDate,
    pub problems_reviewed: usize,
    pub correct_answers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_time: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSummary {
    pub total_problems: usize,
    pub conquered_problems: usize,
    pub active_practice: usize,
    pub mastery_rate: u32,
    pub recent_activity: usize,
    pub avg_attempts: u32,
    pub topic_stats: BTreeMap<String, TopicBreakdown>,
    pub difficulty_stats: BTreeMap<Difficulty, usize>,
    pub status_stats: BTreeMap<ProblemStatus, usize>,
    pub weak_topics: Vec<WeakTopic>,
    pub upcoming_reviews: Vec<i64>,
}
