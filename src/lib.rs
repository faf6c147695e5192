// src/lib.rs

pub mod analytics;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod snapshot;

pub use analytics::{daily_revision, review_history_desc};
pub use config::SchedulerConfig;
pub use error::{ConfigError, ParseError, SnapshotError};
pub use models::{
    DailyRevision, Difficulty, PendingInfo, PracticeSummary, Problem, ProblemDraft,
    ProblemStatus, ReviewOutcome, ReviewPreview, ReviewSession, SolveDifficulty, TopicBreakdown,
    WeakTopic,
};
pub use queue::{get_conquered_problems, get_pending_info};
pub use scheduler::Scheduler;
pub use snapshot::Snapshot;
