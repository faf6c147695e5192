// src/constants.rs

// --- Ease Factor Bounds ---
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 2.5;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

// --- Ease Adjustments ---
pub const EASE_INCREMENT_EARLY_EASY: f64 = 0.10; // while consecutive_easy <= EASY_STREAK_BOOST_AFTER
pub const EASE_INCREMENT_SUSTAINED_EASY: f64 = 0.15;
pub const EASY_STREAK_BOOST_AFTER: u32 = 3;
pub const EASE_DECREMENT_HARD: f64 = 0.08;
pub const EASE_DECREMENT_FAIL: f64 = 0.25;

// --- Intervals (days) ---
pub const INITIAL_INTERVAL: u32 = 1;
pub const FIRST_CORRECT_INTERVAL: u32 = 1;
pub const SECOND_CORRECT_INTERVAL_EASY: u32 = 3;
pub const SECOND_CORRECT_INTERVAL_HARD: u32 = 2;
pub const FAIL_INTERVAL: u32 = 1;

// --- Interval Multipliers ---
pub const PERFORMANCE_MULTIPLIER_EASY: f64 = 1.4;
pub const PERFORMANCE_MULTIPLIER_HARD: f64 = 0.7;
pub const PROGRESSIVE_MULTIPLIER_EARLY: f64 = 0.8; // while consecutive_easy <= PROGRESSIVE_STREAK_AFTER
pub const PROGRESSIVE_MULTIPLIER_LATE: f64 = 1.2;
pub const PROGRESSIVE_STREAK_AFTER: u32 = 4;

// --- Conquest ---
pub const CONQUERED_THRESHOLD: u32 = 8;
pub const CONQUERED_REVIEW_DAYS: u32 = 60;

// --- Due Set ---
pub const MAINTENANCE_SAMPLE_RATE: f64 = 0.05;

// --- Analytics ---
pub const WEAK_TOPIC_WINDOW: usize = 5;
pub const WEAK_TOPIC_MIN_PROBLEMS: usize = 3;
pub const WEAK_TOPIC_LIMIT: usize = 5;
pub const UPCOMING_HORIZON_DAYS: u32 = 7;
pub const RECENT_ACTIVITY_DAYS: u32 = 7;
