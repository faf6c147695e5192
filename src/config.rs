// src/config.rs

use crate::constants::*;
use crate::error::ConfigError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning knobs for the scheduler. Defaults mirror `constants.rs`.
///
/// Any field missing from a JSON config file falls back to its default, so a
/// file containing only `{"conqueredThreshold": 5}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    pub min_ease_factor: f64,
    pub max_ease_factor: f64,
    pub initial_ease_factor: f64,

    pub ease_increment_early_easy: f64,
    pub ease_increment_sustained_easy: f64,
    pub easy_streak_boost_after: u32,
    pub ease_decrement_hard: f64,
    pub ease_decrement_fail: f64,

    pub initial_interval: u32,
    pub first_correct_interval: u32,
    pub second_correct_interval_easy: u32,
    pub second_correct_interval_hard: u32,
    pub fail_interval: u32,

    pub performance_multiplier_easy: f64,
    pub performance_multiplier_hard: f64,
    pub progressive_multiplier_early: f64,
    pub progressive_multiplier_late: f64,
    pub progressive_streak_after: u32,

    pub conquered_threshold: u32,
    pub conquered_review_days: u32,

    pub maintenance_sample_rate: f64,

    pub weak_topic_window: usize,
    pub weak_topic_min_problems: usize,
    pub weak_topic_limit: usize,
    pub upcoming_horizon_days: u32,
    pub recent_activity_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            min_ease_factor: MIN_EASE_FACTOR,
            max_ease_factor: MAX_EASE_FACTOR,
            initial_ease_factor: DEFAULT_EASE_FACTOR,
            ease_increment_early_easy: EASE_INCREMENT_EARLY_EASY,
            ease_increment_sustained_easy: EASE_INCREMENT_SUSTAINED_EASY,
            easy_streak_boost_after: EASY_STREAK_BOOST_AFTER,
            ease_decrement_hard: EASE_DECREMENT_HARD,
            ease_decrement_fail: EASE_DECREMENT_FAIL,
            initial_interval: INITIAL_INTERVAL,
            first_correct_interval: FIRST_CORRECT_INTERVAL,
            second_correct_interval_easy: SECOND_CORRECT_INTERVAL_EASY,
            second_correct_interval_hard: SECOND_CORRECT_INTERVAL_HARD,
            fail_interval: FAIL_INTERVAL,
            performance_multiplier_easy: PERFORMANCE_MULTIPLIER_EASY,
            performance_multiplier_hard: PERFORMANCE_MULTIPLIER_HARD,
            progressive_multiplier_early: PROGRESSIVE_MULTIPLIER_EARLY,
            progressive_multiplier_late: PROGRESSIVE_MULTIPLIER_LATE,
            progressive_streak_after: PROGRESSIVE_STREAK_AFTER,
            conquered_threshold: CONQUERED_THRESHOLD,
            conquered_review_days: CONQUERED_REVIEW_DAYS,
            maintenance_sample_rate: MAINTENANCE_SAMPLE_RATE,
            weak_topic_window: WEAK_TOPIC_WINDOW,
            weak_topic_min_problems: WEAK_TOPIC_MIN_PROBLEMS,
            weak_topic_limit: WEAK_TOPIC_LIMIT,
            upcoming_horizon_days: UPCOMING_HORIZON_DAYS,
            recent_activity_days: RECENT_ACTIVITY_DAYS,
        }
    }
}

impl SchedulerConfig {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: SchedulerConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&data)?;
        info!("Loaded scheduler config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_ease_factor.is_nan() || self.min_ease_factor <= 0.0 {
            return Err(invalid("minEaseFactor", "must be positive"));
        }
        if self.min_ease_factor > self.max_ease_factor {
            return Err(invalid(
                "maxEaseFactor",
                format!(
                    "{} is below minEaseFactor {}",
                    self.max_ease_factor, self.min_ease_factor
                ),
            ));
        }
        if self.initial_ease_factor < self.min_ease_factor
            || self.initial_ease_factor > self.max_ease_factor
        {
            return Err(invalid(
                "initialEaseFactor",
                format!(
                    "{} is outside [{}, {}]",
                    self.initial_ease_factor, self.min_ease_factor, self.max_ease_factor
                ),
            ));
        }

        let non_negative = [
            ("easeIncrementEarlyEasy", self.ease_increment_early_easy),
            ("easeIncrementSustainedEasy", self.ease_increment_sustained_easy),
            ("easeDecrementHard", self.ease_decrement_hard),
            ("easeDecrementFail", self.ease_decrement_fail),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(invalid(field, format!("{} must not be negative", value)));
            }
        }

        let positive = [
            ("performanceMultiplierEasy", self.performance_multiplier_easy),
            ("performanceMultiplierHard", self.performance_multiplier_hard),
            ("progressiveMultiplierEarly", self.progressive_multiplier_early),
            ("progressiveMultiplierLate", self.progressive_multiplier_late),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(invalid(field, format!("{} must be positive", value)));
            }
        }

        let intervals = [
            ("initialInterval", self.initial_interval),
            ("firstCorrectInterval", self.first_correct_interval),
            ("secondCorrectIntervalEasy", self.second_correct_interval_easy),
            ("secondCorrectIntervalHard", self.second_correct_interval_hard),
            ("failInterval", self.fail_interval),
            ("conqueredReviewDays", self.conquered_review_days),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(invalid(field, "must be at least one day"));
            }
        }

        if self.conquered_threshold == 0 {
            return Err(invalid("conqueredThreshold", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.maintenance_sample_rate) {
            return Err(invalid(
                "maintenanceSampleRate",
                format!("{} is outside [0, 1]", self.maintenance_sample_rate),
            ));
        }
        if self.weak_topic_window == 0 {
            return Err(invalid("weakTopicWindow", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
