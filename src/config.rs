//! Verification parameters.
//!
//! All durations are whole minutes. Counts that can be read off the schedule
//! (tables, judges) are optional; when absent they are derived from the
//! records being verified.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ScheduleError;

pub const DEFAULT_SUBJECTIVE_MINUTES: i64 = 20;
pub const DEFAULT_PERFORMANCE_MINUTES: i64 = 5;
pub const DEFAULT_CHANGE_TIME_MINUTES: i64 = 15;
pub const DEFAULT_PERFORMANCE_CHANGE_TIME_MINUTES: i64 = 45;
pub const DEFAULT_SPECIAL_PERFORMANCE_CHANGE_TIME_MINUTES: i64 = 30;
pub const DEFAULT_PERFORMANCE_ROUNDS: usize = 3;
/// Longest accepted duration: schedule times lie within one day.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// [`VerifierConfig::validate`] rejects durations outside
/// `0..=MAX_DURATION_MINUTES`; unvalidated values are clamped.
fn minutes(value: i64) -> TimeDelta {
    TimeDelta::minutes(value.clamp(0, MAX_DURATION_MINUTES))
}

/// Parameters consumed by the verifier.
///
/// Deserializes from a partial document; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Default length of a subjective judging session.
    pub subjective_duration_minutes: i64,
    /// Per-category session lengths overriding the default.
    pub subjective_durations: BTreeMap<String, i64>,
    /// Length of a performance run.
    pub performance_duration_minutes: i64,
    /// Minimum gap between the end of one activity and the start of the next.
    pub change_time_minutes: i64,
    /// Minimum gap between consecutive performance runs.
    pub performance_change_time_minutes: i64,
    /// Gap used for round 1 → 2 when the pairing crosses the round boundary.
    pub special_performance_change_time_minutes: i64,
    /// Rounds every team must have.
    pub number_of_performance_rounds: usize,
    /// Table colors available; derived from the schedule when `None`.
    pub number_of_table_colors: Option<usize>,
    /// Judges per subjective category; derived from the schedule when `None`.
    pub number_of_judges_per_category: Option<usize>,
    /// Worker threads for per-team checks.
    pub workers: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            subjective_duration_minutes: DEFAULT_SUBJECTIVE_MINUTES,
            subjective_durations: BTreeMap::new(),
            performance_duration_minutes: DEFAULT_PERFORMANCE_MINUTES,
            change_time_minutes: DEFAULT_CHANGE_TIME_MINUTES,
            performance_change_time_minutes: DEFAULT_PERFORMANCE_CHANGE_TIME_MINUTES,
            special_performance_change_time_minutes:
                DEFAULT_SPECIAL_PERFORMANCE_CHANGE_TIME_MINUTES,
            number_of_performance_rounds: DEFAULT_PERFORMANCE_ROUNDS,
            number_of_table_colors: None,
            number_of_judges_per_category: None,
            workers: 1,
        }
    }
}

impl VerifierConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_subjective_duration(mut self, minutes: i64) -> Self {
        self.subjective_duration_minutes = minutes;
        self
    }

    /// Sets the session length for one category.
    pub fn with_category_duration(mut self, category: impl Into<String>, minutes: i64) -> Self {
        self.subjective_durations.insert(category.into(), minutes);
        self
    }

    pub fn with_performance_duration(mut self, minutes: i64) -> Self {
        self.performance_duration_minutes = minutes;
        self
    }

    pub fn with_change_time(mut self, minutes: i64) -> Self {
        self.change_time_minutes = minutes;
        self
    }

    pub fn with_performance_change_time(mut self, minutes: i64) -> Self {
        self.performance_change_time_minutes = minutes;
        self
    }

    pub fn with_special_performance_change_time(mut self, minutes: i64) -> Self {
        self.special_performance_change_time_minutes = minutes;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.number_of_performance_rounds = rounds;
        self
    }

    pub fn with_table_colors(mut self, tables: usize) -> Self {
        self.number_of_table_colors = Some(tables);
        self
    }

    pub fn with_judges_per_category(mut self, judges: usize) -> Self {
        self.number_of_judges_per_category = Some(judges);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let durations = [
            ("subjective_duration_minutes", self.subjective_duration_minutes),
            ("performance_duration_minutes", self.performance_duration_minutes),
            ("change_time_minutes", self.change_time_minutes),
            (
                "performance_change_time_minutes",
                self.performance_change_time_minutes,
            ),
            (
                "special_performance_change_time_minutes",
                self.special_performance_change_time_minutes,
            ),
        ];
        for (field, minutes) in durations {
            if !(0..=MAX_DURATION_MINUTES).contains(&minutes) {
                return Err(ScheduleError::invalid_config(
                    field,
                    format!("must be between 0 and {MAX_DURATION_MINUTES}, got {minutes}"),
                ));
            }
        }
        if let Some((category, minutes)) = self
            .subjective_durations
            .iter()
            .find(|(_, m)| !(0..=MAX_DURATION_MINUTES).contains(*m))
        {
            return Err(ScheduleError::invalid_config(
                "subjective_durations",
                format!(
                    "duration for {category} must be between 0 and {MAX_DURATION_MINUTES}, got {minutes}"
                ),
            ));
        }
        if self.number_of_performance_rounds == 0 {
            return Err(ScheduleError::invalid_config(
                "number_of_performance_rounds",
                "at least one round is required",
            ));
        }
        if self.number_of_table_colors == Some(0) {
            return Err(ScheduleError::invalid_config(
                "number_of_table_colors",
                "at least one table is required",
            ));
        }
        if self.number_of_judges_per_category == Some(0) {
            return Err(ScheduleError::invalid_config(
                "number_of_judges_per_category",
                "at least one judge is required",
            ));
        }
        if self.workers == 0 {
            return Err(ScheduleError::invalid_config(
                "workers",
                "at least one worker is required",
            ));
        }
        if self.special_performance_change_time_minutes > self.performance_change_time_minutes {
            tracing::warn!(
                special = self.special_performance_change_time_minutes,
                standard = self.performance_change_time_minutes,
                "special performance change time is longer than the standard one"
            );
        }
        Ok(())
    }

    /// Session length for a subjective category.
    pub fn subjective_duration(&self, category: &str) -> TimeDelta {
        minutes(
            self.subjective_durations
                .get(category)
                .copied()
                .unwrap_or(self.subjective_duration_minutes),
        )
    }

    pub fn performance_duration(&self) -> TimeDelta {
        minutes(self.performance_duration_minutes)
    }

    pub fn change_time(&self) -> TimeDelta {
        minutes(self.change_time_minutes)
    }

    pub fn performance_change_time(&self) -> TimeDelta {
        minutes(self.performance_change_time_minutes)
    }

    pub fn special_performance_change_time(&self) -> TimeDelta {
        minutes(self.special_performance_change_time_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = VerifierConfig::default();
        assert_eq!(c.subjective_duration_minutes, 20);
        assert_eq!(c.performance_duration_minutes, 5);
        assert_eq!(c.change_time_minutes, 15);
        assert_eq!(c.performance_change_time_minutes, 45);
        assert_eq!(c.special_performance_change_time_minutes, 30);
        assert_eq!(c.number_of_performance_rounds, 3);
        assert!(c.number_of_table_colors.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_category_duration_override() {
        let c = VerifierConfig::new()
            .with_subjective_duration(20)
            .with_category_duration("Presentation", 30);
        assert_eq!(c.subjective_duration("Presentation"), TimeDelta::minutes(30));
        assert_eq!(c.subjective_duration("Technical"), TimeDelta::minutes(20));
    }

    #[test]
    fn test_partial_json() {
        let c = VerifierConfig::from_json_str(
            r#"{"change_time_minutes": 20, "number_of_table_colors": 4}"#,
        )
        .unwrap();
        assert_eq!(c.change_time_minutes, 20);
        assert_eq!(c.number_of_table_colors, Some(4));
        assert_eq!(c.performance_change_time_minutes, 45);
    }

    #[test]
    fn test_json_parse_error() {
        let err = VerifierConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = VerifierConfig::new().with_change_time(-1).validate().unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidConfig {
                field: "change_time_minutes",
                ..
            }
        ));
        assert!(VerifierConfig::new().with_rounds(0).validate().is_err());
        assert!(VerifierConfig::new().with_table_colors(0).validate().is_err());
        assert!(VerifierConfig::new().with_workers(0).validate().is_err());
        assert!(VerifierConfig::new()
            .with_category_duration("Technical", -5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_durations_longer_than_a_day() {
        let err = VerifierConfig::new()
            .with_change_time(200_000_000_000_000)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidConfig {
                field: "change_time_minutes",
                ..
            }
        ));
        assert!(VerifierConfig::new()
            .with_category_duration("Presentation", MAX_DURATION_MINUTES + 1)
            .validate()
            .is_err());
        assert!(VerifierConfig::new()
            .with_performance_duration(MAX_DURATION_MINUTES)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_unvalidated_durations_are_clamped() {
        let c = VerifierConfig::new().with_change_time(i64::MAX);
        assert_eq!(c.change_time(), TimeDelta::minutes(MAX_DURATION_MINUTES));
        let c = VerifierConfig::new().with_performance_duration(-10);
        assert_eq!(c.performance_duration(), TimeDelta::zero());
    }
}
