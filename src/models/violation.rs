//! Constraint violation model.
//!
//! Violations are data, not errors: a verification run collects every one
//! it finds and hands the whole list to the caller.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TeamNumber;

/// How serious a violation is.
///
/// Hard violations make the schedule unusable; soft ones are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Hard,
    Soft,
}

/// The rule a violation was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    /// Two subjective sessions of one team are too close.
    SubjectiveSeparation,
    /// Consecutive performance rounds of one team are too close.
    PerformanceSpacing,
    /// A subjective session and a performance round of one team are too close.
    SubjectivePerformanceSeparation,
    /// More than two teams at one table at one time.
    TableCapacity,
    /// More teams performing at one time than there are table sides.
    PerformanceCapacity,
    /// One judge assigned two teams at the same time.
    JudgeDoubleBooked,
    /// More teams in a category at one time than there are judges.
    SubjectiveCapacity,
    /// A team meets the same opponent more than once.
    RepeatOpponent,
    /// Both teams of a match are on the same side of the table.
    SameTableSide,
    /// A team is on the same table side more than once.
    RepeatTableSide,
    /// A performance slot has no opponent.
    NoOpponent,
    /// Back-to-back sessions of one judge overlap.
    JudgeOverlap,
    /// Back-to-back runs on one table side overlap.
    TableOverlap,
}

impl RuleId {
    /// Stable kebab-case identifier, suitable for reports.
    pub fn code(self) -> &'static str {
        match self {
            Self::SubjectiveSeparation => "subjective-separation",
            Self::PerformanceSpacing => "performance-spacing",
            Self::SubjectivePerformanceSeparation => "subjective-performance-separation",
            Self::TableCapacity => "table-capacity",
            Self::PerformanceCapacity => "performance-capacity",
            Self::JudgeDoubleBooked => "judge-double-booked",
            Self::SubjectiveCapacity => "subjective-capacity",
            Self::RepeatOpponent => "repeat-opponent",
            Self::SameTableSide => "same-table-side",
            Self::RepeatTableSide => "repeat-table-side",
            Self::NoOpponent => "no-opponent",
            Self::JudgeOverlap => "judge-overlap",
            Self::TableOverlap => "table-overlap",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single finding of a verification run.
///
/// Field order defines the canonical ordering used to compare runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Hard or soft.
    pub severity: Severity,
    /// Rule that raised it.
    pub rule: RuleId,
    /// Teams involved, empty for schedule-wide findings.
    pub teams: Vec<TeamNumber>,
    /// Times involved.
    pub times: Vec<NaiveTime>,
    /// Human-readable description.
    pub message: String,
}

impl ConstraintViolation {
    /// Creates a hard violation.
    pub fn hard(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Hard,
            rule,
            teams: Vec::new(),
            times: Vec::new(),
            message: message.into(),
        }
    }

    /// Creates a soft violation.
    pub fn soft(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Soft,
            ..Self::hard(rule, message)
        }
    }

    /// Adds an involved team.
    pub fn with_team(mut self, team: TeamNumber) -> Self {
        self.teams.push(team);
        self
    }

    /// Adds an involved time.
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.times.push(time);
        self
    }

    /// Adds several involved times.
    pub fn with_times(mut self, times: impl IntoIterator<Item = NaiveTime>) -> Self {
        self.times.extend(times);
        self
    }

    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Hard
    }

    /// Whether a team is named by this violation.
    pub fn involves(&self, team: TeamNumber) -> bool {
        self.teams.contains(&team)
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Hard => "HARD",
            Severity::Soft => "SOFT",
        };
        write!(f, "[{level}] {}: {}", self.rule, self.message)
    }
}
