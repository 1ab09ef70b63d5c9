//! Error types.
//!
//! Two levels of failure exist besides constraint violations:
//! - [`ScheduleError`] aborts a whole run (bad configuration, malformed document).
//! - [`RecordError`] excludes one record from verification; the rest of the
//!   schedule is still checked.

use thiserror::Error;

use crate::models::TeamNumber;

/// Errors that abort a verification run.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A configuration value is out of range.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Two records share a team number.
    #[error("team {0} appears more than once in the schedule")]
    DuplicateTeam(TeamNumber),

    /// Configuration document could not be parsed.
    #[error("cannot parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ScheduleError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Input-shape problems with a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record does not have the configured number of rounds.
    #[error("team {team} has {found} performance rounds, expected {expected}")]
    RoundCountMismatch {
        team: TeamNumber,
        expected: usize,
        found: usize,
    },

    /// A performance slot has an empty table color.
    #[error("team {team} has no table color for performance round {round}")]
    MissingTableColor { team: TeamNumber, round: usize },

    /// The record has an empty judging group.
    #[error("team {team} has no judging group")]
    MissingJudgingGroup { team: TeamNumber },
}

impl RecordError {
    /// Team the error belongs to.
    pub fn team(&self) -> TeamNumber {
        match self {
            Self::RoundCountMismatch { team, .. }
            | Self::MissingTableColor { team, .. }
            | Self::MissingJudgingGroup { team } => *team,
        }
    }
}
