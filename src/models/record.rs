//! Per-team schedule record.
//!
//! A record holds everything one team does during the tournament:
//! one session per subjective judging category and a fixed number of
//! performance rounds, each at a table color and side.
//!
//! # Time Representation
//! Times are wall-clock times of day (`NaiveTime`). A tournament runs within
//! a single day; no date or time zone is carried.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Team identifier, unique within a schedule.
pub type TeamNumber = i32;

/// One of the two positions at a shared performance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TableSide {
    /// Side 1.
    One,
    /// Side 2.
    Two,
}

impl TableSide {
    /// The side facing this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Numeric side (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<u8> for TableSide {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("table side must be 1 or 2, got {other}")),
        }
    }
}

impl From<TableSide> for u8 {
    fn from(side: TableSide) -> Self {
        side.number()
    }
}

impl fmt::Display for TableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A single performance round assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSlot {
    /// Start time of the run.
    pub time: NaiveTime,
    /// Table color (e.g. "Green").
    pub table: String,
    /// Side of the table.
    pub side: TableSide,
}

impl PerformanceSlot {
    /// Creates a performance slot.
    pub fn new(time: NaiveTime, table: impl Into<String>, side: TableSide) -> Self {
        Self {
            time,
            table: table.into(),
            side,
        }
    }
}

/// The complete schedule of one team.
///
/// Built once (by a loader or the builder methods below) and treated as
/// immutable afterwards: there are accessors but no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    team_number: TeamNumber,
    #[serde(default)]
    team_name: String,
    #[serde(default)]
    organization: String,
    #[serde(default)]
    division: String,
    judging_group: String,
    /// Category name → session start.
    #[serde(default)]
    subjective_times: BTreeMap<String, NaiveTime>,
    /// Rounds in order; index 0 is round 1.
    #[serde(default)]
    performances: Vec<PerformanceSlot>,
}

impl ScheduleRecord {
    /// Creates a record for a team with the given judging group.
    pub fn new(team_number: TeamNumber, judging_group: impl Into<String>) -> Self {
        Self {
            team_number,
            team_name: String::new(),
            organization: String::new(),
            division: String::new(),
            judging_group: judging_group.into(),
            subjective_times: BTreeMap::new(),
            performances: Vec::new(),
        }
    }

    /// Sets the team name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.team_name = name.into();
        self
    }

    /// Sets the organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Sets the division (award group).
    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = division.into();
        self
    }

    /// Adds (or replaces) the session time for a subjective category.
    pub fn with_subjective(mut self, category: impl Into<String>, time: NaiveTime) -> Self {
        self.subjective_times.insert(category.into(), time);
        self
    }

    /// Appends the next performance round.
    pub fn with_performance(mut self, slot: PerformanceSlot) -> Self {
        self.performances.push(slot);
        self
    }

    pub fn team_number(&self) -> TeamNumber {
        self.team_number
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn division(&self) -> &str {
        &self.division
    }

    pub fn judging_group(&self) -> &str {
        &self.judging_group
    }

    /// Subjective sessions ordered by category name.
    pub fn subjective_times(&self) -> &BTreeMap<String, NaiveTime> {
        &self.subjective_times
    }

    /// Session time for a category, `None` if the team is not judged in it.
    pub fn subjective_time(&self, category: &str) -> Option<NaiveTime> {
        self.subjective_times.get(category).copied()
    }

    pub fn performances(&self) -> &[PerformanceSlot] {
        &self.performances
    }

    /// Performance slot for a 0-based round index.
    pub fn performance(&self, round: usize) -> Option<&PerformanceSlot> {
        self.performances.get(round)
    }

    /// Number of performance rounds on this record.
    pub fn round_count(&self) -> usize {
        self.performances.len()
    }
}

/// Human-readable round label (round index 0 → "1").
pub(crate) fn round_label(round: usize) -> usize {
    round + 1
}

/// Time of day as shown in messages and summaries.
pub(crate) fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
