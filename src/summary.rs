//! Schedule summary.
//!
//! Earliest and latest start of every activity across all teams, for
//! reporting. A performance round's range only counts regular matches
//! against the same round of the opponent; byes and boundary-crossing
//! slots are left out.
//!
//! | Activity | Range |
//! |----------|-------|
//! | Each subjective category | min / max session start |
//! | Each performance round | min / max run start (same-round matches only) |

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::config::VerifierConfig;
use crate::index::MatchIndex;
use crate::models::{format_time, round_label, ScheduleRecord};

/// Earliest and latest observed start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub earliest: NaiveTime,
    pub latest: NaiveTime,
}

impl TimeRange {
    fn at(time: NaiveTime) -> Self {
        Self {
            earliest: time,
            latest: time,
        }
    }

    fn include(&mut self, time: NaiveTime) {
        self.earliest = self.earliest.min(time);
        self.latest = self.latest.max(time);
    }
}

fn include(range: &mut Option<TimeRange>, time: NaiveTime) {
    match range {
        Some(r) => r.include(time),
        None => *range = Some(TimeRange::at(time)),
    }
}

/// Start-time ranges per activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Category name → range.
    pub subjective: BTreeMap<String, TimeRange>,
    /// Indexed by 0-based round; `None` if no slot of the round qualified.
    pub performance: Vec<Option<TimeRange>>,
}

impl ScheduleSummary {
    /// Computes the summary over records that were indexed in `index`.
    pub fn compute<'a, I>(records: I, index: &MatchIndex) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            for (category, time) in record.subjective_times() {
                summary
                    .subjective
                    .entry(category.clone())
                    .and_modify(|r| r.include(*time))
                    .or_insert_with(|| TimeRange::at(*time));
            }

            for (round, performance) in record.performances().iter().enumerate() {
                if summary.performance.len() <= round {
                    summary.performance.resize(round + 1, None);
                }
                if !index.plays_own_round(record.team_number(), round) {
                    continue;
                }
                include(&mut summary.performance[round], performance.time);
            }
        }
        summary
    }

    /// Range for a 0-based performance round.
    pub fn performance_round(&self, round: usize) -> Option<TimeRange> {
        self.performance.get(round).copied().flatten()
    }

    /// All activities with a range, subjective categories first.
    pub fn activities(&self) -> Vec<(String, TimeRange)> {
        let subjective = self
            .subjective
            .iter()
            .map(|(name, range)| (name.clone(), *range));
        let performance = self.performance.iter().enumerate().filter_map(|(round, range)| {
            range.map(|r| (format!("Performance {}", round_label(round)), r))
        });
        subjective.chain(performance).collect()
    }

    /// General schedule: when each activity starts and when its last
    /// session ends, using the configured durations.
    pub fn describe(&self, config: &VerifierConfig) -> String {
        let mut out = String::new();
        for (category, range) in &self.subjective {
            let duration = config.subjective_duration(category);
            let _ = writeln!(
                out,
                "Subjective times for {category}: {} - {} (assumes {} minutes)",
                format_time(range.earliest),
                format_time(range.latest + duration),
                duration.num_minutes()
            );
        }
        let duration = config.performance_duration();
        for (round, range) in self.performance.iter().enumerate() {
            if let Some(range) = range {
                let _ = writeln!(
                    out,
                    "Performance round {}: {} - {} (assumes {} minutes)",
                    round_label(round),
                    format_time(range.earliest),
                    format_time(range.latest + duration),
                    duration.num_minutes()
                );
            }
        }
        out
    }
}
