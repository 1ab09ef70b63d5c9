//! Schedule verification.
//!
//! A run validates the records, builds the [`MatchIndex`] once, checks every
//! team against the per-team rules, then checks the schedule-wide resource
//! rules and computes the summary.
//!
//! # Reporting
//! Checks never stop at the first problem. Every violation of every team is
//! collected, so one run shows the complete list.
//!
//! # Concurrency
//! Per-team checks only read the records and the index. With more than one
//! worker they run on scoped threads over contiguous chunks of teams; each
//! worker fills its own report and the reports are merged in chunk order,
//! so the output does not depend on the worker count.

mod resource_rules;
mod team_rules;

use std::collections::BTreeSet;
use std::thread;

use crate::config::VerifierConfig;
use crate::error::{RecordError, ScheduleError};
use crate::index::MatchIndex;
use crate::models::ScheduleRecord;
use crate::report::ViolationReport;
use crate::summary::ScheduleSummary;
use crate::validation::validate_records;

use team_rules::TeamRules;

/// Result of a verification run.
#[derive(Debug, Clone)]
pub struct Verification {
    /// Every violation found.
    pub violations: ViolationReport,
    /// Earliest and latest start of each activity.
    pub summary: ScheduleSummary,
    /// Records excluded from verification because of their shape.
    pub rejected: Vec<RecordError>,
}

impl Verification {
    /// Whether the schedule has no hard violations and no rejected records.
    pub fn is_feasible(&self) -> bool {
        self.rejected.is_empty() && self.violations.is_feasible()
    }
}

/// Checks schedules against a fixed configuration.
#[derive(Debug, Clone)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    /// Creates a verifier after validating the configuration.
    pub fn new(config: VerifierConfig) -> Result<Self, ScheduleError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verifies a complete schedule.
    ///
    /// # Errors
    /// [`ScheduleError::DuplicateTeam`] if two records share a team number.
    /// Problems with individual records are returned in
    /// [`Verification::rejected`] instead.
    pub fn verify(&self, records: &[ScheduleRecord]) -> Result<Verification, ScheduleError> {
        let rounds = self.config.number_of_performance_rounds;
        let checked = validate_records(records, rounds)?;
        let accepted = checked.accepted;

        let mut violations = ViolationReport::new();
        let index = MatchIndex::build(accepted.iter().copied(), rounds, &mut violations);

        violations.merge(self.check_teams(&accepted, &index));

        let table_colors = self
            .config
            .number_of_table_colors
            .unwrap_or_else(|| index.table_colors().len());
        let judges = self.config.number_of_judges_per_category.unwrap_or_else(|| {
            accepted
                .iter()
                .map(|r| r.judging_group())
                .collect::<BTreeSet<_>>()
                .len()
        });
        resource_rules::check_performance_capacity(&accepted, table_colors, &mut violations);
        resource_rules::check_subjective_capacity(&accepted, judges, &mut violations);
        resource_rules::check_overlaps(&accepted, &self.config, &mut violations);

        let summary = ScheduleSummary::compute(accepted.iter().copied(), &index);

        tracing::info!(
            teams = accepted.len(),
            rejected = checked.rejected.len(),
            hard = violations.hard().count(),
            soft = violations.soft().count(),
            "schedule verified"
        );

        Ok(Verification {
            violations,
            summary,
            rejected: checked.rejected,
        })
    }

    fn check_teams(&self, records: &[&ScheduleRecord], index: &MatchIndex) -> ViolationReport {
        let rules = TeamRules {
            config: &self.config,
            index,
        };
        let workers = self.config.workers.min(records.len());
        if workers <= 1 {
            let mut report = ViolationReport::new();
            for record in records {
                rules.check(record, &mut report);
            }
            return report;
        }

        let chunk_size = records.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = records
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        let mut report = ViolationReport::new();
                        for record in chunk {
                            rules.check(record, &mut report);
                        }
                        report
                    })
                })
                .collect();

            let mut merged = ViolationReport::new();
            for handle in handles {
                match handle.join() {
                    Ok(report) => merged.merge(report),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            merged
        })
    }
}
