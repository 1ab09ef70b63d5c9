//! Rules checked across the whole schedule.
//!
//! These look at tables and judges rather than teams: how many teams use a
//! resource at once, and whether back-to-back uses of a resource overlap.
//! Each offending time is reported once, not once per team.

use chrono::{NaiveTime, TimeDelta};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::VerifierConfig;
use crate::models::{format_time, ConstraintViolation, RuleId, ScheduleRecord, TableSide, TeamNumber};
use crate::report::ViolationReport;

/// No more teams performing at one time than there are table sides.
pub(crate) fn check_performance_capacity(
    records: &[&ScheduleRecord],
    table_colors: usize,
    report: &mut ViolationReport,
) {
    let mut teams_at_time: BTreeMap<NaiveTime, BTreeSet<TeamNumber>> = BTreeMap::new();
    for record in records {
        for performance in record.performances() {
            teams_at_time
                .entry(performance.time)
                .or_default()
                .insert(record.team_number());
        }
    }

    let limit = table_colors * 2;
    for (time, teams) in teams_at_time {
        if teams.len() > limit {
            let mut violation = ConstraintViolation::hard(
                RuleId::PerformanceCapacity,
                format!(
                    "There are too many teams in performance at {}: {} teams for {limit} table sides",
                    format_time(time),
                    teams.len()
                ),
            )
            .with_time(time);
            violation.teams = teams.into_iter().collect();
            report.push(violation);
        }
    }
}

/// One team per judge at a time, and no more teams in a category at once
/// than there are judges.
pub(crate) fn check_subjective_capacity(
    records: &[&ScheduleRecord],
    judges: usize,
    report: &mut ViolationReport,
) {
    // category → time → judge → teams
    let mut sessions: BTreeMap<&str, BTreeMap<NaiveTime, BTreeMap<&str, Vec<TeamNumber>>>> =
        BTreeMap::new();
    for record in records {
        for (category, time) in record.subjective_times() {
            sessions
                .entry(category.as_str())
                .or_default()
                .entry(*time)
                .or_default()
                .entry(record.judging_group())
                .or_default()
                .push(record.team_number());
        }
    }

    for (category, times) in sessions {
        for (time, by_judge) in times {
            let total: usize = by_judge.values().map(Vec::len).sum();
            if total > judges {
                let mut violation = ConstraintViolation::hard(
                    RuleId::SubjectiveCapacity,
                    format!(
                        "There are too many teams in {category} at {}: {total} teams for {judges} judges",
                        format_time(time)
                    ),
                )
                .with_time(time);
                violation.teams = by_judge.values().flatten().copied().collect();
                violation.teams.sort_unstable();
                report.push(violation);
            }

            for (judge, teams) in by_judge {
                if teams.len() > 1 {
                    let mut violation = ConstraintViolation::hard(
                        RuleId::JudgeDoubleBooked,
                        format!(
                            "{category} judge {judge} cannot see more than one team at {}",
                            format_time(time)
                        ),
                    )
                    .with_time(time);
                    violation.teams = teams;
                    report.push(violation);
                }
            }
        }
    }
}

/// Back-to-back sessions of one judge, or runs on one table side, must not
/// overlap.
pub(crate) fn check_overlaps(
    records: &[&ScheduleRecord],
    config: &VerifierConfig,
    report: &mut ViolationReport,
) {
    // category → judge → session starts
    let mut judges: BTreeMap<&str, BTreeMap<&str, BTreeSet<NaiveTime>>> = BTreeMap::new();
    // (table, side) → run starts
    let mut tables: BTreeMap<(&str, TableSide), BTreeSet<NaiveTime>> = BTreeMap::new();
    for record in records {
        for (category, time) in record.subjective_times() {
            judges
                .entry(category.as_str())
                .or_default()
                .entry(record.judging_group())
                .or_default()
                .insert(*time);
        }
        for performance in record.performances() {
            tables
                .entry((performance.table.as_str(), performance.side))
                .or_default()
                .insert(performance.time);
        }
    }

    for (category, by_judge) in judges {
        let duration = config.subjective_duration(category);
        for (judge, times) in by_judge {
            for (prev, current) in overlapping(&times, duration) {
                report.push(
                    ConstraintViolation::hard(
                        RuleId::JudgeOverlap,
                        format!(
                            "Overlap in {category} for judge {judge} between {} and {}",
                            format_time(prev),
                            format_time(current)
                        ),
                    )
                    .with_times([prev, current]),
                );
            }
        }
    }

    let duration = config.performance_duration();
    for ((table, side), times) in tables {
        for (prev, current) in overlapping(&times, duration) {
            report.push(
                ConstraintViolation::hard(
                    RuleId::TableOverlap,
                    format!(
                        "Overlap in performance for table {table} {side} between {} and {}",
                        format_time(prev),
                        format_time(current)
                    ),
                )
                .with_times([prev, current]),
            );
        }
    }
}

/// Consecutive start pairs closer together than `duration`.
fn overlapping(times: &BTreeSet<NaiveTime>, duration: TimeDelta) -> Vec<(NaiveTime, NaiveTime)> {
    times
        .iter()
        .zip(times.iter().skip(1))
        .filter(|(prev, current)| current.signed_duration_since(**prev) < duration)
        .map(|(prev, current)| (*prev, *current))
        .collect()
}
