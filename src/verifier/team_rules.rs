//! Rules checked for one team at a time.
//!
//! | Rule | Severity |
//! |------|----------|
//! | Subjective sessions far enough apart | Hard |
//! | Consecutive performance rounds far enough apart | Hard if overlapping, soft otherwise |
//! | Subjective sessions and performance rounds far enough apart | Hard |
//! | Never the same opponent twice | Hard |
//! | Opponent on the other side of the table | Hard |
//! | Never the same table side twice | Soft |
//! | An opponent in every round | Soft |
//!
//! The checks only read the record and the match index, so teams can be
//! checked on different threads.

use chrono::{NaiveTime, TimeDelta};
use std::collections::{BTreeMap, HashMap};

use crate::config::VerifierConfig;
use crate::index::{MatchIndex, Opponent};
use crate::models::{
    format_time, round_label, ConstraintViolation, RuleId, ScheduleRecord, TableSide, TeamNumber,
};
use crate::report::ViolationReport;

/// Shared read-only inputs of the per-team checks.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TeamRules<'a> {
    pub config: &'a VerifierConfig,
    pub index: &'a MatchIndex,
}

/// How two activities of one team relate in time.
enum Spacing {
    Ok,
    /// The later one starts before the earlier one ends.
    Overlap,
    /// The later one starts before the change time has passed.
    TooClose,
}

fn spacing(earlier: NaiveTime, later: NaiveTime, duration: TimeDelta, change: TimeDelta) -> Spacing {
    let gap = later.signed_duration_since(earlier);
    if gap < duration {
        Spacing::Overlap
    } else if gap < duration + change {
        Spacing::TooClose
    } else {
        Spacing::Ok
    }
}

impl TeamRules<'_> {
    /// Runs every per-team rule for `record`.
    pub fn check(&self, record: &ScheduleRecord, report: &mut ViolationReport) {
        tracing::trace!(team = record.team_number(), "checking team");
        self.check_subjective_separation(record, report);
        self.check_performance_spacing(record, report);
        self.check_subjective_vs_performance(record, report);
        self.check_opponents(record, report);
    }

    fn check_subjective_separation(&self, record: &ScheduleRecord, report: &mut ViolationReport) {
        let team = record.team_number();
        let sessions: Vec<(&str, NaiveTime)> = record
            .subjective_times()
            .iter()
            .map(|(name, time)| (name.as_str(), *time))
            .collect();

        for (i, &a) in sessions.iter().enumerate() {
            for &b in &sessions[i + 1..] {
                let (first, second) = if b.1 < a.1 { (b, a) } else { (a, b) };
                let duration = self.config.subjective_duration(first.0);
                let message = match spacing(first.1, second.1, duration, self.config.change_time())
                {
                    Spacing::Ok => continue,
                    Spacing::Overlap => format!(
                        "Team {team} is still in {} when they need to start {}",
                        first.0, second.0
                    ),
                    Spacing::TooClose => format!(
                        "Team {team} doesn't have enough time between {} and {} (need {})",
                        first.0, second.0, self.config.change_time_minutes
                    ),
                };
                report.push(
                    ConstraintViolation::hard(RuleId::SubjectiveSeparation, message)
                        .with_team(team)
                        .with_times([first.1, second.1]),
                );
            }
        }
    }

    /// The change time required between `round` and the round after it.
    ///
    /// Only the round 1 → 2 transition can use the special change time, and
    /// only when one of those two matches is not a regular match against the
    /// same round of an opponent (a bye, or a boundary-crossing pairing).
    fn performance_change_time(&self, team: TeamNumber, round: usize) -> TimeDelta {
        if round == 0
            && (!self.index.plays_own_round(team, 0) || !self.index.plays_own_round(team, 1))
        {
            self.config.special_performance_change_time()
        } else {
            self.config.performance_change_time()
        }
    }

    /// Consecutive rounds must leave the performance duration plus the
    /// change time between starts.
    ///
    /// Too little change time is SOFT. A round that starts before the
    /// previous run has ended is HARD instead: the team would be at two
    /// tables at once.
    fn check_performance_spacing(&self, record: &ScheduleRecord, report: &mut ViolationReport) {
        let team = record.team_number();
        let performances = record.performances();
        for (prev, pair) in performances.windows(2).enumerate() {
            let (earlier, later) = (&pair[0], &pair[1]);
            let change = self.performance_change_time(team, prev);
            let times = [earlier.time, later.time];
            let violation = match spacing(
                earlier.time,
                later.time,
                self.config.performance_duration(),
                change,
            ) {
                Spacing::Ok => continue,
                Spacing::Overlap => ConstraintViolation::hard(
                    RuleId::PerformanceSpacing,
                    format!(
                        "Team {team} is still in performance {} when they are to start performance {}: {} - {}",
                        round_label(prev),
                        round_label(prev + 1),
                        format_time(earlier.time),
                        format_time(later.time)
                    ),
                ),
                Spacing::TooClose => ConstraintViolation::soft(
                    RuleId::PerformanceSpacing,
                    format!(
                        "Team {team} doesn't have enough time ({} minutes) between performance {} and performance {}: {} - {}",
                        change.num_minutes(),
                        round_label(prev),
                        round_label(prev + 1),
                        format_time(earlier.time),
                        format_time(later.time)
                    ),
                ),
            };
            report.push(violation.with_team(team).with_times(times));
        }
    }

    fn check_subjective_vs_performance(
        &self,
        record: &ScheduleRecord,
        report: &mut ViolationReport,
    ) {
        let team = record.team_number();
        let change = self.config.change_time();
        for (round, performance) in record.performances().iter().enumerate() {
            let label = round_label(round);
            for (category, &session) in record.subjective_times() {
                let message = if session < performance.time {
                    let duration = self.config.subjective_duration(category);
                    match spacing(session, performance.time, duration, change) {
                        Spacing::Ok => continue,
                        Spacing::Overlap => format!(
                            "Team {team} will be in {category} when performance round {label} starts"
                        ),
                        Spacing::TooClose => format!(
                            "Team {team} doesn't have enough time between {category} and performance round {label} (need {})",
                            self.config.change_time_minutes
                        ),
                    }
                } else {
                    let duration = self.config.performance_duration();
                    match spacing(performance.time, session, duration, change) {
                        Spacing::Ok => continue,
                        Spacing::Overlap => format!(
                            "Team {team} will be in performance round {label} when {category} starts"
                        ),
                        Spacing::TooClose => format!(
                            "Team {team} doesn't have enough time between performance round {label} and {category} (need {})",
                            self.config.change_time_minutes
                        ),
                    }
                };
                report.push(
                    ConstraintViolation::hard(RuleId::SubjectivePerformanceSeparation, message)
                        .with_team(team)
                        .with_times([session, performance.time]),
                );
            }
        }
    }

    fn check_opponents(&self, record: &ScheduleRecord, report: &mut ViolationReport) {
        let team = record.team_number();
        let mut table_sides: HashMap<(&str, TableSide), usize> = HashMap::new();
        let mut opponents: BTreeMap<TeamNumber, Vec<usize>> = BTreeMap::new();

        for (round, performance) in record.performances().iter().enumerate() {
            let label = round_label(round);
            let opponent = match self.index.opponent(team, round) {
                Opponent::Team(opponent) => opponent,
                Opponent::Bye => {
                    report.push(
                        ConstraintViolation::soft(
                            RuleId::NoOpponent,
                            format!("Team {team} has no opponent for round {label}"),
                        )
                        .with_team(team)
                        .with_time(performance.time),
                    );
                    continue;
                }
                // Over-booked key (reported as TableCapacity) or the team
                // booked twice at one key; no opponent can be named.
                Opponent::Unreliable => continue,
            };

            if opponent.side == performance.side && team < opponent.team {
                report.push(
                    ConstraintViolation::hard(
                        RuleId::SameTableSide,
                        format!(
                            "Team {team} and team {} are both on table {} side {} at the same time for round {label}",
                            opponent.team, performance.table, performance.side
                        ),
                    )
                    .with_team(team)
                    .with_team(opponent.team)
                    .with_time(performance.time),
                );
            }

            let side_key = (performance.table.as_str(), performance.side);
            if let Some(&first) = table_sides.get(&side_key) {
                report.push(
                    ConstraintViolation::soft(
                        RuleId::RepeatTableSide,
                        format!(
                            "Team {team} is competing on {} {} more than once: rounds {}, {label}",
                            performance.table,
                            performance.side,
                            round_label(first)
                        ),
                    )
                    .with_team(team)
                    .with_times([record.performances()[first].time, performance.time]),
                );
            } else {
                table_sides.insert(side_key, round);
            }

            opponents.entry(opponent.team).or_default().push(round);
        }

        // Each meeting is visible from both teams; the lower number reports it.
        for (opponent, rounds) in opponents {
            if rounds.len() < 2 || opponent < team {
                continue;
            }
            let labels: Vec<String> = rounds.iter().map(|r| round_label(*r).to_string()).collect();
            report.push(
                ConstraintViolation::hard(
                    RuleId::RepeatOpponent,
                    format!(
                        "Team {team} competes against team {opponent} more than once, rounds: {}",
                        labels.join(", ")
                    ),
                )
                .with_team(team)
                .with_team(opponent)
                .with_times(rounds.iter().map(|r| record.performances()[*r].time)),
            );
        }
    }
}
