//! Performance match index.
//!
//! Groups every performance slot of every team by `(time, table color)`.
//! A key with two entries is a match; one entry is a bye; more than two is
//! an over-booked table, reported while the index is built.
//!
//! # Boundary-crossing pairings
//! With an odd number of teams, a team's round 1 can be played against
//! another team's round 2. Each entry therefore carries its own round
//! number, and opponent lookups return the opponent's round as well.

use chrono::NaiveTime;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{
    format_time, ConstraintViolation, RuleId, ScheduleRecord, TableSide, TeamNumber,
};
use crate::report::ViolationReport;

/// A table at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    pub time: NaiveTime,
    pub table: String,
}

impl MatchKey {
    pub fn new(time: NaiveTime, table: impl Into<String>) -> Self {
        Self {
            time,
            table: table.into(),
        }
    }
}

/// One team's slot within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchParticipant {
    pub team: TeamNumber,
    /// The team's own 0-based round index for this slot.
    pub round: usize,
    pub side: TableSide,
}

/// Result of an opponent lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    /// Exactly one other team shares the table.
    Team(MatchParticipant),
    /// Nobody else is at the table.
    Bye,
    /// The table is over-booked (or a team is booked twice), so no opponent
    /// can be named.
    Unreliable,
}

impl Opponent {
    /// The opponent, if one can be named.
    pub fn participant(self) -> Option<MatchParticipant> {
        match self {
            Self::Team(p) => Some(p),
            Self::Bye | Self::Unreliable => None,
        }
    }

    pub fn team(self) -> Option<TeamNumber> {
        self.participant().map(|p| p.team)
    }
}

/// Lookup from `(time, table)` to the teams performing there.
///
/// Built once per verification run; read-only afterwards and safe to share
/// between worker threads.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    matches: BTreeMap<MatchKey, Vec<MatchParticipant>>,
    /// team → key of each of its rounds.
    slots: HashMap<TeamNumber, Vec<MatchKey>>,
}

impl MatchIndex {
    /// Indexes the first `rounds` performance slots of each record.
    ///
    /// Every key with more than two participants is reported to `report` as
    /// a hard [`RuleId::TableCapacity`] violation. Building never stops early.
    pub fn build<'a, I>(records: I, rounds: usize, report: &mut ViolationReport) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleRecord>,
    {
        let mut index = Self::default();
        for record in records {
            let team = record.team_number();
            let keys = index.slots.entry(team).or_default();
            for (round, slot) in record.performances().iter().take(rounds).enumerate() {
                let key = MatchKey::new(slot.time, slot.table.clone());
                keys.push(key.clone());
                index.matches.entry(key).or_default().push(MatchParticipant {
                    team,
                    round,
                    side: slot.side,
                });
            }
        }

        let mut over_booked = 0usize;
        for (key, participants) in index.over_booked() {
            over_booked += 1;
            let teams: Vec<TeamNumber> = participants.iter().map(|p| p.team).collect();
            let message = format!(
                "Too many teams competing on table {} at {}. Teams: {:?}",
                key.table,
                format_time(key.time),
                teams
            );
            let mut violation =
                ConstraintViolation::hard(RuleId::TableCapacity, message).with_time(key.time);
            violation.teams = teams;
            report.push(violation);
        }

        tracing::debug!(
            teams = index.slots.len(),
            matches = index.matches.len(),
            over_booked,
            "match index built"
        );
        index
    }

    /// Key of a team's round.
    ///
    /// # Panics
    /// If the team or round was never indexed. Callers only query records
    /// they passed to [`MatchIndex::build`].
    pub fn key(&self, team: TeamNumber, round: usize) -> &MatchKey {
        match self.slots.get(&team).and_then(|keys| keys.get(round)) {
            Some(key) => key,
            None => panic!("match index has no entry for team {team} round {round}"),
        }
    }

    /// Entries at a key, in indexing order. Empty if nobody plays there.
    pub fn participants(&self, key: &MatchKey) -> &[MatchParticipant] {
        self.matches.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A team's own entry for a round.
    pub fn participant(&self, team: TeamNumber, round: usize) -> MatchParticipant {
        let key = self.key(team, round);
        match self
            .participants(key)
            .iter()
            .find(|p| p.team == team && p.round == round)
        {
            Some(p) => *p,
            None => panic!("match index is inconsistent for team {team} round {round}"),
        }
    }

    /// The team facing `team` in `round`.
    pub fn opponent(&self, team: TeamNumber, round: usize) -> Opponent {
        match self.participants(self.key(team, round)) {
            [_] => Opponent::Bye,
            [a, b] => {
                let other = if a.team == team && a.round == round { b } else { a };
                if other.team == team {
                    Opponent::Unreliable
                } else {
                    Opponent::Team(*other)
                }
            }
            _ => Opponent::Unreliable,
        }
    }

    /// The opponent's own round number for `team`'s `round`.
    pub fn opponent_round(&self, team: TeamNumber, round: usize) -> Option<usize> {
        self.opponent(team, round).participant().map(|p| p.round)
    }

    /// Whether the match for `team`'s `round` pairs it with a different
    /// round of its opponent.
    pub fn crosses_round_boundary(&self, team: TeamNumber, round: usize) -> bool {
        self.opponent_round(team, round)
            .is_some_and(|opponent_round| opponent_round != round)
    }

    /// Whether `team`'s `round` is a regular match against the same round of
    /// the opponent. False for byes and unreliable entries as well as for
    /// boundary-crossing matches.
    pub fn plays_own_round(&self, team: TeamNumber, round: usize) -> bool {
        self.opponent_round(team, round) == Some(round)
    }

    /// Keys with more than two participants.
    pub fn over_booked(&self) -> impl Iterator<Item = (&MatchKey, &[MatchParticipant])> {
        self.entries().filter(|(_, p)| p.len() > 2)
    }

    /// All keys in time, then table order.
    pub fn entries(&self) -> impl Iterator<Item = (&MatchKey, &[MatchParticipant])> {
        self.matches.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Distinct table colors in use.
    pub fn table_colors(&self) -> BTreeSet<&str> {
        self.matches.keys().map(|k| k.table.as_str()).collect()
    }

    /// Number of indexed teams.
    pub fn team_count(&self) -> usize {
        self.slots.len()
    }

    /// The team that `team` must stay on for after its `round`, if any.
    ///
    /// Looks for the earliest later entry on the same table, opposite side,
    /// same round number. If that team has no opponent, `team` should stay
    /// and play it to even up the table.
    pub fn needs_to_stay(&self, team: TeamNumber, round: usize) -> Option<TeamNumber> {
        let key = self.key(team, round);
        let other_side = self.participant(team, round).side.opposite();
        let (next_key, next) = self
            .entries()
            .filter(|(k, _)| k.table == key.table && k.time > key.time)
            .find_map(|(k, participants)| {
                participants
                    .iter()
                    .find(|p| p.side == other_side && p.round == round)
                    .map(|p| (k, *p))
            })?;
        match self.participants(next_key) {
            [_] => Some(next.team),
            _ => None,
        }
    }
}
