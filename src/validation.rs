//! Input validation for schedule records.
//!
//! Checks the shape of the records before any rule runs. Detects:
//! - Duplicate team numbers (the document is malformed, the run aborts)
//! - Records with the wrong number of performance rounds
//! - Performance slots without a table color
//! - Records without a judging group
//!
//! Records with shape errors are set aside; every other record is verified.

use std::collections::HashSet;

use crate::error::{RecordError, ScheduleError};
use crate::models::{round_label, ScheduleRecord};

/// Outcome of input validation.
#[derive(Debug, Clone)]
pub struct CheckedInput<'a> {
    /// Records fit for verification, in input order.
    pub accepted: Vec<&'a ScheduleRecord>,
    /// Problems with the records that were set aside.
    pub rejected: Vec<RecordError>,
}

/// Validates the record set for a tournament with `rounds` performance rounds.
///
/// # Returns
/// `Err` if the document as a whole is malformed, otherwise the split of
/// records into accepted and rejected.
pub fn validate_records(
    records: &[ScheduleRecord],
    rounds: usize,
) -> Result<CheckedInput<'_>, ScheduleError> {
    let mut team_numbers = HashSet::new();
    for r in records {
        if !team_numbers.insert(r.team_number()) {
            return Err(ScheduleError::DuplicateTeam(r.team_number()));
        }
    }

    let mut accepted = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for r in records {
        match check_record(r, rounds) {
            Ok(()) => accepted.push(r),
            Err(e) => {
                tracing::warn!(team = r.team_number(), error = %e, "record excluded from verification");
                rejected.push(e);
            }
        }
    }

    Ok(CheckedInput { accepted, rejected })
}

fn check_record(record: &ScheduleRecord, rounds: usize) -> Result<(), RecordError> {
    let team = record.team_number();
    if record.round_count() != rounds {
        return Err(RecordError::RoundCountMismatch {
            team,
            expected: rounds,
            found: record.round_count(),
        });
    }
    if let Some(round) = record
        .performances()
        .iter()
        .position(|p| p.table.trim().is_empty())
    {
        return Err(RecordError::MissingTableColor {
            team,
            round: round_label(round),
        });
    }
    if record.judging_group().trim().is_empty() {
        return Err(RecordError::MissingJudgingGroup { team });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PerformanceSlot, TableSide};
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn record(team: i32, rounds: usize) -> ScheduleRecord {
        (0..rounds).fold(ScheduleRecord::new(team, "A"), |r, i| {
            r.with_performance(PerformanceSlot::new(
                t(9 + i as u32, 0),
                "Green",
                TableSide::One,
            ))
        })
    }

    #[test]
    fn test_valid_input() {
        let records = vec![record(1, 3), record(2, 3)];
        let checked = validate_records(&records, 3).unwrap();
        assert_eq!(checked.accepted.len(), 2);
        assert!(checked.rejected.is_empty());
    }

    #[test]
    fn test_duplicate_team_aborts() {
        let records = vec![record(1, 3), record(1, 3)];
        let err = validate_records(&records, 3).unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateTeam(1)));
    }

    #[test]
    fn test_round_count_mismatch_excludes_record() {
        let records = vec![record(1, 3), record(2, 2), record(3, 3)];
        let checked = validate_records(&records, 3).unwrap();
        let kept: Vec<i32> = checked.accepted.iter().map(|r| r.team_number()).collect();
        assert_eq!(kept, vec![1, 3]);
        assert_eq!(
            checked.rejected,
            vec![RecordError::RoundCountMismatch {
                team: 2,
                expected: 3,
                found: 2
            }]
        );
    }

    #[test]
    fn test_missing_table_color() {
        let r = ScheduleRecord::new(7, "A")
            .with_performance(PerformanceSlot::new(t(9, 0), "Green", TableSide::One))
            .with_performance(PerformanceSlot::new(t(10, 0), " ", TableSide::One));
        let records = vec![r];
        let checked = validate_records(&records, 2).unwrap();
        assert!(checked.accepted.is_empty());
        assert_eq!(
            checked.rejected,
            vec![RecordError::MissingTableColor { team: 7, round: 2 }]
        );
        assert_eq!(checked.rejected[0].team(), 7);
    }

    #[test]
    fn test_missing_judging_group() {
        let r = ScheduleRecord::new(8, "")
            .with_performance(PerformanceSlot::new(t(9, 0), "Green", TableSide::One));
        let records = vec![r];
        let checked = validate_records(&records, 1).unwrap();
        assert_eq!(
            checked.rejected,
            vec![RecordError::MissingJudgingGroup { team: 8 }]
        );
    }

    #[test]
    fn test_empty_schedule() {
        let checked = validate_records(&[], 3).unwrap();
        assert!(checked.accepted.is_empty());
        assert!(checked.rejected.is_empty());
    }
}
