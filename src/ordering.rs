//! Canonical orderings of schedule records.
//!
//! Every comparator falls back to team number, so each is a total order and
//! sorted output is the same on every run.

use std::cmp::Ordering;

use crate::models::{PerformanceSlot, ScheduleRecord};

/// By team number.
pub fn by_team(a: &ScheduleRecord, b: &ScheduleRecord) -> Ordering {
    a.team_number().cmp(&b.team_number())
}

/// By division, then judging group, then session time in `category`.
///
/// Teams without a session in the category sort first within their judge.
pub fn by_division_judge_time(
    category: &str,
) -> impl Fn(&ScheduleRecord, &ScheduleRecord) -> Ordering + '_ {
    move |a, b| {
        a.division()
            .cmp(b.division())
            .then_with(|| a.judging_group().cmp(b.judging_group()))
            .then_with(|| a.subjective_time(category).cmp(&b.subjective_time(category)))
            .then_with(|| by_team(a, b))
    }
}

/// By session time in `category`, then division, then judging group.
pub fn by_subjective_time(
    category: &str,
) -> impl Fn(&ScheduleRecord, &ScheduleRecord) -> Ordering + '_ {
    move |a, b| {
        a.subjective_time(category)
            .cmp(&b.subjective_time(category))
            .then_with(|| a.division().cmp(b.division()))
            .then_with(|| a.judging_group().cmp(b.judging_group()))
            .then_with(|| by_team(a, b))
    }
}

/// By time, then table color, then side of the given 0-based round.
pub fn by_performance(round: usize) -> impl Fn(&ScheduleRecord, &ScheduleRecord) -> Ordering {
    move |a, b| {
        let key = |r: &ScheduleRecord| {
            r.performance(round)
                .map(|p| (p.time, p.table.clone(), p.side))
        };
        key(a).cmp(&key(b)).then_with(|| by_team(a, b))
    }
}

/// Teams judged in `category`, ordered by division, judge and time.
pub fn subjective_schedule<'a>(
    records: &'a [ScheduleRecord],
    category: &str,
) -> Vec<&'a ScheduleRecord> {
    let mut rows: Vec<&ScheduleRecord> = records
        .iter()
        .filter(|r| r.subjective_time(category).is_some())
        .collect();
    let cmp = by_division_judge_time(category);
    rows.sort_by(|a, b| cmp(a, b));
    rows
}

/// Table-by-table schedule of one 0-based round.
pub fn performance_schedule(
    records: &[ScheduleRecord],
    round: usize,
) -> Vec<(&ScheduleRecord, &PerformanceSlot)> {
    let mut rows: Vec<(&ScheduleRecord, &PerformanceSlot)> = records
        .iter()
        .filter_map(|r| r.performance(round).map(|p| (r, p)))
        .collect();
    rows.sort_by(|(ra, a), (rb, b)| {
        a.time
            .cmp(&b.time)
            .then_with(|| a.table.cmp(&b.table))
            .then_with(|| a.side.cmp(&b.side))
            .then_with(|| by_team(ra, rb))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableSide;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn teams(rows: &[&ScheduleRecord]) -> Vec<i32> {
        rows.iter().map(|r| r.team_number()).collect()
    }

    fn sample() -> Vec<ScheduleRecord> {
        vec![
            ScheduleRecord::new(4, "B")
                .with_division("D1")
                .with_subjective("Technical", t(9, 0))
                .with_performance(PerformanceSlot::new(t(10, 0), "Red", TableSide::One)),
            ScheduleRecord::new(3, "A")
                .with_division("D2")
                .with_subjective("Technical", t(8, 0))
                .with_performance(PerformanceSlot::new(t(10, 0), "Green", TableSide::Two)),
            ScheduleRecord::new(2, "A")
                .with_division("D1")
                .with_subjective("Technical", t(9, 30))
                .with_performance(PerformanceSlot::new(t(10, 0), "Green", TableSide::One)),
            ScheduleRecord::new(1, "A")
                .with_division("D1")
                .with_subjective("Technical", t(9, 0))
                .with_performance(PerformanceSlot::new(t(9, 0), "Red", TableSide::Two)),
        ]
    }

    #[test]
    fn test_by_division_judge_time() {
        let records = sample();
        let rows = subjective_schedule(&records, "Technical");
        // D1/A: 1 (9:00), 2 (9:30); D1/B: 4; D2/A: 3
        assert_eq!(teams(&rows), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_by_subjective_time() {
        let mut records = sample();
        records.sort_by(by_subjective_time("Technical"));
        let rows: Vec<&ScheduleRecord> = records.iter().collect();
        // 8:00 (3), 9:00 D1/A (1), 9:00 D1/B (4), 9:30 (2)
        assert_eq!(teams(&rows), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_performance_schedule() {
        let records = sample();
        let rows = performance_schedule(&records, 0);
        let order: Vec<i32> = rows.iter().map(|(r, _)| r.team_number()).collect();
        // 9:00 Red (1); 10:00 Green 1 (2), Green 2 (3), Red 1 (4)
        assert_eq!(order, vec![1, 2, 3, 4]);
        assert!(performance_schedule(&records, 1).is_empty());
    }

    #[test]
    fn test_ties_broken_by_team_number() {
        let mut records = vec![
            ScheduleRecord::new(9, "A").with_subjective("Technical", t(9, 0)),
            ScheduleRecord::new(5, "A").with_subjective("Technical", t(9, 0)),
        ];
        records.sort_by(by_division_judge_time("Technical"));
        assert_eq!(records[0].team_number(), 5);

        records.sort_by(by_performance(0));
        assert_eq!(records[0].team_number(), 5);
    }

    #[test]
    fn test_missing_session_sorts_first() {
        let mut records = vec![
            ScheduleRecord::new(1, "A").with_subjective("Technical", t(9, 0)),
            ScheduleRecord::new(2, "A"),
        ];
        records.sort_by(by_division_judge_time("Technical"));
        assert_eq!(records[0].team_number(), 2);
    }
}
