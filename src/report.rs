//! Violation collection.
//!
//! [`ViolationReport`] is an append-only sink. Each worker of a verification
//! run fills its own report; the run merges them at the end, so no locking
//! is involved.

use serde::{Deserialize, Serialize};

use crate::models::{ConstraintViolation, RuleId, Severity, TeamNumber};

/// Ordered list of violations found by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    violations: Vec<ConstraintViolation>,
}

impl ViolationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    /// Appends all violations of another report, keeping their order.
    pub fn merge(&mut self, other: ViolationReport) {
        self.violations.extend(other.violations);
    }

    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<ConstraintViolation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether no hard violation was found.
    pub fn is_feasible(&self) -> bool {
        !self.violations.iter().any(ConstraintViolation::is_hard)
    }

    /// Violations of one severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ConstraintViolation> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }

    pub fn hard(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.with_severity(Severity::Hard)
    }

    pub fn soft(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.with_severity(Severity::Soft)
    }

    /// Violations raised by one rule.
    pub fn by_rule(&self, rule: RuleId) -> impl Iterator<Item = &ConstraintViolation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }

    /// Number of violations raised by one rule.
    pub fn count(&self, rule: RuleId) -> usize {
        self.by_rule(rule).count()
    }

    /// Violations naming a team.
    pub fn for_team(&self, team: TeamNumber) -> impl Iterator<Item = &ConstraintViolation> {
        self.violations.iter().filter(move |v| v.involves(team))
    }

    /// Sorts into the canonical order (severity, rule, teams, times, message).
    pub fn sort(&mut self) {
        self.violations.sort();
    }

    /// Returns a canonically sorted copy.
    pub fn sorted(&self) -> Self {
        let mut copy = self.clone();
        copy.sort();
        copy
    }
}

impl Extend<ConstraintViolation> for ViolationReport {
    fn extend<I: IntoIterator<Item = ConstraintViolation>>(&mut self, iter: I) {
        self.violations.extend(iter);
    }
}

impl FromIterator<ConstraintViolation> for ViolationReport {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ViolationReport {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}
