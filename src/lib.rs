//! Constraint verification for robotics tournament schedules.
//!
//! Takes a fully time-slotted schedule (one record per team, with subjective
//! judging sessions and head-to-head performance rounds) and reports every
//! timing, capacity and pairing rule it breaks, plus a summary of when each
//! activity runs. Generating schedules is out of scope.
//!
//! # Modules
//!
//! - **`models`**: `ScheduleRecord`, `PerformanceSlot`, `ConstraintViolation`
//! - **`config`**: `VerifierConfig`, durations and counts
//! - **`validation`**: input-shape checks before verification
//! - **`index`**: `MatchIndex`, `(time, table)` → teams, opponent lookups
//! - **`verifier`**: `Verifier`, the rule engine
//! - **`report`**: `ViolationReport`, collected findings
//! - **`summary`**: `ScheduleSummary`, min / max start per activity
//! - **`ordering`**: stable orderings for per-activity schedules
//!
//! # Example
//!
//! ```
//! use chrono::NaiveTime;
//! use tournament_schedule::{PerformanceSlot, ScheduleRecord, TableSide, Verifier, VerifierConfig};
//!
//! let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! let records = vec![
//!     ScheduleRecord::new(1, "A").with_performance(PerformanceSlot::new(at(9, 0), "Green", TableSide::One)),
//!     ScheduleRecord::new(2, "B").with_performance(PerformanceSlot::new(at(9, 0), "Green", TableSide::Two)),
//! ];
//! let verifier = Verifier::new(VerifierConfig::new().with_rounds(1)).unwrap();
//! let result = verifier.verify(&records).unwrap();
//! assert!(result.is_feasible());
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod ordering;
pub mod report;
pub mod summary;
pub mod validation;
pub mod verifier;

pub use config::VerifierConfig;
pub use error::{RecordError, ScheduleError};
pub use index::{MatchIndex, MatchKey, MatchParticipant, Opponent};
pub use models::{
    ConstraintViolation, PerformanceSlot, RuleId, ScheduleRecord, Severity, TableSide, TeamNumber,
};
pub use report::ViolationReport;
pub use summary::{ScheduleSummary, TimeRange};
pub use verifier::{Verification, Verifier};
