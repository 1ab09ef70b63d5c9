//! Tournament schedule domain models.
//!
//! Provides the per-team schedule record consumed by verification and the
//! violation type it produces.
//!
//! # Domain Mappings
//!
//! | Type | Tournament concept |
//! |------|--------------------|
//! | ScheduleRecord | One row of the schedule (one team) |
//! | PerformanceSlot | A head-to-head round at a table color and side |
//! | ConstraintViolation | A rule the schedule breaks |

mod record;
mod violation;

pub(crate) use record::{format_time, round_label};
pub use record::{PerformanceSlot, ScheduleRecord, TableSide, TeamNumber};
pub use violation::{ConstraintViolation, RuleId, Severity};
