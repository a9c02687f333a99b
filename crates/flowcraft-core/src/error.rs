//! Error types for the flowcraft core.
//!
//! Two error classes exist:
//! - **Validation errors** from the parse-at-boundary newtypes in
//!   [`crate::types`], raised before any mutation is attempted.
//! - **Invariant-guard rejections** from the sprint lifecycle rules in
//!   [`crate::store`], raised with state left unchanged.
//!
//! Unknown ids are not an error class: update/delete by an id the store
//! never issued is a silent no-op.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{SprintId, SprintStatus};

/// Core error type for tracker operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Issue title was empty after trimming
    #[error("Title is required")]
    EmptyTitle,

    /// Issue title too short after trimming
    #[error("Title must be at least {min} characters (got {got})")]
    TitleTooShort { min: usize, got: usize },

    /// Sprint name was empty after trimming
    #[error("Sprint name is required")]
    EmptySprintName,

    /// Sprint name too short after trimming
    #[error("Sprint name must be at least {min} characters (got {got})")]
    SprintNameTooShort { min: usize, got: usize },

    /// Assignee was empty after trimming
    #[error("Assignee is required")]
    EmptyAssignee,

    /// Sprint end date not strictly after its start date
    #[error("End date {end} must be after start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A sprint is already active; at most one may be
    #[error("Only one sprint can be active at a time; end {active} first")]
    ActiveSprintExists { active: SprintId },

    /// Active sprints cannot be deleted
    #[error("Cannot delete active sprint {0}; end it first")]
    SprintStillActive(SprintId),

    /// Requested transition is not allowed by the sprint state machine
    #[error("Invalid sprint transition: {from} -> {to}")]
    InvalidTransition { from: SprintStatus, to: SprintStatus },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
