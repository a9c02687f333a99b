//! # Flowcraft Core
//!
//! The sprint and issue tracking engine behind flowcraft: an in-memory,
//! single-session store of issues and sprints, the lifecycle rules that
//! govern them, and the pure projections the presentation layer renders.
//!
//! ## Architecture
//!
//! - [`types`] - validated domain types (parse at boundaries, validate
//!   once)
//! - [`ids`] - sequential `TSK-NNN` / `SPR-NNN` identifier generation
//! - [`store`] - the [`Tracker`]: entity store and sprint lifecycle
//!   controller in one cohesive type, because the invariants (single
//!   active sprint, no dangling sprint references) span both collections
//! - [`query`] - filtered, searched, stably-sorted issue list views
//! - [`board`] - the active-sprint kanban projection
//! - [`summary`] - sprint progress stats and display ordering
//! - [`voice`] - free-text voice command classification
//!
//! Projections are pure functions recomputed from current state; the
//! collections in this domain are small enough that recomputation never
//! matters, and purity keeps the views testable in isolation.
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, Error>`. Guard rejections
//! leave state unchanged; unknown ids are silent no-ops.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod board;
mod error;
pub mod ids;
pub mod query;
pub mod store;
pub mod summary;
pub mod types;
pub mod voice;

pub use board::{project_board, Board, BoardColumn};
pub use error::{Error, Result};
pub use query::{IssueQuery, SortDirection, SortField, SprintFilter};
pub use store::{IssueChanges, Tracker};
pub use summary::{display_order, sprint_progress, SprintProgress};
pub use types::{
    Assignee, Issue, IssueId, IssueStatus, IssueTitle, Priority, Sprint, SprintDates, SprintId,
    SprintName, SprintStatus,
};
pub use voice::VoiceCommand;
