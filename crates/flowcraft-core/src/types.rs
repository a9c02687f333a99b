//! Core domain types for the tracker.
//!
//! This module follows the parse-at-boundary pattern:
//! - Semantic newtypes ([`IssueTitle`], [`SprintName`], [`Assignee`],
//!   [`SprintDates`]) validate on construction and cannot represent
//!   invalid states afterwards.
//! - Enum-based state ([`IssueStatus`], [`SprintStatus`]) with explicit
//!   transition rules.
//! - [`Issue`] and [`Sprint`] carry only already-validated values, so the
//!   store never re-validates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Error, Result};

// ============================================================================
// Priority
// ============================================================================

/// Issue priority, `P0` (highest) through `P5` (lowest).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Priority {
    #[strum(to_string = "P0", serialize = "p0")]
    P0,
    #[strum(to_string = "P1", serialize = "p1")]
    P1,
    #[strum(to_string = "P2", serialize = "p2")]
    P2,
    #[strum(to_string = "P3", serialize = "p3")]
    P3,
    #[strum(to_string = "P4", serialize = "p4")]
    P4,
    #[strum(to_string = "P5", serialize = "p5")]
    P5,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Self; 6] = [Self::P0, Self::P1, Self::P2, Self::P3, Self::P4, Self::P5];

    /// Numeric severity: 0 for `P0` up to 5 for `P5`. Lower number means
    /// higher priority, so ascending severity sorts `P0` first.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::P0 => 0,
            Self::P1 => 1,
            Self::P2 => 2,
            Self::P3 => 3,
            Self::P4 => 4,
            Self::P5 => 5,
        }
    }

    /// Convert a severity back to a `Priority`, or `None` if out of range.
    #[must_use]
    pub const fn from_severity(n: u8) -> Option<Self> {
        match n {
            0 => Some(Self::P0),
            1 => Some(Self::P1),
            2 => Some(Self::P2),
            3 => Some(Self::P3),
            4 => Some(Self::P4),
            5 => Some(Self::P5),
            _ => None,
        }
    }
}

impl Default for Priority {
    /// New issues default to `P2`, matching the create form.
    fn default() -> Self {
        Self::P2
    }
}

// ============================================================================
// Issue status
// ============================================================================

/// Issue workflow state, ordered left-to-right as board columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize,
)]
pub enum IssueStatus {
    #[strum(to_string = "Todo", serialize = "todo")]
    Todo,

    #[strum(to_string = "In Progress", serialize = "in-progress", serialize = "in progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    #[strum(to_string = "In Review", serialize = "in-review", serialize = "in review")]
    #[serde(rename = "In Review")]
    InReview,

    #[strum(to_string = "Done", serialize = "done")]
    Done,
}

impl IssueStatus {
    /// Board columns in fixed display order.
    pub const COLUMNS: [Self; 4] = [Self::Todo, Self::InProgress, Self::InReview, Self::Done];

    /// Position of this status in the board column order.
    #[must_use]
    pub const fn column_index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::InReview => 2,
            Self::Done => 3,
        }
    }

    /// Whether the status counts as finished work.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

// ============================================================================
// Sprint status
// ============================================================================

/// Sprint lifecycle state: `Planned` -> `Active` -> `Completed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize,
)]
pub enum SprintStatus {
    #[strum(to_string = "Planned", serialize = "planned")]
    Planned,

    #[strum(to_string = "Active", serialize = "active")]
    Active,

    #[strum(to_string = "Completed", serialize = "completed")]
    Completed,
}

impl SprintStatus {
    /// Valid state transitions. `Completed` is terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Planned, Self::Active) | (Self::Active, Self::Completed)
        )
    }

    /// Returns true if no transitions lead out of this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Rank used when ordering the sprint list for display: Active first,
    /// then Planned, then Completed.
    #[must_use]
    pub const fn display_rank(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Planned => 1,
            Self::Completed => 2,
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Issue identifier, `TSK-NNN`. Generated by the store, never parsed from
/// user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IssueId(String);

impl IssueId {
    /// Wrap a generated identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sprint identifier, `SPR-NNN`. Generated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SprintId(String);

impl SprintId {
    /// Wrap a generated identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SprintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Semantic newtypes - text fields
// ============================================================================

/// A validated issue title: trimmed, non-empty, at least 3 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueTitle(String);

impl IssueTitle {
    /// Minimum title length after trimming.
    pub const MIN_LENGTH: usize = 3;

    /// Parse and validate a title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTitle`] if the input is empty after trimming,
    /// [`Error::TitleTooShort`] if it is shorter than [`Self::MIN_LENGTH`].
    pub fn parse(input: impl Into<String>) -> Result<Self> {
        let input = input.into();
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let got = trimmed.chars().count();
        if got < Self::MIN_LENGTH {
            return Err(Error::TitleTooShort {
                min: Self::MIN_LENGTH,
                got,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for IssueTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for IssueTitle {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

/// A validated sprint name: trimmed, non-empty, at least 3 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SprintName(String);

impl SprintName {
    /// Minimum name length after trimming.
    pub const MIN_LENGTH: usize = 3;

    /// Parse and validate a sprint name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySprintName`] if the input is empty after
    /// trimming, [`Error::SprintNameTooShort`] if it is shorter than
    /// [`Self::MIN_LENGTH`].
    pub fn parse(input: impl Into<String>) -> Result<Self> {
        let input = input.into();
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(Error::EmptySprintName);
        }

        let got = trimmed.chars().count();
        if got < Self::MIN_LENGTH {
            return Err(Error::SprintNameTooShort {
                min: Self::MIN_LENGTH,
                got,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SprintName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for SprintName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

/// A validated assignee: trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignee(String);

impl Assignee {
    /// Parse and validate an assignee name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAssignee`] if the input is empty after trimming.
    pub fn parse(input: impl Into<String>) -> Result<Self> {
        let input = input.into();
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(Error::EmptyAssignee);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Assignee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Assignee {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

// ============================================================================
// Sprint dates
// ============================================================================

/// A validated sprint date range: end strictly after start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintDates {
    start: NaiveDate,
    end: NaiveDate,
}

impl SprintDates {
    /// Build a date range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] unless `end > start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidDateRange { start, end });
        }

        Ok(Self { start, end })
    }

    /// Sprint start date.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    /// Sprint end date.
    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A unit of trackable work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier, `TSK-NNN`
    pub id: IssueId,
    /// Short summary
    pub title: IssueTitle,
    /// Free-form description, may be empty
    pub description: String,
    /// Priority, `P0` highest
    pub priority: Priority,
    /// Board column
    pub status: IssueStatus,
    /// Who owns the work
    pub assignee: Assignee,
    /// Owning sprint; `None` means the issue sits in the backlog
    pub sprint_id: Option<SprintId>,
    /// Fixed at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Whether the issue has no sprint assignment.
    #[must_use]
    pub const fn is_backlog(&self) -> bool {
        self.sprint_id.is_none()
    }

    /// Whether the issue is finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Whether the issue belongs to the given sprint.
    #[must_use]
    pub fn in_sprint(&self, sprint_id: &SprintId) -> bool {
        self.sprint_id.as_ref() == Some(sprint_id)
    }
}

/// A named, dated container for issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Unique identifier, `SPR-NNN`
    pub id: SprintId,
    /// Display name
    pub name: SprintName,
    /// Lifecycle state
    pub status: SprintStatus,
    /// First day of the sprint
    pub start_date: NaiveDate,
    /// Last day of the sprint, strictly after `start_date`
    pub end_date: NaiveDate,
    /// Fixed at creation
    pub created_at: DateTime<Utc>,
}

impl Sprint {
    /// Whether this is the active sprint.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SprintStatus::Active
    }

    /// Whether issues may still be assigned to this sprint. Completed
    /// sprints are no longer assignment targets.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        matches!(self.status, SprintStatus::Planned | SprintStatus::Active)
    }
}
