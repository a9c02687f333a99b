//! Issue list querying: search, filters, and stable sorting.
//!
//! The query engine is a pure function of the issue collection plus a
//! [`IssueQuery`]: it never mutates its input and is recomputed from
//! scratch on every parameter or data change. The pipeline runs strictly
//! in this order: text search, priority filter, status filter, sprint
//! filter, stable sort.
//!
//! The module is organized into:
//! - **predicates**: individual filter predicates
//! - **operations**: the filter/sort pipeline composing them

mod operations;
mod predicates;

pub use operations::{apply_query, filter_issues, sort_issues};

use strum::{Display, EnumString};

use crate::types::{IssueStatus, Priority, SprintId};

/// Which sprint bucket the issue list is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SprintFilter {
    /// No restriction
    #[default]
    All,
    /// Only issues with no sprint assignment
    Backlog,
    /// Only issues assigned to the given sprint
    Sprint(SprintId),
}

/// Sortable issue fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SortField {
    /// Case-insensitive id compare
    Id,
    /// Case-insensitive title compare
    Title,
    /// Numeric severity, `P0` first ascending
    Priority,
    /// Case-insensitive compare of the status label
    Status,
    /// Case-insensitive assignee compare
    Assignee,
    /// Creation instant
    CreatedAt,
    /// Last-mutation instant
    UpdatedAt,
}

/// Sort direction. Descending reverses the comparator; ties keep their
/// relative input order either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// Query parameters for the issue list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Case-insensitive substring matched against title, description,
    /// id, and assignee; empty matches everything
    pub search_text: String,
    /// Exact priority, or `None` for all
    pub priority: Option<Priority>,
    /// Exact status, or `None` for all
    pub status: Option<IssueStatus>,
    /// Sprint bucket restriction
    pub sprint: SprintFilter,
    /// Sort field
    pub sort: SortField,
    /// Sort direction
    pub direction: SortDirection,
}

impl Default for IssueQuery {
    /// The issue list opens with no filters, sorted newest first.
    fn default() -> Self {
        Self {
            search_text: String::new(),
            priority: None,
            status: None,
            sprint: SprintFilter::All,
            sort: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl IssueQuery {
    /// Start from the default view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    #[must_use]
    pub fn with_search(self, text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..self
        }
    }

    /// Restrict to one priority.
    #[must_use]
    pub fn with_priority(self, priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..self
        }
    }

    /// Restrict to one status.
    #[must_use]
    pub fn with_status(self, status: IssueStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    /// Restrict to a sprint bucket.
    #[must_use]
    pub fn with_sprint(self, sprint: SprintFilter) -> Self {
        Self { sprint, ..self }
    }

    /// Set the sort field and direction.
    #[must_use]
    pub fn sorted_by(self, sort: SortField, direction: SortDirection) -> Self {
        Self {
            sort,
            direction,
            ..self
        }
    }
}
