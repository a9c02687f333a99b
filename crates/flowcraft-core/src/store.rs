//! Entity store and sprint lifecycle controller.
//!
//! [`Tracker`] owns both the issue and the sprint collection. The two are
//! kept in one type because the referential invariants span both entities
//! and must hold after every mutation:
//!
//! 1. At most one sprint is `Active` at any time.
//! 2. An issue's `sprint_id`, if set, references an existing sprint.
//!    Ending or deleting a sprint immediately clears the references it
//!    would otherwise leave dangling.
//!
//! All mutation is synchronous and single-threaded; each operation reads
//! and writes the relevant collections atomically from the caller's
//! point of view, so the guards need no locking.
//!
//! Unknown ids are silent no-ops throughout: every id a caller can hold
//! originated from this store.

use chrono::Utc;
use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    board::{self, Board},
    error::{Error, Result},
    ids::{self, ISSUE_PREFIX, SPRINT_PREFIX},
    query::{self, IssueQuery},
    types::{
        Assignee, Issue, IssueId, IssueStatus, IssueTitle, Priority, Sprint, SprintDates,
        SprintId, SprintName, SprintStatus,
    },
};

// ============================================================================
// Partial issue updates
// ============================================================================

/// A partial field set merged into an issue by [`Tracker::update_issue`].
///
/// Unset fields are left untouched. `id` and `created_at` are never
/// updatable. Applying a change set always refreshes `updated_at`, even
/// when every field is unset.
#[derive(Debug, Clone, Default)]
pub struct IssueChanges {
    /// New title
    pub title: Option<IssueTitle>,
    /// New description
    pub description: Option<String>,
    /// New priority
    pub priority: Option<Priority>,
    /// New status
    pub status: Option<IssueStatus>,
    /// New assignee
    pub assignee: Option<Assignee>,
    /// New sprint assignment; `Some(None)` moves the issue to the backlog
    pub sprint_id: Option<Option<SprintId>>,
}

impl IssueChanges {
    /// Start an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title.
    #[must_use]
    pub fn with_title(self, title: IssueTitle) -> Self {
        Self {
            title: Some(title),
            ..self
        }
    }

    /// Set a new description.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Set a new priority.
    #[must_use]
    pub fn with_priority(self, priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..self
        }
    }

    /// Set a new status.
    #[must_use]
    pub fn with_status(self, status: IssueStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    /// Set a new assignee.
    #[must_use]
    pub fn with_assignee(self, assignee: Assignee) -> Self {
        Self {
            assignee: Some(assignee),
            ..self
        }
    }

    /// Set the sprint assignment; `None` moves the issue to the backlog.
    #[must_use]
    pub fn with_sprint(self, sprint_id: Option<SprintId>) -> Self {
        Self {
            sprint_id: Some(sprint_id),
            ..self
        }
    }

    fn apply_to(self, issue: &mut Issue) {
        if let Some(title) = self.title {
            issue.title = title;
        }
        if let Some(description) = self.description {
            issue.description = description;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(assignee) = self.assignee {
            issue.assignee = assignee;
        }
        if let Some(sprint_id) = self.sprint_id {
            issue.sprint_id = sprint_id;
        }
        issue.updated_at = Utc::now();
    }
}

// ============================================================================
// Tracker
// ============================================================================

/// The in-memory tracker state: all issues and sprints for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracker {
    issues: Vector<Issue>,
    sprints: Vector<Sprint>,
}

impl Tracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker from an existing snapshot of issues and sprints.
    #[must_use]
    pub fn from_snapshot(issues: Vector<Issue>, sprints: Vector<Sprint>) -> Self {
        Self { issues, sprints }
    }

    /// All issues, in insertion order.
    #[must_use]
    pub fn issues(&self) -> &Vector<Issue> {
        &self.issues
    }

    /// All sprints, in insertion order.
    #[must_use]
    pub fn sprints(&self) -> &Vector<Sprint> {
        &self.sprints
    }

    /// Find an issue by id.
    #[must_use]
    pub fn issue(&self, id: &IssueId) -> Option<&Issue> {
        self.issues.iter().find(|issue| &issue.id == id)
    }

    /// Find a sprint by id.
    #[must_use]
    pub fn sprint(&self, id: &SprintId) -> Option<&Sprint> {
        self.sprints.iter().find(|sprint| &sprint.id == id)
    }

    /// The single active sprint, if any.
    #[must_use]
    pub fn active_sprint(&self) -> Option<&Sprint> {
        self.sprints.iter().find(|sprint| sprint.is_active())
    }

    /// Sprints issues may still be assigned to (Planned or Active).
    #[must_use]
    pub fn assignable_sprints(&self) -> Vector<Sprint> {
        self.sprints
            .iter()
            .filter(|sprint| sprint.is_assignable())
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Read models
    // ------------------------------------------------------------------

    /// The filtered, sorted issue list for the given query parameters.
    #[must_use]
    pub fn issue_list(&self, query: &IssueQuery) -> Vector<Issue> {
        query::apply_query(&self.issues, query)
    }

    /// The kanban board for the active sprint, or `None` when no sprint
    /// is active.
    #[must_use]
    pub fn board(&self) -> Option<Board> {
        board::project_board(&self.issues, self.active_sprint())
    }

    // ------------------------------------------------------------------
    // Issue mutations
    // ------------------------------------------------------------------

    /// Create an issue. Status is forced to `Todo` and the issue starts
    /// in the backlog; both timestamps are set to now.
    pub fn create_issue(
        &mut self,
        title: IssueTitle,
        description: impl Into<String>,
        priority: Priority,
        assignee: Assignee,
    ) -> IssueId {
        let id = IssueId::new(ids::next_id(
            self.issues.iter().map(|issue| issue.id.as_str()),
            ISSUE_PREFIX,
        ));
        let now = Utc::now();

        self.issues.push_back(Issue {
            id: id.clone(),
            title,
            description: description.into(),
            priority,
            status: IssueStatus::Todo,
            assignee,
            sprint_id: None,
            created_at: now,
            updated_at: now,
        });

        debug!(issue = %id, "issue created");
        id
    }

    /// Merge a partial change set into the matching issue, refreshing its
    /// `updated_at`. Returns `false` (no-op) when the id is unknown.
    pub fn update_issue(&mut self, id: &IssueId, changes: IssueChanges) -> bool {
        match self.issues.iter_mut().find(|issue| &issue.id == id) {
            Some(issue) => {
                changes.apply_to(issue);
                debug!(issue = %id, "issue updated");
                true
            }
            None => false,
        }
    }

    /// Remove the matching issue. Never cascades; sprints are untouched.
    /// Returns `false` (no-op) when the id is unknown.
    pub fn delete_issue(&mut self, id: &IssueId) -> bool {
        match self.issues.iter().position(|issue| &issue.id == id) {
            Some(index) => {
                self.issues.remove(index);
                debug!(issue = %id, "issue deleted");
                true
            }
            None => false,
        }
    }

    /// Assign an issue to a sprint, or to the backlog with `None`.
    pub fn assign_issue_to_sprint(&mut self, id: &IssueId, sprint_id: Option<SprintId>) -> bool {
        self.update_issue(id, IssueChanges::new().with_sprint(sprint_id))
    }

    /// Change an issue's status. This is the whole of a board drop: a
    /// card moving between columns is purely a status change and never
    /// touches the sprint assignment. Dropping a card on the column it is
    /// already in still refreshes `updated_at`.
    pub fn update_issue_status(&mut self, id: &IssueId, status: IssueStatus) -> bool {
        self.update_issue(id, IssueChanges::new().with_status(status))
    }

    // ------------------------------------------------------------------
    // Sprint mutations
    // ------------------------------------------------------------------

    /// Create a sprint in the `Planned` state.
    pub fn create_sprint(&mut self, name: SprintName, dates: SprintDates) -> SprintId {
        let id = SprintId::new(ids::next_id(
            self.sprints.iter().map(|sprint| sprint.id.as_str()),
            SPRINT_PREFIX,
        ));

        self.sprints.push_back(Sprint {
            id: id.clone(),
            name,
            status: SprintStatus::Planned,
            start_date: dates.start(),
            end_date: dates.end(),
            created_at: Utc::now(),
        });

        debug!(sprint = %id, "sprint created");
        id
    }

    /// Activate a planned sprint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActiveSprintExists`] if any sprint is already
    /// active, [`Error::InvalidTransition`] if the target is not
    /// `Planned`. State is unchanged on error.
    pub fn start_sprint(&mut self, id: &SprintId) -> Result<()> {
        if let Some(active) = self.active_sprint() {
            warn!(sprint = %id, active = %active.id, "start rejected: a sprint is already active");
            return Err(Error::ActiveSprintExists {
                active: active.id.clone(),
            });
        }

        self.transition_sprint(id, SprintStatus::Active)
    }

    /// Complete the active sprint. Every issue of the sprint that is not
    /// `Done` returns to the backlog (`sprint_id` cleared, `updated_at`
    /// refreshed); `Done` issues stay attributed to the completed sprint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the target is not `Active`.
    pub fn end_sprint(&mut self, id: &SprintId) -> Result<()> {
        self.transition_sprint(id, SprintStatus::Completed)?;

        let now = Utc::now();
        for issue in self.issues.iter_mut() {
            if issue.in_sprint(id) && !issue.is_done() {
                issue.sprint_id = None;
                issue.updated_at = now;
            }
        }

        debug!(sprint = %id, "sprint ended, unfinished issues returned to backlog");
        Ok(())
    }

    /// Delete a sprint that is not active, clearing every issue reference
    /// to it first so no dangling `sprint_id` survives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SprintStillActive`] if the target is active; it
    /// must be ended first. State is unchanged on error.
    pub fn delete_sprint(&mut self, id: &SprintId) -> Result<()> {
        if self.sprint(id).is_some_and(Sprint::is_active) {
            warn!(sprint = %id, "delete rejected: sprint is active");
            return Err(Error::SprintStillActive(id.clone()));
        }

        let now = Utc::now();
        for issue in self.issues.iter_mut() {
            if issue.in_sprint(id) {
                issue.sprint_id = None;
                issue.updated_at = now;
            }
        }

        if let Some(index) = self.sprints.iter().position(|sprint| &sprint.id == id) {
            self.sprints.remove(index);
            debug!(sprint = %id, "sprint deleted");
        }

        Ok(())
    }

    fn transition_sprint(&mut self, id: &SprintId, to: SprintStatus) -> Result<()> {
        let Some(sprint) = self.sprints.iter_mut().find(|sprint| &sprint.id == id) else {
            return Ok(());
        };

        if !sprint.status.can_transition_to(to) {
            warn!(sprint = %id, from = %sprint.status, to = %to, "transition rejected");
            return Err(Error::InvalidTransition {
                from: sprint.status,
                to,
            });
        }

        sprint.status = to;
        Ok(())
    }
}
