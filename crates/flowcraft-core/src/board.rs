//! Kanban board projection for the active sprint.
//!
//! The board is a pure function of the issue collection and the active
//! sprint: the active sprint's issues grouped by status into the four
//! fixed columns. When no sprint is active there is no board and the
//! caller renders a "no active sprint" state with no drag interaction.
//!
//! Moving a card is not a board concern: a drop resolves to
//! [`crate::store::Tracker::update_issue_status`], a plain status change
//! that never touches the sprint assignment.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::types::{Issue, IssueStatus, Sprint};

/// One column of the kanban board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    /// The status this column represents
    pub status: IssueStatus,
    /// Issues in this column, in collection insertion order
    pub issues: Vector<Issue>,
}

/// The kanban board for the active sprint.
///
/// All four columns are always present, possibly empty, in the fixed
/// order Todo, In Progress, In Review, Done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The active sprint the board belongs to
    pub sprint: Sprint,
    /// Columns in fixed display order
    pub columns: Vec<BoardColumn>,
}

impl Board {
    /// The column for a given status. Columns sit at their fixed
    /// position, so this is a direct index.
    #[must_use]
    pub fn column(&self, status: IssueStatus) -> Option<&BoardColumn> {
        self.columns.get(status.column_index())
    }

    /// Total number of issues on the board.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.columns.iter().map(|column| column.issues.len()).sum()
    }
}

/// Project the board for the active sprint, or `None` when no sprint is
/// active. A sprint that is not `Active` never yields a board.
#[must_use]
pub fn project_board(issues: &Vector<Issue>, active: Option<&Sprint>) -> Option<Board> {
    let sprint = active.filter(|sprint| sprint.is_active())?;

    let columns = IssueStatus::COLUMNS
        .iter()
        .map(|&status| BoardColumn {
            status,
            issues: issues
                .iter()
                .filter(|issue| issue.in_sprint(&sprint.id) && issue.status == status)
                .cloned()
                .collect(),
        })
        .collect();

    Some(Board {
        sprint: sprint.clone(),
        columns,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use im::vector;

    use crate::types::{
        Assignee, IssueId, IssueTitle, Priority, SprintId, SprintName, SprintStatus,
    };

    use super::*;

    fn sprint(id: &str, status: SprintStatus) -> Sprint {
        Sprint {
            id: SprintId::new(id),
            name: SprintName::parse("Sprint 1").unwrap(),
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn issue(id: &str, status: IssueStatus, sprint_id: Option<&str>) -> Issue {
        let now = Utc::now();
        Issue {
            id: IssueId::new(id),
            title: IssueTitle::parse("Some work").unwrap(),
            description: String::new(),
            priority: Priority::P2,
            status,
            assignee: Assignee::parse("Ana").unwrap(),
            sprint_id: sprint_id.map(SprintId::new),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn no_active_sprint_means_no_board() {
        let issues = vector![issue("TSK-001", IssueStatus::Todo, None)];
        assert!(project_board(&issues, None).is_none());
        assert!(project_board(&issues, Some(&sprint("SPR-001", SprintStatus::Planned))).is_none());
        assert!(
            project_board(&issues, Some(&sprint("SPR-001", SprintStatus::Completed))).is_none()
        );
    }

    #[test]
    fn columns_are_fixed_and_ordered_even_when_empty() {
        let board = project_board(&Vector::new(), Some(&sprint("SPR-001", SprintStatus::Active)))
            .unwrap();

        let statuses: Vec<IssueStatus> = board.columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, IssueStatus::COLUMNS);
        assert!(board.columns.iter().all(|c| c.issues.is_empty()));
    }

    #[test]
    fn columns_partition_exactly_the_sprint_issues() {
        let active = sprint("SPR-001", SprintStatus::Active);
        let issues = vector![
            issue("TSK-001", IssueStatus::Todo, Some("SPR-001")),
            issue("TSK-002", IssueStatus::InProgress, Some("SPR-001")),
            issue("TSK-003", IssueStatus::Done, Some("SPR-001")),
            issue("TSK-004", IssueStatus::Todo, Some("SPR-002")),
            issue("TSK-005", IssueStatus::Todo, None),
        ];

        let board = project_board(&issues, Some(&active)).unwrap();

        assert_eq!(board.issue_count(), 3);
        for column in &board.columns {
            for entry in &column.issues {
                assert!(entry.in_sprint(&active.id));
                assert_eq!(entry.status, column.status);
            }
        }
        assert_eq!(board.column(IssueStatus::Todo).unwrap().issues.len(), 1);
        assert_eq!(board.column(IssueStatus::InReview).unwrap().issues.len(), 0);
    }

    #[test]
    fn column_lookup_resolves_every_status() {
        let board = project_board(&Vector::new(), Some(&sprint("SPR-001", SprintStatus::Active)))
            .unwrap();

        for status in IssueStatus::COLUMNS {
            assert_eq!(board.column(status).unwrap().status, status);
        }
    }

    #[test]
    fn column_keeps_collection_insertion_order() {
        let active = sprint("SPR-001", SprintStatus::Active);
        let issues = vector![
            issue("TSK-003", IssueStatus::Todo, Some("SPR-001")),
            issue("TSK-001", IssueStatus::Todo, Some("SPR-001")),
            issue("TSK-002", IssueStatus::Todo, Some("SPR-001")),
        ];

        let board = project_board(&issues, Some(&active)).unwrap();
        let todo: Vec<&str> = board
            .column(IssueStatus::Todo)
            .unwrap()
            .issues
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();

        assert_eq!(todo, ["TSK-003", "TSK-001", "TSK-002"]);
    }
}
