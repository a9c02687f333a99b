//! Sprint list projections: display ordering and progress stats.

use std::cmp::Reverse;

use im::Vector;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::{Issue, Sprint, SprintId};

/// Progress stats for one sprint card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintProgress {
    /// Issues currently attributed to the sprint
    pub total: usize,
    /// Of those, issues that are `Done`
    pub completed: usize,
}

impl SprintProgress {
    /// Completion percentage; 0 when the sprint has no issues.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Count a sprint's issues and how many of them are finished.
#[must_use]
pub fn sprint_progress(issues: &Vector<Issue>, sprint_id: &SprintId) -> SprintProgress {
    let mut total = 0;
    let mut completed = 0;
    for issue in issues.iter().filter(|issue| issue.in_sprint(sprint_id)) {
        total += 1;
        if issue.is_done() {
            completed += 1;
        }
    }

    SprintProgress { total, completed }
}

/// Sprints ordered for display: Active first, then Planned, then
/// Completed; newer start dates first within a group.
#[must_use]
pub fn display_order(sprints: &Vector<Sprint>) -> Vector<Sprint> {
    sprints
        .iter()
        .sorted_by_key(|sprint| (sprint.status.display_rank(), Reverse(sprint.start_date)))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use im::vector;

    use crate::types::{
        Assignee, IssueId, IssueStatus, IssueTitle, Priority, SprintName, SprintStatus,
    };

    use super::*;

    fn sprint(id: &str, status: SprintStatus, start: (i32, u32, u32)) -> Sprint {
        let start_date = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        Sprint {
            id: SprintId::new(id),
            name: SprintName::parse("Sprint").unwrap(),
            status,
            start_date,
            end_date: start_date + chrono::Days::new(14),
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
    fn progress_counts_only_the_sprint_issues() {
        let issues = vector![
            issue("TSK-001", IssueStatus::Done, Some("SPR-001")),
            issue("TSK-002", IssueStatus::InProgress, Some("SPR-001")),
            issue("TSK-003", IssueStatus::Done, Some("SPR-002")),
            issue("TSK-004", IssueStatus::Todo, None),
        ];

        let progress = sprint_progress(&issues, &SprintId::new("SPR-001"));
        assert_eq!(progress, SprintProgress { total: 2, completed: 1 });
        assert!((progress.percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_sprint_has_zero_percent() {
        let progress = sprint_progress(&Vector::new(), &SprintId::new("SPR-001"));
        assert_eq!(progress, SprintProgress { total: 0, completed: 0 });
        assert!(progress.percent().abs() < f64::EPSILON);
    }

    #[test]
    fn display_order_puts_active_first_then_newest() {
        let sprints = vector![
            sprint("SPR-001", SprintStatus::Completed, (2024, 1, 1)),
            sprint("SPR-002", SprintStatus::Planned, (2024, 2, 1)),
            sprint("SPR-003", SprintStatus::Active, (2024, 1, 15)),
            sprint("SPR-004", SprintStatus::Planned, (2024, 3, 1)),
        ];

        let ordered = display_order(&sprints);
        let ids: Vec<&str> = ordered.iter().map(|sprint| sprint.id.as_str()).collect();

        assert_eq!(ids, ["SPR-003", "SPR-004", "SPR-002", "SPR-001"]);
    }
}
