//! The filter-then-sort pipeline for the issue list.
//!
//! All operations are pure: they take the issue collection by reference
//! and return a fresh `Vector`.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use im::Vector;
use itertools::Itertools;
use tap::Pipe;

use crate::types::Issue;

use super::predicates::matches_query;
use super::{IssueQuery, SortDirection, SortField};

/// Sort key extracted once per issue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    /// Priority severity, 0 = `P0` sorts first ascending
    Severity(u8),
    /// `created_at` / `updated_at` instants
    Instant(DateTime<Utc>),
    /// Lowercased text for case-insensitive comparison
    Text(String),
}

fn extract_sort_key(issue: &Issue, field: SortField) -> SortKey {
    match field {
        SortField::Id => SortKey::Text(issue.id.as_str().to_lowercase()),
        SortField::Title => SortKey::Text(issue.title.as_str().to_lowercase()),
        SortField::Status => SortKey::Text(issue.status.to_string().to_lowercase()),
        SortField::Assignee => SortKey::Text(issue.assignee.as_str().to_lowercase()),
        SortField::Priority => SortKey::Severity(issue.priority.severity()),
        SortField::CreatedAt => SortKey::Instant(issue.created_at),
        SortField::UpdatedAt => SortKey::Instant(issue.updated_at),
    }
}

/// Sort key with direction applied. `Reverse` only flips comparisons
/// between unequal keys, so the sort stays stable in both directions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum DirectedKey {
    Asc(SortKey),
    Desc(Reverse<SortKey>),
}

fn directed(key: SortKey, direction: SortDirection) -> DirectedKey {
    match direction {
        SortDirection::Asc => DirectedKey::Asc(key),
        SortDirection::Desc => DirectedKey::Desc(Reverse(key)),
    }
}

/// Keep the issues passing every filter dimension, in input order.
#[must_use]
pub fn filter_issues(issues: &Vector<Issue>, query: &IssueQuery) -> Vector<Issue> {
    issues
        .iter()
        .filter(|issue| matches_query(issue, query))
        .cloned()
        .collect()
}

/// Stable sort by the given field and direction; equal keys keep their
/// relative input order.
#[must_use]
pub fn sort_issues(
    issues: &Vector<Issue>,
    field: SortField,
    direction: SortDirection,
) -> Vector<Issue> {
    issues
        .iter()
        .map(|issue| (issue, directed(extract_sort_key(issue, field), direction)))
        .sorted_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(issue, _)| issue)
        .cloned()
        .collect()
}

/// Apply the complete query: filter, then stable sort.
#[must_use]
pub fn apply_query(issues: &Vector<Issue>, query: &IssueQuery) -> Vector<Issue> {
    issues
        .pipe(|issues| filter_issues(issues, query))
        .pipe(|issues| sort_issues(&issues, query.sort, query.direction))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use im::vector;

    use crate::query::SprintFilter;
    use crate::types::{Assignee, IssueId, IssueStatus, IssueTitle, Priority, SprintId};

    use super::*;

    fn issue(id: &str, title: &str, priority: Priority) -> Issue {
        let now = Utc::now();
        Issue {
            id: IssueId::new(id),
            title: IssueTitle::parse(title).unwrap(),
            description: String::new(),
            priority,
            status: IssueStatus::Todo,
            assignee: Assignee::parse("Ana").unwrap(),
            sprint_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(issues: &Vector<Issue>) -> Vec<&str> {
        issues.iter().map(|issue| issue.id.as_str()).collect()
    }

    #[test]
    fn priority_ascending_puts_p0_first() {
        let issues = vector![
            issue("TSK-001", "Later work", Priority::P5),
            issue("TSK-002", "Urgent fix", Priority::P0),
            issue("TSK-003", "Routine chore", Priority::P3),
        ];

        let sorted = sort_issues(&issues, SortField::Priority, SortDirection::Asc);
        assert_eq!(ids(&sorted), ["TSK-002", "TSK-003", "TSK-001"]);

        let reversed = sort_issues(&issues, SortField::Priority, SortDirection::Desc);
        assert_eq!(ids(&reversed), ["TSK-001", "TSK-003", "TSK-002"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let issues = vector![
            issue("TSK-003", "Third in", Priority::P2),
            issue("TSK-001", "First in", Priority::P2),
            issue("TSK-002", "Second in", Priority::P2),
        ];

        let sorted = sort_issues(&issues, SortField::Priority, SortDirection::Asc);
        assert_eq!(ids(&sorted), ["TSK-003", "TSK-001", "TSK-002"]);

        let reversed = sort_issues(&issues, SortField::Priority, SortDirection::Desc);
        assert_eq!(ids(&reversed), ["TSK-003", "TSK-001", "TSK-002"]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let issues = vector![
            issue("TSK-001", "zebra migration", Priority::P2),
            issue("TSK-002", "Alpha rollout", Priority::P2),
            issue("TSK-003", "beta cleanup", Priority::P2),
        ];

        let sorted = sort_issues(&issues, SortField::Title, SortDirection::Asc);
        assert_eq!(ids(&sorted), ["TSK-002", "TSK-003", "TSK-001"]);
    }

    #[test]
    fn backlog_filter_keeps_exactly_the_unassigned() {
        let mut assigned = issue("TSK-001", "Sprint work", Priority::P2);
        assigned.sprint_id = Some(SprintId::new("SPR-001"));
        let issues = vector![assigned, issue("TSK-002", "Backlog work", Priority::P2)];

        let query = IssueQuery::new().with_sprint(SprintFilter::Backlog);
        let filtered = filter_issues(&issues, &query);

        assert_eq!(ids(&filtered), ["TSK-002"]);
    }

    #[test]
    fn apply_query_filters_before_sorting() {
        let issues = vector![
            issue("TSK-001", "Fix login bug", Priority::P1),
            issue("TSK-002", "Fix logout bug", Priority::P0),
            issue("TSK-003", "Write release notes", Priority::P0),
        ];

        let query = IssueQuery::new()
            .with_search("fix")
            .sorted_by(SortField::Priority, SortDirection::Asc);
        let result = apply_query(&issues, &query);

        assert_eq!(ids(&result), ["TSK-002", "TSK-001"]);
    }

    #[test]
    fn query_never_mutates_input() {
        let issues = vector![
            issue("TSK-002", "Second", Priority::P3),
            issue("TSK-001", "First", Priority::P0),
        ];

        let _ = apply_query(
            &issues,
            &IssueQuery::new().sorted_by(SortField::Id, SortDirection::Asc),
        );

        assert_eq!(ids(&issues), ["TSK-002", "TSK-001"]);
    }
}
