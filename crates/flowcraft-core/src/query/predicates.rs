//! Predicate functions for the issue list filters.
//!
//! Each predicate checks one query dimension; an unset dimension passes
//! everything through.

use crate::types::Issue;

use super::{IssueQuery, SprintFilter};

/// Check if an issue passes every filter dimension of the query.
pub(super) fn matches_query(issue: &Issue, query: &IssueQuery) -> bool {
    matches_search(issue, query)
        && matches_priority(issue, query)
        && matches_status(issue, query)
        && matches_sprint(issue, query)
}

/// Case-insensitive substring match against title, description, id, and
/// assignee. Empty search text matches everything.
pub(super) fn matches_search(issue: &Issue, query: &IssueQuery) -> bool {
    if query.search_text.is_empty() {
        return true;
    }

    let needle = query.search_text.to_lowercase();
    issue.title.as_str().to_lowercase().contains(&needle)
        || issue.description.to_lowercase().contains(&needle)
        || issue.id.as_str().to_lowercase().contains(&needle)
        || issue.assignee.as_str().to_lowercase().contains(&needle)
}

/// Exact priority match, or pass-through when unset.
pub(super) fn matches_priority(issue: &Issue, query: &IssueQuery) -> bool {
    query.priority.is_none_or(|priority| issue.priority == priority)
}

/// Exact status match, or pass-through when unset.
pub(super) fn matches_status(issue: &Issue, query: &IssueQuery) -> bool {
    query.status.is_none_or(|status| issue.status == status)
}

/// Sprint bucket match: backlog keeps only unassigned issues, a specific
/// sprint keeps exact matches.
pub(super) fn matches_sprint(issue: &Issue, query: &IssueQuery) -> bool {
    match &query.sprint {
        SprintFilter::All => true,
        SprintFilter::Backlog => issue.is_backlog(),
        SprintFilter::Sprint(sprint_id) => issue.in_sprint(sprint_id),
    }
}
