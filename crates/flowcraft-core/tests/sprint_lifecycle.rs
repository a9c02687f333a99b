//! End-to-end scenarios for the sprint/issue lifecycle.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{NaiveDate, Utc};
use flowcraft_core::{
    Assignee, Error, Issue, IssueId, IssueQuery, IssueStatus, IssueTitle, Priority, SortDirection,
    SortField, Sprint, SprintDates, SprintFilter, SprintId, SprintName, SprintStatus, Tracker,
};
use im::vector;

fn dates(start: (i32, u32, u32), end: (i32, u32, u32)) -> SprintDates {
    SprintDates::new(
        NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    )
    .unwrap()
}

#[test]
fn first_issue_on_an_empty_store() {
    let mut tracker = Tracker::new();

    let id = tracker.create_issue(
        IssueTitle::parse("Fix login bug").unwrap(),
        "",
        Priority::P1,
        Assignee::parse("Ana").unwrap(),
    );

    assert_eq!(id.as_str(), "TSK-001");
    let issue = tracker.issue(&id).unwrap();
    assert_eq!(issue.status, IssueStatus::Todo);
    assert_eq!(issue.sprint_id, None);
    assert_eq!(issue.priority, Priority::P1);
    assert_eq!(issue.assignee.as_str(), "Ana");
}

#[test]
fn sprint_activation_and_second_start_rejected() {
    let mut tracker = Tracker::new();

    let first = tracker.create_sprint(
        SprintName::parse("Sprint 1").unwrap(),
        dates((2024, 1, 1), (2024, 1, 14)),
    );
    assert_eq!(first.as_str(), "SPR-001");
    assert_eq!(tracker.sprint(&first).unwrap().status, SprintStatus::Planned);

    tracker.start_sprint(&first).unwrap();
    assert_eq!(tracker.sprint(&first).unwrap().status, SprintStatus::Active);

    let second = tracker.create_sprint(
        SprintName::parse("Sprint 2").unwrap(),
        dates((2024, 1, 15), (2024, 1, 28)),
    );
    assert_eq!(second.as_str(), "SPR-002");

    let rejected = tracker.start_sprint(&second);
    assert_eq!(
        rejected,
        Err(Error::ActiveSprintExists {
            active: first.clone()
        })
    );

    let active: Vec<_> = tracker
        .sprints()
        .iter()
        .filter(|sprint| sprint.is_active())
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, first);
}

#[test]
fn ending_a_sprint_returns_unfinished_work_to_the_backlog() {
    let mut tracker = Tracker::new();

    let sprint = tracker.create_sprint(
        SprintName::parse("Sprint 1").unwrap(),
        dates((2024, 1, 1), (2024, 1, 14)),
    );
    tracker.start_sprint(&sprint).unwrap();

    let issue = tracker.create_issue(
        IssueTitle::parse("Fix login bug").unwrap(),
        "",
        Priority::P1,
        Assignee::parse("Ana").unwrap(),
    );
    tracker.assign_issue_to_sprint(&issue, Some(sprint.clone()));
    tracker.update_issue_status(&issue, IssueStatus::InProgress);

    tracker.end_sprint(&sprint).unwrap();

    assert_eq!(tracker.issue(&issue).unwrap().sprint_id, None);
    assert_eq!(
        tracker.sprint(&sprint).unwrap().status,
        SprintStatus::Completed
    );
}

#[test]
fn seeded_snapshot_continues_id_sequences_and_projects() {
    let now = Utc::now();
    let imported_sprint = Sprint {
        id: SprintId::new("SPR-002"),
        name: SprintName::parse("Imported sprint").unwrap(),
        status: SprintStatus::Planned,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
        created_at: now,
    };
    // A wide suffix as external data might carry it; it still counts as 7.
    let imported_issue = Issue {
        id: IssueId::new("TSK-0007"),
        title: IssueTitle::parse("Imported work").unwrap(),
        description: String::new(),
        priority: Priority::P1,
        status: IssueStatus::InProgress,
        assignee: Assignee::parse("Ana").unwrap(),
        sprint_id: Some(SprintId::new("SPR-002")),
        created_at: now,
        updated_at: now,
    };
    let mut tracker = Tracker::from_snapshot(vector![imported_issue], vector![imported_sprint]);

    let next_issue = tracker.create_issue(
        IssueTitle::parse("Fresh work").unwrap(),
        "",
        Priority::P2,
        Assignee::parse("Ben").unwrap(),
    );
    assert_eq!(next_issue.as_str(), "TSK-008");

    let next_sprint = tracker.create_sprint(
        SprintName::parse("Sprint 3").unwrap(),
        dates((2024, 1, 15), (2024, 1, 28)),
    );
    assert_eq!(next_sprint.as_str(), "SPR-003");

    // The seeded sprint obeys the lifecycle and projects like any other.
    let seeded = SprintId::new("SPR-002");
    tracker.start_sprint(&seeded).unwrap();
    let board = tracker.board().unwrap();
    assert_eq!(board.issue_count(), 1);
    assert_eq!(
        board.column(IssueStatus::InProgress).unwrap().issues.len(),
        1
    );

    let progress = flowcraft_core::sprint_progress(tracker.issues(), &seeded);
    assert_eq!(progress.total, 1);
    assert_eq!(progress.completed, 0);
}

#[test]
fn a_full_session() {
    let mut tracker = Tracker::new();

    let login = tracker.create_issue(
        IssueTitle::parse("Fix login bug").unwrap(),
        "Session cookie expires too early",
        Priority::P0,
        Assignee::parse("Ana").unwrap(),
    );
    let dark_mode = tracker.create_issue(
        IssueTitle::parse("Ship dark mode").unwrap(),
        "",
        Priority::P2,
        Assignee::parse("Ben").unwrap(),
    );
    let docs = tracker.create_issue(
        IssueTitle::parse("Update onboarding docs").unwrap(),
        "",
        Priority::P4,
        Assignee::parse("Cleo").unwrap(),
    );

    let sprint = tracker.create_sprint(
        SprintName::parse("January release").unwrap(),
        dates((2024, 1, 1), (2024, 1, 14)),
    );
    tracker.assign_issue_to_sprint(&login, Some(sprint.clone()));
    tracker.assign_issue_to_sprint(&dark_mode, Some(sprint.clone()));

    // No board before the sprint starts.
    assert!(tracker.board().is_none());

    tracker.start_sprint(&sprint).unwrap();
    tracker.update_issue_status(&login, IssueStatus::Done);
    tracker.update_issue_status(&dark_mode, IssueStatus::InReview);

    let board = tracker.board().unwrap();
    assert_eq!(board.issue_count(), 2);
    assert_eq!(board.column(IssueStatus::Done).unwrap().issues.len(), 1);
    assert_eq!(board.column(IssueStatus::InReview).unwrap().issues.len(), 1);

    let progress = flowcraft_core::sprint_progress(tracker.issues(), &sprint);
    assert_eq!(progress.total, 2);
    assert_eq!(progress.completed, 1);

    // Backlog view shows only the unassigned issue.
    let backlog = tracker.issue_list(
        &IssueQuery::new()
            .with_sprint(SprintFilter::Backlog)
            .sorted_by(SortField::Id, SortDirection::Asc),
    );
    let backlog_ids: Vec<&str> = backlog.iter().map(|issue| issue.id.as_str()).collect();
    assert_eq!(backlog_ids, [docs.as_str()]);

    tracker.end_sprint(&sprint).unwrap();

    // The finished issue stays attributed, the in-review one returned.
    assert!(tracker.issue(&login).unwrap().in_sprint(&sprint));
    assert!(tracker.issue(&dark_mode).unwrap().is_backlog());
    assert!(tracker.board().is_none());

    // Completed sprints can be deleted; attribution is cleared with them.
    tracker.delete_sprint(&sprint).unwrap();
    assert!(tracker.sprint(&sprint).is_none());
    assert!(tracker.issues().iter().all(|issue| issue.is_backlog()));
}
