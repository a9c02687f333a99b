//! Plain-text rendering of the core's read models.

use std::fmt::Write as _;

use flowcraft_core::{display_order, sprint_progress, IssueQuery, Tracker};

/// Render the filtered, sorted issue list as a table.
#[must_use]
pub fn issue_list(tracker: &Tracker, query: &IssueQuery) -> String {
    let issues = tracker.issue_list(query);
    if issues.is_empty() {
        return "no issues found".to_string();
    }

    let header = ["ID", "TITLE", "PRIO", "STATUS", "ASSIGNEE", "SPRINT"];
    let rows: Vec<[String; 6]> = issues
        .iter()
        .map(|issue| {
            let sprint = issue.sprint_id.as_ref().map_or_else(
                || "backlog".to_string(),
                |id| {
                    tracker
                        .sprint(id)
                        .map_or_else(|| id.to_string(), |sprint| sprint.name.to_string())
                },
            );
            [
                issue.id.to_string(),
                issue.title.to_string(),
                issue.priority.to_string(),
                issue.status.to_string(),
                issue.assignee.to_string(),
                sprint,
            ]
        })
        .collect();

    table(&header, &rows)
}

/// Render the kanban board of the active sprint, or the empty state.
#[must_use]
pub fn board(tracker: &Tracker) -> String {
    let Some(board) = tracker.board() else {
        return "no active sprint; start one from the sprints view".to_string();
    };

    let mut out = format!("{} ({} issues)\n", board.sprint.name, board.issue_count());
    for column in &board.columns {
        let _ = writeln!(out, "== {} ({})", column.status, column.issues.len());
        if column.issues.is_empty() {
            out.push_str("   -\n");
        }
        for issue in &column.issues {
            let _ = writeln!(
                out,
                "   {} {} [{}] {}",
                issue.id, issue.title, issue.priority, issue.assignee
            );
        }
    }

    out.trim_end().to_string()
}

/// Render the sprint list with progress, active sprint first.
#[must_use]
pub fn sprint_list(tracker: &Tracker) -> String {
    let sprints = display_order(tracker.sprints());
    if sprints.is_empty() {
        return "no sprints yet; create one to get started".to_string();
    }

    let header = ["ID", "NAME", "STATUS", "DATES", "PROGRESS"];
    let rows: Vec<[String; 5]> = sprints
        .iter()
        .map(|sprint| {
            let progress = sprint_progress(tracker.issues(), &sprint.id);
            [
                sprint.id.to_string(),
                sprint.name.to_string(),
                sprint.status.to_string(),
                format!("{}..{}", sprint.start_date, sprint.end_date),
                format!(
                    "{}/{} ({:.0}%)",
                    progress.completed,
                    progress.total,
                    progress.percent()
                ),
            ]
        })
        .collect();

    table(&header, &rows)
}

fn table<const N: usize>(header: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths: [usize; N] = [0; N];
    for (index, cell) in header.iter().enumerate() {
        widths[index] = cell.len();
    }
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (index, cell) in header.iter().enumerate() {
        let _ = write!(out, "{cell:<width$}  ", width = widths[index]);
    }
    out.push('\n');
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            let _ = write!(out, "{cell:<width$}  ", width = widths[index]);
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}
