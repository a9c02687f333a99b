//! The interactive session: view navigation, command dispatch, and the
//! imperative shell around the core tracker.
//!
//! Every command is parsed and validated first; only then is a mutation
//! invoked, so invalid input never touches the store. Guard rejections
//! from the core come back as blocking notices with state unchanged.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use flowcraft_core::{
    voice, Assignee, IssueChanges, IssueId, IssueQuery, IssueStatus, IssueTitle, Priority,
    SortDirection, SortField, SprintDates, SprintFilter, SprintId, SprintName, Tracker,
    VoiceCommand,
};
use tracing::info;

use crate::render;

/// The three top-level views of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Filterable, sortable issue list
    Issues,
    /// Kanban board of the active sprint
    Board,
    /// Sprint list with progress
    Sprints,
}

/// What the caller should do with a command's reply.
#[derive(Debug)]
pub struct Reply {
    /// Text to print
    pub text: String,
    /// Whether the session should end
    pub quit: bool,
}

/// One interactive tracker session.
pub struct App {
    tracker: Tracker,
    view: View,
    dark_mode: bool,
    query: IssueQuery,
}

impl App {
    /// Start a fresh session on an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: Tracker::new(),
            view: View::Issues,
            dark_mode: false,
            query: IssueQuery::new(),
        }
    }

    /// Execute one command line and produce the reply to print.
    pub fn execute(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply {
                text: String::new(),
                quit: false,
            };
        }

        if matches!(line, "quit" | "exit") {
            return Reply {
                text: "bye".to_string(),
                quit: true,
            };
        }

        let text = self
            .dispatch(line)
            .unwrap_or_else(|error| format!("error: {error:#}"));
        Reply { text, quit: false }
    }

    fn dispatch(&mut self, line: &str) -> Result<String> {
        let (command, rest) = split_word(line);

        match command {
            "help" => Ok(HELP.to_string()),
            "show" => Ok(self.render_current()),
            "issues" => {
                self.view = View::Issues;
                Ok(self.render_current())
            }
            "board" => {
                self.view = View::Board;
                Ok(self.render_current())
            }
            "sprints" => {
                self.view = View::Sprints;
                Ok(self.render_current())
            }
            "new-issue" => self.new_issue(rest),
            "retitle" => self.retitle(rest),
            "describe" => self.describe(rest),
            "assign" => self.assign(rest),
            "move" => self.move_issue(rest),
            "delete" => self.delete(rest),
            "new-sprint" => self.new_sprint(rest),
            "start" => self.start_sprint(rest),
            "end" => self.end_sprint(rest),
            "search" => self.search(rest),
            "filter" => self.filter(rest),
            "sort" => self.sort(rest),
            "say" => self.say(rest),
            "theme" => Ok(self.toggle_theme()),
            _ => bail!("unknown command {command:?}; try \"help\""),
        }
    }

    fn render_current(&self) -> String {
        match self.view {
            View::Issues => render::issue_list(&self.tracker, &self.query),
            View::Board => render::board(&self.tracker),
            View::Sprints => render::sprint_list(&self.tracker),
        }
    }

    fn toggle_theme(&mut self) -> String {
        self.dark_mode = !self.dark_mode;
        let theme = if self.dark_mode { "dark" } else { "light" };
        info!(theme, "theme toggled");
        format!("theme: {theme}")
    }

    // ------------------------------------------------------------------
    // Issue commands
    // ------------------------------------------------------------------

    /// `new-issue <priority> <assignee> <title...>`
    fn new_issue(&mut self, rest: &str) -> Result<String> {
        let (priority, rest) = split_word(rest);
        let (assignee, title) = split_word(rest);

        let priority = parse_priority(priority)?;
        let assignee = Assignee::parse(assignee)?;
        let title = IssueTitle::parse(title)?;

        let id = self.tracker.create_issue(title, "", priority, assignee);
        Ok(format!("created {id}"))
    }

    /// `retitle <issue-id> <title...>`
    fn retitle(&mut self, rest: &str) -> Result<String> {
        let (id, title) = split_word(rest);
        let id = issue_id(id)?;
        let title = IssueTitle::parse(title)?;

        if self
            .tracker
            .update_issue(&id, IssueChanges::new().with_title(title))
        {
            Ok(format!("updated {id}"))
        } else {
            Ok(format!("no such issue {id}"))
        }
    }

    /// `describe <issue-id> <text...>`
    fn describe(&mut self, rest: &str) -> Result<String> {
        let (id, description) = split_word(rest);
        let id = issue_id(id)?;

        if self
            .tracker
            .update_issue(&id, IssueChanges::new().with_description(description))
        {
            Ok(format!("updated {id}"))
        } else {
            Ok(format!("no such issue {id}"))
        }
    }

    /// `assign <issue-id> <sprint-id|backlog>`
    fn assign(&mut self, rest: &str) -> Result<String> {
        let (id, target) = split_word(rest);
        let id = issue_id(id)?;

        let sprint_id = if target == "backlog" {
            None
        } else {
            let sprint_id = sprint_id(target)?;
            let sprint = self
                .tracker
                .sprint(&sprint_id)
                .ok_or_else(|| anyhow!("no such sprint {sprint_id}"))?;
            if !sprint.is_assignable() {
                bail!("sprint {sprint_id} is completed and no longer accepts issues");
            }
            Some(sprint_id)
        };

        if self.tracker.assign_issue_to_sprint(&id, sprint_id) {
            Ok(format!("assigned {id}"))
        } else {
            Ok(format!("no such issue {id}"))
        }
    }

    /// `move <issue-id> <status>`
    fn move_issue(&mut self, rest: &str) -> Result<String> {
        let (id, status) = split_word(rest);
        let id = issue_id(id)?;
        let status = parse_status(status)?;

        if self.tracker.update_issue_status(&id, status) {
            Ok(format!("moved {id} to {status}"))
        } else {
            Ok(format!("no such issue {id}"))
        }
    }

    /// `delete <issue-id|sprint-id>`
    fn delete(&mut self, rest: &str) -> Result<String> {
        let (id, _) = split_word(rest);

        if id.starts_with("SPR-") {
            let id = SprintId::new(id);
            if self.tracker.sprint(&id).is_none() {
                return Ok(format!("no such sprint {id}"));
            }
            self.tracker.delete_sprint(&id)?;
            Ok(format!("deleted {id}"))
        } else {
            let id = issue_id(id)?;
            if self.tracker.delete_issue(&id) {
                Ok(format!("deleted {id}"))
            } else {
                Ok(format!("no such issue {id}"))
            }
        }
    }

    // ------------------------------------------------------------------
    // Sprint commands
    // ------------------------------------------------------------------

    /// `new-sprint <start> <end> <name...>` with dates as `YYYY-MM-DD`
    fn new_sprint(&mut self, rest: &str) -> Result<String> {
        let (start, rest) = split_word(rest);
        let (end, name) = split_word(rest);

        let start: NaiveDate = start
            .parse()
            .with_context(|| format!("invalid start date {start:?}, expected YYYY-MM-DD"))?;
        let end: NaiveDate = end
            .parse()
            .with_context(|| format!("invalid end date {end:?}, expected YYYY-MM-DD"))?;
        let dates = SprintDates::new(start, end)?;
        let name = SprintName::parse(name)?;

        let id = self.tracker.create_sprint(name, dates);
        Ok(format!("created {id}"))
    }

    /// `start <sprint-id>`
    fn start_sprint(&mut self, rest: &str) -> Result<String> {
        let (id, _) = split_word(rest);
        let id = sprint_id(id)?;
        self.tracker.start_sprint(&id)?;
        Ok(format!("started {id}"))
    }

    /// `end <sprint-id>`
    fn end_sprint(&mut self, rest: &str) -> Result<String> {
        let (id, _) = split_word(rest);
        let id = sprint_id(id)?;
        self.tracker.end_sprint(&id)?;
        Ok(format!("ended {id}; unfinished issues returned to the backlog"))
    }

    // ------------------------------------------------------------------
    // Issue list query commands
    // ------------------------------------------------------------------

    /// `search [text...]` - empty text clears the search
    fn search(&mut self, rest: &str) -> Result<String> {
        self.query.search_text = rest.to_string();
        self.view = View::Issues;
        Ok(self.render_current())
    }

    /// `filter priority|status|sprint <value|all>`
    fn filter(&mut self, rest: &str) -> Result<String> {
        let (dimension, value) = split_word(rest);

        match dimension {
            "priority" => {
                self.query.priority = if value == "all" {
                    None
                } else {
                    Some(parse_priority(value)?)
                };
            }
            "status" => {
                self.query.status = if value == "all" {
                    None
                } else {
                    Some(parse_status(value)?)
                };
            }
            "sprint" => {
                self.query.sprint = match value {
                    "all" => SprintFilter::All,
                    "backlog" => SprintFilter::Backlog,
                    other => SprintFilter::Sprint(sprint_id(other)?),
                };
            }
            other => bail!("unknown filter {other:?}; use priority, status, or sprint"),
        }

        self.view = View::Issues;
        Ok(self.render_current())
    }

    /// `sort <field> [asc|desc]`
    fn sort(&mut self, rest: &str) -> Result<String> {
        let (field, direction) = split_word(rest);

        let field: SortField = field
            .parse()
            .map_err(|_| anyhow!("unknown sort field {field:?}"))?;
        let direction = match direction {
            "" => SortDirection::default(),
            other => other
                .parse::<SortDirection>()
                .map_err(|_| anyhow!("direction must be asc or desc, got {other:?}"))?,
        };

        self.query = self.query.clone().sorted_by(field, direction);
        self.view = View::Issues;
        Ok(self.render_current())
    }

    // ------------------------------------------------------------------
    // Voice commands
    // ------------------------------------------------------------------

    /// `say <transcript...>` - dispatch a voice transcript
    fn say(&mut self, transcript: &str) -> Result<String> {
        match voice::classify(transcript) {
            VoiceCommand::ShowIssues => {
                self.view = View::Issues;
                Ok(self.render_current())
            }
            VoiceCommand::ShowBoard => {
                self.view = View::Board;
                Ok(self.render_current())
            }
            VoiceCommand::ShowSprints => {
                self.view = View::Sprints;
                Ok(self.render_current())
            }
            VoiceCommand::ToggleTheme => Ok(self.toggle_theme()),
            VoiceCommand::Unrecognized(text) => Ok(format!(
                "voice command not recognized: {text:?}; try \"show issues\", \"show sprint\", or \"show sprints\""
            )),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (input, ""),
    }
}

fn issue_id(text: &str) -> Result<IssueId> {
    if text.starts_with("TSK-") {
        Ok(IssueId::new(text))
    } else {
        Err(anyhow!("expected an issue id like TSK-001, got {text:?}"))
    }
}

fn sprint_id(text: &str) -> Result<SprintId> {
    if text.starts_with("SPR-") {
        Ok(SprintId::new(text))
    } else {
        Err(anyhow!("expected a sprint id like SPR-001, got {text:?}"))
    }
}

fn parse_priority(text: &str) -> Result<Priority> {
    text.parse()
        .map_err(|_| anyhow!("unknown priority {text:?}; use P0 through P5"))
}

fn parse_status(text: &str) -> Result<IssueStatus> {
    text.to_lowercase()
        .parse()
        .map_err(|_| anyhow!("unknown status {text:?}; use todo, in-progress, in-review, or done"))
}

const HELP: &str = "\
commands:
  issues | board | sprints        switch view
  show                            redraw the current view
  new-issue <prio> <who> <title>  create an issue (P0..P5)
  retitle <id> <title>            change an issue title
  describe <id> <text>            change an issue description
  assign <id> <sprint|backlog>    move an issue between sprint and backlog
  move <id> <status>              todo | in-progress | in-review | done
  delete <id>                     delete an issue (TSK-*) or sprint (SPR-*)
  new-sprint <start> <end> <name> create a sprint (dates YYYY-MM-DD)
  start <id> | end <id>           sprint lifecycle
  search [text]                   filter the issue list, empty clears
  filter <dim> <value|all>        dim: priority, status, sprint
  sort <field> [asc|desc]         id, title, priority, status, assignee,
                                  created-at, updated-at
  say <text>                      dispatch a voice transcript
  theme                           toggle dark mode
  quit";
