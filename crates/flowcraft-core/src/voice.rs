//! Voice command mapping.
//!
//! Speech recognition is an external capability; once it hands back a
//! free-text transcript, this classifier maps it onto a small fixed set
//! of navigation actions by case-insensitive substring match. That
//! mapping is the entire contract between the tracker and the speech
//! component.

/// Action resolved from a voice transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    /// Navigate to the issue list
    ShowIssues,
    /// Navigate to the kanban board of the current sprint
    ShowBoard,
    /// Navigate to the sprint list
    ShowSprints,
    /// Toggle between light and dark theme
    ToggleTheme,
    /// Nothing matched; the transcript is kept for the notice
    Unrecognized(String),
}

/// Classify a transcript.
///
/// "show sprints" contains "show sprint", so the sprint-list patterns
/// must be checked before the board patterns.
#[must_use]
pub fn classify(transcript: &str) -> VoiceCommand {
    let text = transcript.to_lowercase();

    if text.contains("show issues") || text.contains("issues view") {
        VoiceCommand::ShowIssues
    } else if text.contains("show sprints") || text.contains("sprints view") {
        VoiceCommand::ShowSprints
    } else if text.contains("show sprint") || text.contains("current sprint") {
        VoiceCommand::ShowBoard
    } else if text.contains("dark mode") || text.contains("toggle theme") {
        VoiceCommand::ToggleTheme
    } else {
        VoiceCommand::Unrecognized(transcript.to_string())
    }
}
