//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Quiz Session Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::SessionStarted {
                    session_id,
                    themes,
                    players,
                    bombs_allowed,
                    ..
                } => {
                    out.push_str(&format!("## Session {session_id}\n\n"));
                    out.push_str(&format!(
                        "{themes} themes, {players} players, {bombs_allowed} bombs\n\n"
                    ));
                }
                JournalEntry::QuestionDrawn {
                    requested,
                    drawn,
                    points,
                    is_bomb,
                    ..
                } => {
                    if *is_bomb {
                        out.push_str(&format!(
                            "### {drawn} (**bomb**, asked for {requested})\n\n"
                        ));
                    } else {
                        out.push_str(&format!("### {drawn} ({points} pts)\n\n"));
                    }
                }
                JournalEntry::ScoreApplied {
                    player,
                    policy,
                    multiplier,
                    before,
                    after,
                    ..
                } => {
                    out.push_str(&format!(
                        "- **{player}** {policy} ({multiplier}x): {before} -> {after}\n"
                    ));
                }
                JournalEntry::BombDetonated {
                    player,
                    outcome,
                    before,
                    after,
                    ..
                } => {
                    out.push_str(&format!(
                        "- **{player}** bomb, {outcome}: {before} -> {after}\n"
                    ));
                }
                JournalEntry::AnswerRecorded { slot, .. } => {
                    out.push_str(&format!("\n*{slot} done*\n\n"));
                }
                JournalEntry::QuestionAbandoned { slot, .. } => {
                    out.push_str(&format!("\n*{slot} abandoned*\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Quiz Session Journal\n====================\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::SessionStarted {
                    session_id,
                    themes,
                    players,
                    bombs_allowed,
                    ..
                } => {
                    out.push_str(&format!("Session {session_id}\n"));
                    out.push_str(&format!(
                        "{themes} themes, {players} players, {bombs_allowed} bombs\n\n"
                    ));
                }
                JournalEntry::QuestionDrawn {
                    requested,
                    drawn,
                    points,
                    is_bomb,
                    ..
                } => {
                    if *is_bomb {
                        out.push_str(&format!("--- {drawn} (BOMB, asked for {requested}) ---\n"));
                    } else {
                        out.push_str(&format!("--- {drawn} ({points} pts) ---\n"));
                    }
                }
                JournalEntry::ScoreApplied {
                    player,
                    policy,
                    multiplier,
                    before,
                    after,
                    ..
                } => {
                    out.push_str(&format!(
                        "{player}: {policy} ({multiplier}x) {before} -> {after}\n"
                    ));
                }
                JournalEntry::BombDetonated {
                    player,
                    outcome,
                    before,
                    after,
                    ..
                } => {
                    out.push_str(&format!("{player}: bomb, {outcome} {before} -> {after}\n"));
                }
                JournalEntry::AnswerRecorded { slot, .. } => {
                    out.push_str(&format!("Recorded: {slot}\n\n"));
                }
                JournalEntry::QuestionAbandoned { slot, .. } => {
                    out.push_str(&format!("Abandoned: {slot}\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as pretty-printed JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
