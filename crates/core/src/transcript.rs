use chrono::{DateTime, Local};
use serde::Serialize;

use crate::response::ResponseDescriptor;
use crate::scheduler::Owner;

/// Stable identity of a transcript entry
///
/// Ids are never reused, so timers owned by a removed entry can be told
/// apart from those of its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(u64);

impl EntryId {
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Scheduler owner for timers driving this entry's animations
    pub fn owner(self) -> Owner {
        Owner::new(self.0)
    }
}

/// One executed command and its response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub id: EntryId,
    /// Raw input as typed; empty for system entries
    pub command_text: String,
    pub response: ResponseDescriptor,
    pub created_at: DateTime<Local>,
}

impl TranscriptEntry {
    pub fn is_system(&self) -> bool {
        self.command_text.is_empty()
    }
}

/// Ordered log of executed commands
///
/// Append-only, except for [`Transcript::reset`] which replaces everything
/// with a single system entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
}

impl Transcript {
    /// Create a transcript holding only the welcome entry
    pub fn new(welcome: ResponseDescriptor, now: DateTime<Local>) -> Self {
        let mut transcript = Self { entries: Vec::with_capacity(32), next_id: 1 };
        transcript.push(String::new(), welcome, now);
        transcript
    }

    fn push(&mut self, command_text: String, response: ResponseDescriptor, created_at: DateTime<Local>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TranscriptEntry { id, command_text, response, created_at });
        id
    }

    /// Append an executed command
    pub fn append(
        &mut self, command_text: impl Into<String>, response: ResponseDescriptor, now: DateTime<Local>,
    ) -> EntryId {
        self.push(command_text.into(), response, now)
    }

    /// Replace every entry with a fresh welcome entry; returns the ids removed
    pub fn reset(&mut self, welcome: ResponseDescriptor, now: DateTime<Local>) -> Vec<EntryId> {
        let removed = self.entries.drain(..).map(|e| e.id).collect();
        self.push(String::new(), welcome, now);
        removed
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&TranscriptEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty command texts, oldest first (the recall history)
    pub fn commands(&self) -> Vec<&str> {
        self.entries.iter().filter(|e| !e.is_system()).map(|e| e.command_text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ResponseDescriptor {
        ResponseDescriptor::PlainText(s.to_string())
    }

    #[test]
    fn test_new_has_welcome() {
        let transcript = Transcript::new(text("welcome"), Local::now());
        assert_eq!(transcript.len(), 1);
        assert!(transcript.entries()[0].is_system());
        assert!(transcript.commands().is_empty());
    }

    #[test]
    fn test_append_and_commands() {
        let mut transcript = Transcript::new(text("welcome"), Local::now());
        let a = transcript.append("help", text("a"), Local::now());
        let b = transcript.append("pwd", text("b"), Local::now());

        assert!(a < b);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.commands(), vec!["help", "pwd"]);
        assert_eq!(transcript.get(b).unwrap().response, text("b"));
        assert_eq!(transcript.last().unwrap().id, b);
    }

    #[test]
    fn test_reset_returns_removed_ids_and_never_reuses() {
        let mut transcript = Transcript::new(text("welcome"), Local::now());
        let first = transcript.entries()[0].id;
        let a = transcript.append("help", text("a"), Local::now());

        let removed = transcript.reset(text("welcome"), Local::now());
        assert_eq!(removed, vec![first, a]);
        assert_eq!(transcript.len(), 1);

        let fresh = transcript.entries()[0].id;
        assert!(fresh > a);
        assert!(transcript.get(a).is_none());
    }

    #[test]
    fn test_owner_per_entry() {
        let mut transcript = Transcript::new(text("welcome"), Local::now());
        let a = transcript.append("a", text("a"), Local::now());
        let b = transcript.append("b", text("b"), Local::now());
        assert_ne!(a.owner(), b.owner());
        assert_ne!(a.owner(), Owner::ROOT);
    }
}
