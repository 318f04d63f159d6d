//! Journal entry model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title shown for entries that were saved without one.
pub const UNTITLED_ENTRY: &str = "Untitled Entry";

/// A unique identifier for a journal entry.
///
/// Ids are assigned by the remote store on first save; the client never
/// generates one itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A single dated journal entry owned by one user.
///
/// The remote store is the sole enforcer of per-user isolation; `user_id`
/// only ties the entry to its owner for queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Server-assigned identifier; `None` until the first successful save
    pub id: Option<EntryId>,
    /// Auth id of the owning user
    pub user_id: String,
    /// Entry title (may be empty)
    pub title: String,
    /// Entry body
    pub content: String,
    /// AI-generated reflection attached to this entry (empty when absent)
    pub ai_insight: String,
    /// Server-assigned creation timestamp
    pub created_at: Option<DateTime<Utc>>,
    /// Timestamp of the most recent save
    pub updated_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    /// Create an in-memory draft entry for the given user.
    ///
    /// Drafts have no id and no timestamps until the remote store persists
    /// them.
    #[must_use]
    pub fn draft(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            title: String::new(),
            content: String::new(),
            ai_insight: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether this entry has been persisted remotely at least once.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Check if entry content is empty (whitespace-only counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Title for display, falling back to [`UNTITLED_ENTRY`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_ENTRY
        } else {
            &self.title
        }
    }

    /// Get the entry body truncated to `max_len` characters for list cards.
    #[must_use]
    pub fn content_preview(&self, max_len: usize) -> String {
        self.content.trim().chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn entry_id_parse_round_trip() {
        let id: EntryId = "0192d3f0-2f5b-7c3e-9a4d-0b1c2d3e4f50".parse().unwrap();
        let reparsed: EntryId = id.as_str().parse().unwrap();
        assert_eq!(id, reparsed);
    }

    #[test]
    fn entry_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<EntryId>().is_err());
    }

    #[test]
    fn draft_starts_unpersisted_and_empty() {
        let draft = JournalEntry::draft("user-1");
        assert!(!draft.is_persisted());
        assert!(draft.is_empty());
        assert_eq!(draft.user_id, "user-1");
        assert_eq!(draft.created_at, None);
    }

    #[test]
    fn whitespace_content_counts_as_empty() {
        let mut entry = JournalEntry::draft("user-1");
        entry.content = "   \n\t".to_string();
        assert!(entry.is_empty());

        entry.content = "Today was calm.".to_string();
        assert!(!entry.is_empty());
    }

    #[test]
    fn display_title_falls_back_when_blank() {
        let mut entry = JournalEntry::draft("user-1");
        assert_eq!(entry.display_title(), UNTITLED_ENTRY);

        entry.title = "  ".to_string();
        assert_eq!(entry.display_title(), UNTITLED_ENTRY);

        entry.title = "A quiet morning".to_string();
        assert_eq!(entry.display_title(), "A quiet morning");
    }

    #[test]
    fn content_preview_truncates_by_characters() {
        let mut entry = JournalEntry::draft("user-1");
        entry.content = "  Slept in, walked by the river, read for an hour.  ".to_string();
        assert_eq!(entry.content_preview(8), "Slept in");
        assert_eq!(
            entry.content_preview(200),
            "Slept in, walked by the river, read for an hour."
        );
    }
}
