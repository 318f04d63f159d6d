//! Data models shared by all ZenJournal interfaces.

mod entry;
mod user;

pub use entry::{EntryId, JournalEntry, UNTITLED_ENTRY};
pub use user::User;
