//! zenjournal-core - Core library for ZenJournal
//!
//! This crate contains the shared models and the remote service clients
//! (Supabase auth, Supabase entry store, Gemini insights) used by the
//! ZenJournal interfaces.

pub mod auth;
pub mod config;
pub mod insight;
pub mod models;
pub mod store;
pub mod util;

pub use models::{EntryId, JournalEntry, User};
