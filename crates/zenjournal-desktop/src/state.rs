//! Application state management
//!
//! Global state accessible via Dioxus context providers. The current user
//! is the single source of truth for auth: every view renders from it, and
//! it only changes through the root controller's two transitions (explicit
//! sign-in/out and external auth notifications).

use std::sync::Arc;

use dioxus::prelude::*;

use zenjournal_core::insight::GeminiInsightClient;
use zenjournal_core::{JournalEntry, User};

use crate::services::{EntryService, SupabaseAuthService};

/// Top-level page the root controller is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Landing,
    Dashboard,
    New,
    Edit,
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Current page in the landing/dashboard/editor state machine
    pub page: Signal<Page>,
    /// Signed-in user, if any
    pub current_user: Signal<Option<User>>,
    /// Entry loaded into the editor; `None` when composing a new one
    pub editing_entry: Signal<Option<JournalEntry>>,
    /// Auth service if Supabase is configured for this build
    pub auth_service: Signal<Option<Arc<SupabaseAuthService>>>,
    /// Entry persistence service, present alongside the auth service
    pub entry_service: Signal<Option<Arc<EntryService>>>,
    /// Gemini insight client (works in fallback mode without a key)
    pub insight_client: Signal<Option<Arc<GeminiInsightClient>>>,
    /// Last service initialization error for UI display
    pub init_error: Signal<Option<String>>,
}

impl AppState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        (self.current_user)().is_some()
    }

    /// Open the editor with a blank draft.
    pub fn navigate_new(&mut self) {
        self.editing_entry.set(None);
        self.page.set(Page::New);
    }

    /// Open the editor for an existing entry.
    pub fn navigate_edit(&mut self, entry: JournalEntry) {
        self.editing_entry.set(Some(entry));
        self.page.set(Page::Edit);
    }

    pub fn navigate_dashboard(&mut self) {
        self.editing_entry.set(None);
        self.page.set(Page::Dashboard);
    }

    pub fn navigate_landing(&mut self) {
        self.editing_entry.set(None);
        self.page.set(Page::Landing);
    }
}
