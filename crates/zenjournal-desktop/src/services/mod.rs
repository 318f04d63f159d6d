//! Remote service wiring for the desktop app.
//!
//! Thin wrappers around the zenjournal-core clients that add what only the
//! desktop knows: where sessions are persisted and how the pieces are
//! assembled from the bootstrap configuration.

mod auth;
mod entries;

pub use auth::{AuthEvent, SignUpOutcome, SupabaseAuthService};
pub use entries::EntryService;
