//! Entry persistence service.
//!
//! Combines the auth session with the PostgREST entry store: every call
//! restores the current session (refreshing it when expired) and passes
//! its access token to the store client.

use zenjournal_core::auth::resolve_optional_supabase_config;
use zenjournal_core::config::BootstrapConfig;
use zenjournal_core::store::{EntryStore, StoreError, StoreResult};
use zenjournal_core::{EntryId, JournalEntry};

use super::SupabaseAuthService;

#[derive(Clone)]
pub struct EntryService {
    auth: SupabaseAuthService,
    store: EntryStore,
}

impl EntryService {
    /// Build from the bootstrap config, sharing the given auth service for
    /// session access. `None` when Supabase is not configured.
    pub fn new_from_config(
        config: &BootstrapConfig,
        auth: SupabaseAuthService,
    ) -> StoreResult<Option<Self>> {
        let resolved = resolve_optional_supabase_config(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
        )
        .map_err(|error| StoreError::Auth(error.to_string()))?;

        let Some((url, anon_key)) = resolved else {
            return Ok(None);
        };

        Ok(Some(Self {
            auth,
            store: EntryStore::new(url, anon_key)?,
        }))
    }

    pub async fn get_entries(&self, user_id: &str) -> StoreResult<Vec<JournalEntry>> {
        let token = self.access_token().await?;
        self.store.get_entries(&token, user_id).await
    }

    pub async fn save_entry(&self, entry: &JournalEntry) -> StoreResult<JournalEntry> {
        let token = self.access_token().await?;
        self.store.save_entry(&token, entry).await
    }

    pub async fn delete_entry(&self, id: EntryId) -> StoreResult<()> {
        let token = self.access_token().await?;
        self.store.delete_entry(&token, id).await
    }

    // Auth failures keep their own error class instead of masquerading as
    // backend API errors.
    async fn access_token(&self) -> StoreResult<String> {
        let session = self
            .auth
            .restore_session()
            .await
            .map_err(|error| StoreError::Auth(error.to_string()))?
            .ok_or(StoreError::MissingSession)?;
        Ok(session.access_token)
    }
}
