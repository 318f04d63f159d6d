//! Supabase PostgREST client for the `entries` table.
//!
//! Translates between the remote row shape (snake_case, nullable text
//! columns) and [`JournalEntry`], and enforces the delete confirmation
//! policy: row-level security makes an unauthorized delete report success
//! with zero affected rows, so a delete that echoes no rows is an error
//! here, never a silent success.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EntryId, JournalEntry};
use crate::util::{compact_text, is_http_url};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Api(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Permission denied or entry not found in the remote store")]
    PermissionOrNotFound,
    #[error("No active session; sign in before accessing entries")]
    MissingSession,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone)]
pub struct EntryStore {
    entries_url: String,
    anon_key: String,
    client: Client,
}

impl EntryStore {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>) -> StoreResult<Self> {
        let rest_url = normalize_rest_url(url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }

        Ok(Self {
            entries_url: format!("{rest_url}/entries"),
            anon_key,
            client: Client::builder().build()?,
        })
    }

    /// Fetch all entries owned by `user_id`, newest first.
    ///
    /// Isolation is enforced remotely by row-level security; the `user_id`
    /// filter is still always sent so the query never relies on it alone.
    pub async fn get_entries(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> StoreResult<Vec<JournalEntry>> {
        let request = self
            .authed_request(self.client.get(&self.entries_url), access_token)
            .query(&entries_query(user_id));

        let rows: Vec<EntryRow> = self.send_store_request(request).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Persist an entry: insert when it has no id yet, update otherwise.
    ///
    /// The remote store assigns the id and creation timestamp on insert;
    /// this method returns the persisted shape echoed back by the store.
    /// Failures are returned raw and never retried.
    pub async fn save_entry(
        &self,
        access_token: &str,
        entry: &JournalEntry,
    ) -> StoreResult<JournalEntry> {
        let payload = entry_payload(entry, Utc::now());

        let request = match entry.id {
            Some(id) => self
                .client
                .patch(&self.entries_url)
                .query(&[("id", format!("eq.{id}"))]),
            None => self.client.post(&self.entries_url),
        };
        let request = self
            .authed_request(request, access_token)
            .header("Prefer", "return=representation")
            .json(&payload);

        let rows: Vec<EntryRow> = self.send_store_request(request).await?;
        let row = rows.into_iter().next().ok_or_else(|| {
            StoreError::Api("Save was accepted but the store returned no row".to_string())
        })?;
        Ok(row.into())
    }

    /// Delete an entry by id, requiring the store to echo the deleted row.
    ///
    /// Zero echoed rows means row-level security filtered the delete out
    /// (wrong owner or missing id) even though the request "succeeded";
    /// that is reported as [`StoreError::PermissionOrNotFound`].
    pub async fn delete_entry(&self, access_token: &str, id: EntryId) -> StoreResult<()> {
        tracing::debug!("Deleting entry {}", id);

        let request = self
            .authed_request(self.client.delete(&self.entries_url), access_token)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");

        let rows: Vec<EntryRow> = self.send_store_request(request).await?;
        confirm_delete(&rows)
    }

    fn authed_request(&self, request: RequestBuilder, access_token: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }

    async fn send_store_request<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> StoreResult<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(parse_store_error(status, &body)));
        }
        Ok(response.json::<T>().await?)
    }
}

/// Query parameters for the owner-scoped, newest-first entries listing.
fn entries_query(user_id: &str) -> Vec<(String, String)> {
    vec![
        ("select".to_string(), "*".to_string()),
        ("user_id".to_string(), format!("eq.{user_id}")),
        ("order".to_string(), "created_at.desc".to_string()),
    ]
}

/// Map the echoed delete rows onto the confirmation policy.
fn confirm_delete(rows: &[EntryRow]) -> StoreResult<()> {
    if rows.is_empty() {
        tracing::warn!("Delete request affected no rows; treating as permission failure");
        return Err(StoreError::PermissionOrNotFound);
    }
    Ok(())
}

pub fn normalize_rest_url(url: &str) -> StoreResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !is_http_url(trimmed) {
        return Err(StoreError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/rest/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/rest/v1"))
    }
}

/// The `entries` row as the store sends it: snake_case columns with the
/// three text fields nullable.
#[derive(Debug, Clone, Deserialize)]
struct EntryRow {
    id: EntryId,
    user_id: String,
    title: Option<String>,
    content: Option<String>,
    ai_insight: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EntryRow> for JournalEntry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: Some(row.id),
            user_id: row.user_id,
            title: row.title.unwrap_or_default(),
            content: row.content.unwrap_or_default(),
            ai_insight: row.ai_insight.unwrap_or_default(),
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

/// Write payload for inserts and updates.
///
/// Never carries `id` or `created_at`: the store assigns both on insert,
/// and an update must not rewrite the creation timestamp.
#[derive(Debug, Serialize)]
struct EntryPayload<'a> {
    user_id: &'a str,
    title: &'a str,
    content: &'a str,
    ai_insight: &'a str,
    updated_at: DateTime<Utc>,
}

fn entry_payload<'a>(entry: &'a JournalEntry, updated_at: DateTime<Utc>) -> EntryPayload<'a> {
    EntryPayload {
        user_id: &entry.user_id,
        title: &entry.title,
        content: &entry.content,
        ai_insight: &entry.ai_insight,
        updated_at,
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorResponse {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn parse_store_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<PostgrestErrorResponse>(body) {
        if let Some(message) = payload.message.or(payload.details).or(payload.hint) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_row(title: Option<&str>) -> EntryRow {
        EntryRow {
            id: "0192d3f0-2f5b-7c3e-9a4d-0b1c2d3e4f50".parse().unwrap(),
            user_id: "user-1".to_string(),
            title: title.map(ToString::to_string),
            content: Some("Walked in the rain.".to_string()),
            ai_insight: None,
            created_at: "2026-08-20T08:00:00Z".parse().unwrap(),
            updated_at: "2026-08-21T19:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn normalize_rest_url_appends_rest_path() {
        let normalized = normalize_rest_url("https://demo.supabase.co").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn normalize_rest_url_keeps_existing_rest_path() {
        let normalized = normalize_rest_url("https://demo.supabase.co/rest/v1/").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn entries_query_filters_by_owner_and_orders_newest_first() {
        let query = entries_query("user-1");
        assert!(query.contains(&("user_id".to_string(), "eq.user-1".to_string())));
        assert!(query.contains(&("order".to_string(), "created_at.desc".to_string())));
    }

    #[test]
    fn row_translation_defaults_nullable_text_fields() {
        let entry: JournalEntry = sample_row(None).into();
        assert_eq!(entry.title, "");
        assert_eq!(entry.ai_insight, "");
        assert_eq!(entry.content, "Walked in the rain.");
        assert!(entry.is_persisted());
        assert!(entry.created_at.unwrap() < entry.updated_at.unwrap());
    }

    #[test]
    fn row_translation_preserves_present_fields() {
        let entry: JournalEntry = sample_row(Some("A wet walk")).into();
        assert_eq!(entry.title, "A wet walk");
        assert_eq!(entry.user_id, "user-1");
    }

    #[test]
    fn write_payload_never_carries_id_or_created_at() {
        let mut entry = JournalEntry::draft("user-1");
        entry.title = "Morning pages".to_string();
        entry.content = "Slow start, good coffee.".to_string();
        let now = Utc::now();

        let serialized = serde_json::to_value(entry_payload(&entry, now)).unwrap();
        let object = serialized.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("created_at"));
        assert_eq!(object["user_id"], "user-1");
        assert_eq!(object["content"], "Slow start, good coffee.");
        assert!(object.contains_key("updated_at"));
    }

    #[test]
    fn update_payload_is_shaped_like_insert_payload() {
        // Same payload for both verbs: the id travels in the query string
        // on update, and the creation timestamp is never rewritten.
        let mut entry: JournalEntry = sample_row(Some("A wet walk")).into();
        entry.ai_insight = "Rain can be restful.".to_string();

        let serialized = serde_json::to_value(entry_payload(&entry, Utc::now())).unwrap();
        let object = serialized.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("created_at"));
        assert_eq!(object["ai_insight"], "Rain can be restful.");
    }

    #[test]
    fn delete_with_zero_echoed_rows_is_a_permission_error() {
        let result = confirm_delete(&[]);
        assert!(matches!(result, Err(StoreError::PermissionOrNotFound)));
    }

    #[test]
    fn delete_with_one_echoed_row_succeeds() {
        assert!(confirm_delete(&[sample_row(None)]).is_ok());
    }

    #[test]
    fn auth_failures_carry_their_own_error_class() {
        let error = StoreError::Auth("refresh token was rejected".to_string());
        assert_eq!(
            error.to_string(),
            "Authentication failed: refresh token was rejected"
        );
        assert!(!matches!(error, StoreError::Api(_)));
    }

    #[test]
    fn parse_store_error_prefers_postgrest_message() {
        let body = r#"{"message":"duplicate key value violates unique constraint","code":"23505"}"#;
        assert_eq!(
            parse_store_error(StatusCode::CONFLICT, body),
            "duplicate key value violates unique constraint (409)"
        );
    }

    #[test]
    fn parse_store_error_truncates_unstructured_bodies() {
        let noise = "x".repeat(400);
        let parsed = parse_store_error(StatusCode::INTERNAL_SERVER_ERROR, &noise);
        assert!(parsed.len() < 200);
        assert!(parsed.ends_with("(500)"));
    }
}
