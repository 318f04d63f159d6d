//! Gemini client for reflective journal insights.
//!
//! One deliberate failure-handling decision lives here: insight generation
//! never fails from the caller's perspective. Quota, network, and malformed
//! responses are logged and downgraded to a fixed fallback string, so the
//! editor always gets non-empty text back.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::util::compact_text;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const INSIGHT_MODEL: &str = "gemini-3-flash-preview";
const INSIGHT_TEMPERATURE: f64 = 0.7;
const INSIGHT_MAX_OUTPUT_TOKENS: u32 = 150;

/// Entries shorter than this are not worth sending to the model; the
/// editor blocks the request client-side with a hint instead.
pub const MIN_CONTENT_CHARS_FOR_INSIGHT: usize = 10;

const FALLBACK_INSIGHT: &str =
    "Unable to generate insight at the moment, but your reflection is valuable.";
const EMPTY_RESPONSE_INSIGHT: &str = "Keep writing! Every entry is a step toward clarity.";

/// Failures internal to insight generation. Never escapes
/// [`GeminiInsightClient::generate_insight`]; kept as a typed enum so the
/// log line says what actually went wrong.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API error: {0}")]
    Api(String),
}

#[derive(Clone)]
pub struct GeminiInsightClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiInsightClient {
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: crate::util::normalize_text_option(api_key),
            model: INSIGHT_MODEL.to_string(),
        }
    }

    /// Generate a short reflective insight for the given entry body.
    ///
    /// Always returns non-empty text: failures collapse into a fixed
    /// fallback message, an empty model response into an encouragement.
    /// No retry, no caching, no timeout beyond the HTTP client's own.
    pub async fn generate_insight(&self, content: &str) -> String {
        resolve_insight(self.request_insight(content).await)
    }

    async fn request_insight(&self, content: &str) -> Result<Option<String>, InsightError> {
        let api_key = self.api_key.as_deref().ok_or(InsightError::MissingApiKey)?;
        let url = format!(
            "{GEMINI_BASE_URL}/models/{}:generateContent?key={api_key}",
            self.model
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(content) }] }],
            "generationConfig": {
                "temperature": INSIGHT_TEMPERATURE,
                "maxOutputTokens": INSIGHT_MAX_OUTPUT_TOKENS,
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Api(format!(
                "{} ({})",
                compact_text(&body),
                status.as_u16()
            )));
        }

        let payload: GenerateContentResponse = response.json().await?;
        Ok(extract_text(&payload))
    }
}

/// Fixed prompt template; only the entry body varies.
fn build_prompt(content: &str) -> String {
    format!(
        "Act as a supportive, mindful journaling assistant. Analyze the following \
         journal entry and provide a brief (2-3 sentences), encouraging insight or \
         a reflective question to help the writer process their day.\n\n\
         Entry: \"{content}\""
    )
}

/// Collapse the request outcome into the guaranteed-non-empty contract.
fn resolve_insight(result: Result<Option<String>, InsightError>) -> String {
    match result {
        Ok(Some(text)) => text,
        Ok(None) => EMPTY_RESPONSE_INSIGHT.to_string(),
        Err(error) => {
            tracing::warn!("Insight generation failed: {}", error);
            FALLBACK_INSIGHT.to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// First candidate's text parts, concatenated and trimmed; `None` when the
/// response carried no usable text.
fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse_response(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let response = parse_response(
            r#"{"candidates":[{"content":{"parts":[{"text":"Notice how rest "},{"text":"changed your mood."}]}}]}"#,
        );
        assert_eq!(
            extract_text(&response).as_deref(),
            Some("Notice how rest changed your mood.")
        );
    }

    #[test]
    fn extract_text_treats_blank_response_as_none() {
        let response = parse_response(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#);
        assert_eq!(extract_text(&response), None);

        let response = parse_response(r"{}");
        assert_eq!(extract_text(&response), None);
    }

    #[test]
    fn resolve_insight_never_yields_empty_text() {
        let failed = resolve_insight(Err(InsightError::MissingApiKey));
        assert!(!failed.is_empty());
        assert_eq!(failed, FALLBACK_INSIGHT);

        let empty = resolve_insight(Ok(None));
        assert!(!empty.is_empty());
        assert_eq!(empty, EMPTY_RESPONSE_INSIGHT);

        let passthrough = resolve_insight(Ok(Some("A gentle day.".to_string())));
        assert_eq!(passthrough, "A gentle day.");
    }

    #[test]
    fn prompt_embeds_the_entry_body_once() {
        let prompt = build_prompt("Today I planted tomatoes.");
        assert!(prompt.contains("journaling assistant"));
        assert_eq!(prompt.matches("Today I planted tomatoes.").count(), 1);
    }

    #[test]
    fn unconfigured_client_normalizes_blank_keys() {
        let client = GeminiInsightClient::new(Some("   ".to_string()));
        assert!(client.api_key.is_none());
    }
}
