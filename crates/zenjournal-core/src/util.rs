//! Small text and time helpers shared by the service clients.

/// Treat a blank or whitespace-only optional value as absent.
///
/// Configuration values and signup metadata arrive as `Option<String>`
/// where `Some("  ")` means the same thing as `None`; this collapses the
/// two.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Whether a configured endpoint carries an explicit http(s) scheme.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

/// Shorten an arbitrary response body into something fit for an error
/// message. Caps at 180 characters so an HTML error page never floods a
/// status line.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Seconds since the Unix epoch, for session expiry comparisons.
pub fn unix_timestamp_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_config_values_normalize_to_absent() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some(String::new())), None);
        assert_eq!(normalize_text_option(Some("\t \n".to_string())), None);
    }

    #[test]
    fn padded_config_values_come_back_trimmed() {
        assert_eq!(
            normalize_text_option(Some("  https://demo.supabase.co  ".to_string())),
            Some("https://demo.supabase.co".to_string())
        );
        assert_eq!(
            normalize_text_option(Some(" Mina ".to_string())),
            Some("Mina".to_string())
        );
    }

    #[test]
    fn is_http_url_requires_an_explicit_scheme() {
        assert!(is_http_url("https://demo.supabase.co"));
        assert!(is_http_url("http://localhost:54321"));
        assert!(!is_http_url("demo.supabase.co"));
        assert!(!is_http_url("wss://demo.supabase.co"));
    }

    #[test]
    fn compact_text_caps_long_bodies() {
        let page = format!("  <html>{}</html>  ", "x".repeat(500));
        let compacted = compact_text(&page);
        assert_eq!(compacted.chars().count(), 180);
        assert!(compacted.starts_with("<html>"));

        assert_eq!(
            compact_text("  invalid login credentials  "),
            "invalid login credentials"
        );
    }
}
