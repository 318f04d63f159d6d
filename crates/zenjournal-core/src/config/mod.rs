//! Bootstrap configuration for client apps.
//!
//! The only configuration surface is two credential pairs supplied through
//! the environment: the Supabase endpoint + anon key, and the Gemini API
//! key. These are safe-to-ship public values; secret credentials never
//! live here.

use crate::util::normalize_text_option;

/// Environment-provisioned client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl BootstrapConfig {
    /// Read configuration from the process environment, treating blank
    /// values the same as unset ones.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            supabase_url: env_var_trimmed("SUPABASE_URL"),
            supabase_anon_key: env_var_trimmed("SUPABASE_ANON_KEY"),
            gemini_api_key: env_var_trimmed("GEMINI_API_KEY"),
        }
    }

    /// Build from raw values, normalizing blanks away. Used by tests and
    /// by callers that source config from somewhere other than the
    /// environment.
    #[must_use]
    pub fn from_raw(
        supabase_url: Option<String>,
        supabase_anon_key: Option<String>,
        gemini_api_key: Option<String>,
    ) -> Self {
        Self {
            supabase_url: normalize_text_option(supabase_url),
            supabase_anon_key: normalize_text_option(supabase_anon_key),
            gemini_api_key: normalize_text_option(gemini_api_key),
        }
    }

    /// Whether the Supabase side (auth + entry store) can be constructed.
    #[must_use]
    pub const fn has_supabase_config(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}

fn env_var_trimmed(name: &str) -> Option<String> {
    normalize_text_option(std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_raw_drops_blank_values() {
        let config = BootstrapConfig::from_raw(
            Some(" https://demo.supabase.co ".to_string()),
            Some(String::new()),
            None,
        );
        assert_eq!(
            config.supabase_url.as_deref(),
            Some("https://demo.supabase.co")
        );
        assert_eq!(config.supabase_anon_key, None);
        assert!(!config.has_supabase_config());
    }

    #[test]
    fn supabase_config_requires_both_values() {
        let config = BootstrapConfig::from_raw(
            Some("https://demo.supabase.co".to_string()),
            Some("anon-key".to_string()),
            None,
        );
        assert!(config.has_supabase_config());
    }
}
