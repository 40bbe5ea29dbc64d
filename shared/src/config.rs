//! Client configuration.

use crate::toast::DEFAULT_TOAST_DURATION_MS;

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "https://agendai-backend.onrender.com";

/// Largest avatar the backend accepts
pub const DEFAULT_MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub api_base_url: String,
    /// How long a toast stays on screen
    pub toast_duration_ms: u32,
    /// Upper bound for avatar uploads, checked before the request is sent
    pub max_avatar_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            max_avatar_bytes: DEFAULT_MAX_AVATAR_BYTES,
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at another backend. Blank values keep the default URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }
        Self {
            api_base_url: trimmed.to_string(),
            ..Self::default()
        }
    }

    /// Configuration from an optional override, typically a build-time env var
    pub fn from_override(base_url: Option<&str>) -> Self {
        base_url.map(Self::with_base_url).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "https://agendai-backend.onrender.com");
        assert_eq!(config.toast_duration_ms, 5000);
        assert_eq!(config.max_avatar_bytes, 5_242_880);
    }

    #[test]
    fn test_base_url_override() {
        assert_eq!(
            ClientConfig::with_base_url("http://localhost:5000/api/").api_base_url,
            "http://localhost:5000/api"
        );
        assert_eq!(ClientConfig::from_override(Some("  ")), ClientConfig::default());
        assert_eq!(ClientConfig::from_override(None), ClientConfig::default());
    }
}
