use std::path::Path;

use serde::Serialize;

use crate::{args::ConfigArgs, session::Session};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub api_url: String,
    pub session_path: String,
    pub logged_in: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: "./session.toml".to_string(),
            logged_in: false,
        }
    }
}

impl AppConfig {
    /// Resolution order for the API URL: flag/env, then the URL the session
    /// was created against, then the default.
    pub fn from_args(args: &ConfigArgs, session_path: &Path, session: Option<&Session>) -> Self {
        let defaults = AppConfig::default();

        let api_url = args
            .api_url
            .clone()
            .or_else(|| session.and_then(|s| s.api_url.clone()))
            .unwrap_or(defaults.api_url);

        AppConfig {
            api_url,
            session_path: session_path
                .to_str()
                .map(|p| p.to_string())
                .unwrap_or(defaults.session_path),
            logged_in: session.is_some(),
        }
    }

    /// Origin the service serves images from (the API URL without its
    /// trailing `/api` segment).
    pub fn image_origin(&self) -> &str {
        self.api_url
            .strip_suffix("/api")
            .unwrap_or(&self.api_url)
            .trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(api_url: Option<&str>) -> ConfigArgs {
        ConfigArgs {
            api_url: api_url.map(|s| s.to_string()),
            session_path: None,
        }
    }

    #[test]
    fn test_flag_wins_over_session_url() {
        let session = Session {
            user: rehome_core::UserProfile {
                id: 1,
                username: "u".to_string(),
                display_name: "U".to_string(),
                email: "u@example.com".to_string(),
                phone: "050-0000000".to_string(),
            },
            api_url: Some("http://stored:9999/api".to_string()),
        };

        let config = AppConfig::from_args(
            &args(Some("http://flag:1234/api")),
            Path::new("/tmp/session.toml"),
            Some(&session),
        );

        assert_eq!(config.api_url, "http://flag:1234/api");
        assert!(config.logged_in);
    }

    #[test]
    fn test_defaults_without_session() {
        let config = AppConfig::from_args(&args(None), Path::new("/tmp/session.toml"), None);

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(!config.logged_in);
    }

    #[test]
    fn test_image_origin_strips_api_suffix() {
        let mut config = AppConfig::default();
        config.api_url = "http://localhost:8080/api".to_string();

        assert_eq!(config.image_origin(), "http://localhost:8080");
    }
}
