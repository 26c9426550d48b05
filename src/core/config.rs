//! Configuration for the remote map services
//!
//! Keys and endpoints are gathered into one [`ServiceConfig`] value that is
//! handed to the HTTP client when it is built. Defaults point at the public
//! Yandex endpoints; `from_env` fills in the API keys from the process
//! environment and a `.env` file in the working directory.

use crate::{MapError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the geocoder API key
pub const GEOCODER_KEY_VAR: &str = "GEOCODER_APIKEY";
/// Environment variable holding the organization search API key
pub const ORGANIZATION_KEY_VAR: &str = "ORGANIZATION_APIKEY";
/// Optional request timeout override, in whole seconds
pub const TIMEOUT_VAR: &str = "MAPVIEW_HTTP_TIMEOUT_SECS";

/// Key used when the environment does not provide one
pub const FALLBACK_API_KEY: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub static_map_url: String,
    pub geocoder_url: String,
    pub search_url: String,
    pub geocoder_api_key: String,
    pub search_api_key: String,
    /// Free text sent to the organization search
    pub search_text: String,
    pub search_lang: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ServiceConfig {
    /// Default endpoints with API keys read from the environment.
    ///
    /// A `.env` file in the working directory (or any parent) is loaded
    /// first. Variables already set in the process win over the file.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("loaded variables from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(MapError::Config(format!("could not read .env: {e}"))),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads the given env file
    /// without touching the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_vars = dotenvy::from_path_iter(path)
            .and_then(|iter| iter.collect::<std::result::Result<HashMap<_, _>, _>>())
            .map_err(|e| MapError::Config(format!("could not read {}: {e}", path.display())))?;

        Self::from_lookup(|name| std::env::var(name).ok().or_else(|| file_vars.get(name).cloned()))
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(GEOCODER_KEY_VAR) {
            config.geocoder_api_key = key;
        } else {
            log::warn!("{GEOCODER_KEY_VAR} is not set, using the fallback key");
        }
        if let Some(key) = lookup(ORGANIZATION_KEY_VAR) {
            config.search_api_key = key;
        } else {
            log::warn!("{ORGANIZATION_KEY_VAR} is not set, using the fallback key");
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| MapError::Config(format!("{TIMEOUT_VAR} must be whole seconds, got {raw:?}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_api_keys(mut self, geocoder: impl Into<String>, search: impl Into<String>) -> Self {
        self.geocoder_api_key = geocoder.into();
        self.search_api_key = search.into();
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            static_map_url: "http://static-maps.yandex.ru/1.x/".to_string(),
            geocoder_url: "http://geocode-maps.yandex.ru/1.x/".to_string(),
            search_url: "https://search-maps.yandex.ru/v1/".to_string(),
            geocoder_api_key: FALLBACK_API_KEY.to_string(),
            search_api_key: FALLBACK_API_KEY.to_string(),
            search_text: "аптека".to_string(),
            search_lang: "ru_RU".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("mapview/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_fallback_keys() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.geocoder_api_key, "default");
        assert_eq!(config.search_api_key, "default");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_keys_from_lookup() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("GEOCODER_APIKEY", "geo-key"),
            ("ORGANIZATION_APIKEY", "org-key"),
            ("MAPVIEW_HTTP_TIMEOUT_SECS", " 3 "),
        ]))
        .unwrap();
        assert_eq!(config.geocoder_api_key, "geo-key");
        assert_eq!(config.search_api_key, "org-key");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let result = ServiceConfig::from_lookup(lookup_from(&[("MAPVIEW_HTTP_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_keys_from_env_file() {
        let dir = std::env::temp_dir().join(format!("mapview-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        std::fs::write(
            &path,
            "# keys for the viewer\nMAPVIEW_TEST_UNUSED=1\nGEOCODER_APIKEY=from-dotenv\nORGANIZATION_APIKEY=\"org from dotenv\"\n",
        )
        .unwrap();

        let config = ServiceConfig::from_env_file(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        if std::env::var(GEOCODER_KEY_VAR).is_err() {
            assert_eq!(config.geocoder_api_key, "from-dotenv");
        }
        if std::env::var(ORGANIZATION_KEY_VAR).is_err() {
            assert_eq!(config.search_api_key, "org from dotenv");
        }
    }

    #[test]
    fn test_missing_env_file_is_a_config_error() {
        let result = ServiceConfig::from_env_file("/nonexistent/mapview/.env");
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_builder_methods() {
        let config = ServiceConfig::default()
            .with_api_keys("a", "b")
            .with_search_text("cafe")
            .with_timeout(Duration::from_secs(1));
        assert_eq!(config.geocoder_api_key, "a");
        assert_eq!(config.search_api_key, "b");
        assert_eq!(config.search_text, "cafe");
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
