//! Client configuration and settings-file discovery for `.notion-mcp.toml`.
//!
//! Checks two locations in precedence order unless a path is given explicitly:
//! 1. `./.notion-mcp.toml` (project-local)
//! 2. `~/.config/notion-mcp.toml` (user-global)
//!
//! The credential never lives in the settings file; it comes from `NOTION_API_KEY`.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{NotionError, NotionResult};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_API_VERSION: &str = "2022-06-28";

pub const API_KEY_ENV: &str = "NOTION_API_KEY";
pub const BASE_URL_ENV: &str = "NOTION_BASE_URL";
pub const API_VERSION_ENV: &str = "NOTION_VERSION";

const SETTINGS_FILENAME: &str = ".notion-mcp.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_SETTINGS_FILENAME: &str = "notion-mcp.toml";

/// Non-secret settings read from a TOML file.
///
/// ```toml
/// base-url = "https://api.notion.com/v1"
/// api-version = "2022-06-28"
/// timeout-ms = 30000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NotionSettings {
    pub base_url: String,
    pub api_version: String,
    /// Per-request timeout. Unset means requests wait as long as the connection allows.
    pub timeout_ms: Option<u64>,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: None,
        }
    }
}

impl NotionSettings {
    pub fn from_toml(contents: &str) -> NotionResult<Self> {
        toml::from_str(contents).map_err(|e| NotionError::config(format!("Invalid settings: {e}")))
    }

    /// Apply `NOTION_BASE_URL` / `NOTION_VERSION` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(API_VERSION_ENV).ok(),
        )
    }

    fn with_overrides(mut self, base_url: Option<String>, api_version: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(version) = api_version.filter(|v| !v.trim().is_empty()) {
            self.api_version = version.trim().to_string();
        }
        self
    }
}

/// Load settings, then apply environment overrides.
///
/// An explicitly named file must exist and parse. A discovered file that cannot be
/// read or parsed is skipped with a warning.
pub fn load_settings(explicit: Option<&Path>) -> NotionResult<NotionSettings> {
    let settings = match explicit {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                NotionError::config(format!("Failed to read {}: {e}", path.display()))
            })?;
            let settings = NotionSettings::from_toml(&contents)?;
            tracing::debug!(?path, "Loaded Notion settings");
            settings
        }
        None => load_discovered(),
    };
    Ok(settings.with_env_overrides())
}

fn load_discovered() -> NotionSettings {
    if let Some(path) = find_settings_file() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match NotionSettings::from_toml(&contents) {
                Ok(settings) => {
                    tracing::debug!(?path, "Loaded Notion settings");
                    return settings;
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse settings, using defaults");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read settings, using defaults");
            }
        }
    }
    NotionSettings::default()
}

/// Search for a settings file in precedence order.
pub fn find_settings_file() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_SETTINGS_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Read the integration token from `NOTION_API_KEY`.
pub fn api_key_from_env() -> NotionResult<SecretString> {
    api_key_from(std::env::var(API_KEY_ENV).ok())
}

fn api_key_from(raw: Option<String>) -> NotionResult<SecretString> {
    match raw.map(|key| key.trim().to_string()) {
        Some(key) if !key.is_empty() => Ok(SecretString::from(key)),
        _ => Err(NotionError::config(format!(
            "{API_KEY_ENV} environment variable is required"
        ))),
    }
}

/// Everything the HTTP transport needs, assembled once at startup.
#[derive(Debug)]
pub struct NotionClientConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub api_version: String,
    pub timeout_ms: Option<u64>,
}

impl NotionClientConfig {
    /// Configuration against the public API with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_settings(
            SecretString::from(api_key.into()),
            &NotionSettings::default(),
        )
    }

    pub fn from_settings(api_key: SecretString, settings: &NotionSettings) -> Self {
        Self {
            api_key,
            base_url: settings.base_url.clone(),
            api_version: settings.api_version.clone(),
            timeout_ms: settings.timeout_ms,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = NotionSettings::default();
        assert_eq!(settings.base_url, "https://api.notion.com/v1");
        assert_eq!(settings.api_version, "2022-06-28");
        assert!(settings.timeout_ms.is_none());
    }

    #[test]
    fn test_parse_settings_toml() {
        let toml_str = r#"
base-url = "http://localhost:9000/v1"
api-version = "2025-01-01"
timeout-ms = 1500
"#;
        let settings = NotionSettings::from_toml(toml_str).unwrap();
        assert_eq!(settings.base_url, "http://localhost:9000/v1");
        assert_eq!(settings.api_version, "2025-01-01");
        assert_eq!(settings.timeout_ms, Some(1500));
    }

    #[test]
    fn test_parse_partial_settings_keeps_defaults() {
        let settings = NotionSettings::from_toml("timeout-ms = 10\n").unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout_ms, Some(10));
    }

    #[test]
    fn test_parse_invalid_settings_is_config_error() {
        let err = NotionSettings::from_toml("timeout-ms = \"soon\"").unwrap_err();
        assert!(matches!(err, NotionError::Config(_)));
    }

    #[test]
    fn test_overrides_replace_non_empty_values() {
        let settings = NotionSettings::default()
            .with_overrides(Some(" http://mock ".to_string()), Some(String::new()));
        assert_eq!(settings.base_url, "http://mock");
        assert_eq!(settings.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api-version = \"2030-01-01\"").unwrap();
        let settings = NotionSettings::from_toml(&std::fs::read_to_string(file.path()).unwrap())
            .unwrap();
        assert_eq!(settings.api_version, "2030-01-01");
        assert!(load_settings(Some(file.path())).is_ok());
    }

    #[test]
    fn test_load_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, NotionError::Config(ref m) if m.contains("absent.toml")));
    }

    #[test]
    fn test_api_key_is_trimmed() {
        let key = api_key_from(Some("  secret_abc \n".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "secret_abc");
    }

    #[test]
    fn test_missing_or_blank_api_key_is_config_error() {
        assert!(matches!(api_key_from(None), Err(NotionError::Config(_))));
        assert!(matches!(
            api_key_from(Some("   ".to_string())),
            Err(NotionError::Config(ref m)) if m.contains("NOTION_API_KEY")
        ));
    }

    #[test]
    fn test_client_config_from_settings() {
        let settings = NotionSettings {
            timeout_ms: Some(250),
            ..NotionSettings::default()
        };
        let config = NotionClientConfig::from_settings(SecretString::from("k".to_string()), &settings)
            .with_base_url("http://127.0.0.1:1");
        assert_eq!(config.base_url, "http://127.0.0.1:1");
        assert_eq!(config.timeout_ms, Some(250));
        assert_eq!(config.api_key.expose_secret(), "k");
        assert!(!format!("{config:?}").contains("\"k\""));
    }
}
