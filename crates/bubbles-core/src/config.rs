//! Path helpers and the TOML config file.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::debounce;
use crate::keymap::{TomlBrowseBindings, TomlEditBindings, TomlSearchBindings};
use crate::state::Theme;

const APP_DIR: &str = "prompt-bubbles";

/// Environment variable naming the prompt file.
pub const CATALOG_ENV: &str = "BUBBLES_CATALOG";

/// Prompt file used when nothing else is configured, relative to the cwd.
pub const DEFAULT_CATALOG: &str = "prompts.json";

/// Base data directory: `~/.local/share/prompt-bubbles/`
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR))
}

/// Persisted key-value storage: `~/.local/share/prompt-bubbles/storage.json`
pub fn storage_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("storage.json"))
}

/// TUI log file: `~/.local/share/prompt-bubbles/bubbles.log`
pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("bubbles.log"))
}

/// Config file: `~/.config/prompt-bubbles/config.toml`
pub fn config_path() -> Option<PathBuf> {
    let config_dir = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(|| {
            env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })?;
    Some(config_dir.join(APP_DIR).join("config.toml"))
}

// ── TOML types ──

#[derive(Deserialize, Serialize, Default)]
pub struct TomlConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<TomlSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse: Option<TomlBrowseBindings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<TomlSearchBindings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<TomlEditBindings>,
}

#[derive(Deserialize, Serialize, Default)]
pub struct TomlSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_debounce_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Load the raw TOML config. Returns Default if the file is missing or invalid.
pub fn load_toml_config() -> TomlConfig {
    match config_path() {
        Some(path) => load_toml_config_from(&path),
        None => TomlConfig::default(),
    }
}

pub fn load_toml_config_from(path: &Path) -> TomlConfig {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return TomlConfig::default(),
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            TomlConfig::default()
        }
    }
}

/// Save a TomlConfig to the config file, creating parent dirs as needed.
pub fn save_toml_config(config: &TomlConfig) -> io::Result<()> {
    let path = config_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot determine config path"))?;
    save_toml_config_to(&path, config)
}

pub fn save_toml_config_to(path: &Path, config: &TomlConfig) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(io::Error::other)?;
    fs::write(path, content)
}

// ── Resolved settings ──

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog: Option<String>,
    pub share_base_url: Option<String>,
    pub search_debounce: Duration,
    /// Theme used until the user toggles one; the stored theme wins over this.
    pub theme: Option<Theme>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            share_base_url: None,
            search_debounce: debounce::DEFAULT_DELAY,
            theme: None,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::from_toml(load_toml_config().settings.unwrap_or_default())
    }

    pub fn from_toml(settings: TomlSettings) -> Self {
        let defaults = Self::default();
        Self {
            catalog: settings.catalog.filter(|c| !c.trim().is_empty()),
            share_base_url: settings.share_base_url.filter(|u| !u.trim().is_empty()),
            search_debounce: settings
                .search_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            theme: settings.theme.as_deref().and_then(Theme::parse),
        }
    }

    /// Prompt file path: `--catalog` flag, then `$BUBBLES_CATALOG`, then the
    /// config file, then `./prompts.json`.
    pub fn catalog_path(&self, flag: Option<&str>) -> PathBuf {
        let from_env = env::var(CATALOG_ENV).ok();
        resolve_catalog_path(flag, from_env.as_deref(), self.catalog.as_deref())
    }
}

pub fn resolve_catalog_path(
    flag: Option<&str>,
    from_env: Option<&str>,
    configured: Option<&str>,
) -> PathBuf {
    [flag, from_env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|p| !p.is_empty())
        .map(expand_home)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

/// Config with every setting and binding spelled out (for `config init`).
pub fn default_toml_config() -> TomlConfig {
    let keymap = crate::keymap::Keymap::default().to_toml();
    TomlConfig {
        settings: Some(TomlSettings {
            catalog: Some(DEFAULT_CATALOG.to_string()),
            share_base_url: None,
            search_debounce_ms: Some(debounce::DEFAULT_DELAY.as_millis() as u64),
            theme: Some(Theme::default().as_str().to_string()),
        }),
        ..keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_precedence() {
        assert_eq!(
            resolve_catalog_path(Some("flag.json"), Some("env.json"), Some("cfg.json")),
            PathBuf::from("flag.json")
        );
        assert_eq!(
            resolve_catalog_path(None, Some("env.json"), Some("cfg.json")),
            PathBuf::from("env.json")
        );
        assert_eq!(
            resolve_catalog_path(None, Some("  "), Some("cfg.json")),
            PathBuf::from("cfg.json")
        );
        assert_eq!(resolve_catalog_path(None, None, None), PathBuf::from(DEFAULT_CATALOG));
    }

    #[test]
    fn catalog_expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                resolve_catalog_path(Some("~/p.json"), None, None),
                home.join("p.json")
            );
        }
    }

    #[test]
    fn settings_from_toml() {
        let config: TomlConfig = toml::from_str(
            r#"
[settings]
catalog = "/data/prompts.json"
share_base_url = "https://prompts.example.com/"
search_debounce_ms = 120
theme = "dark"
"#,
        )
        .unwrap();
        let settings = Settings::from_toml(config.settings.unwrap());
        assert_eq!(settings.catalog.as_deref(), Some("/data/prompts.json"));
        assert_eq!(settings.share_base_url.as_deref(), Some("https://prompts.example.com/"));
        assert_eq!(settings.search_debounce, Duration::from_millis(120));
        assert_eq!(settings.theme, Some(Theme::Dark));
    }

    #[test]
    fn settings_defaults_for_missing_or_bad_values() {
        let settings = Settings::from_toml(TomlSettings {
            catalog: Some(" ".to_string()),
            theme: Some("neon".to_string()),
            ..Default::default()
        });
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_invalid_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings\nbroken").unwrap();
        let config = load_toml_config_from(&path);
        assert!(config.settings.is_none());
        assert!(config.browse.is_none());
    }

    #[test]
    fn default_config_roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        save_toml_config_to(&path, &default_toml_config()).unwrap();

        let loaded = load_toml_config_from(&path);
        let settings = Settings::from_toml(loaded.settings.unwrap());
        assert_eq!(settings.search_debounce, debounce::DEFAULT_DELAY);
        assert_eq!(settings.theme, Some(Theme::Light));
        assert!(loaded.browse.is_some());
        assert!(loaded.search.is_some());
        assert!(loaded.edit.is_some());
    }
}
