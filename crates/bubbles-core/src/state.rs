//! Browser state ({search, tag}) and the key-value store it is persisted to.
//!
//! Persistence is best-effort: write failures are logged and dropped, and any
//! unreadable or malformed stored value restores as "nothing stored".

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::TAG_ALL;

/// Storage key for the serialized [`AppState`].
pub const STATE_KEY: &str = "prompt-bubbles-state";
/// Storage key for the selected [`Theme`].
pub const THEME_KEY: &str = "prompt-bubbles-theme";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub search: String,
    pub tag: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            search: String::new(),
            tag: TAG_ALL.to_string(),
        }
    }
}

/// Fields recovered from storage. Absent or mistyped fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialState {
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl PartialState {
    pub fn apply_to(self, state: &mut AppState) {
        if let Some(search) = self.search {
            state.search = search;
        }
        if let Some(tag) = self.tag {
            state.tag = tag;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// String key-value storage with local-storage semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-memory store, used when no data directory is available and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All keys live in one JSON object on disk, e.g. `storage.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, if a data directory can be determined.
    pub fn open_default() -> Option<Self> {
        crate::config::storage_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> io::Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e),
        };
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
        fs::write(&self.path, content)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        let mut entries = self.read_all().unwrap_or_default();
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Write `state` under [`STATE_KEY`]. Errors are logged, never returned.
pub fn persist(store: &mut dyn KeyValueStore, state: &AppState) {
    let json = match serde_json::to_string(state) {
        Ok(j) => j,
        Err(e) => {
            tracing::debug!(error = %e, "failed to serialize state");
            return;
        }
    };
    if let Err(e) = store.set(STATE_KEY, &json) {
        tracing::debug!(error = %e, "failed to persist state");
    }
}

/// Read whatever usable fields are stored under [`STATE_KEY`].
pub fn restore(store: &dyn KeyValueStore) -> PartialState {
    let stored = match store.get(STATE_KEY) {
        Ok(Some(s)) => s,
        Ok(None) => return PartialState::default(),
        Err(e) => {
            tracing::debug!(error = %e, "failed to read stored state");
            return PartialState::default();
        }
    };
    let parsed: Value = match serde_json::from_str(&stored) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed stored state");
            return PartialState::default();
        }
    };
    PartialState {
        search: parsed.get("search").and_then(Value::as_str).map(String::from),
        tag: parsed.get("tag").and_then(Value::as_str).map(String::from),
    }
}

/// Defaults overlaid with whatever [`restore`] recovers.
pub fn load_state(store: &dyn KeyValueStore) -> AppState {
    let mut state = AppState::default();
    restore(store).apply_to(&mut state);
    state
}

pub fn persist_theme(store: &mut dyn KeyValueStore, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
        tracing::debug!(error = %e, "failed to persist theme");
    }
}

pub fn restore_theme(store: &dyn KeyValueStore) -> Option<Theme> {
    match store.get(THEME_KEY) {
        Ok(Some(s)) => Theme::parse(&s),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(error = %e, "failed to read stored theme");
            None
        }
    }
}
