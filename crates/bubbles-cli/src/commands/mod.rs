pub mod config;
pub mod copy;
pub mod keys;
pub mod link;
pub mod list;
pub mod show;
pub mod state;
pub mod tags;

use std::path::PathBuf;

use bubbles_core::catalog::{self, Prompt};
use bubbles_core::clipboard::{Clipboard, SystemClipboard};
use bubbles_core::config::{self as core_config, Settings};
use bubbles_core::link as core_link;
use bubbles_core::state::{FileStore, KeyValueStore, MemoryStore};

/// What the catalog and state commands operate on.
pub struct Context {
    pub catalog_path: PathBuf,
    pub share_base_url: Option<String>,
    pub store: Box<dyn KeyValueStore>,
    pub storage_path: Option<PathBuf>,
    pub clipboard: Box<dyn Clipboard>,
}

impl Context {
    pub fn load(catalog_flag: Option<&str>) -> Self {
        let settings = Settings::load();
        let store: Box<dyn KeyValueStore> = match FileStore::open_default() {
            Some(store) => Box::new(store),
            None => Box::new(MemoryStore::new()),
        };
        Self {
            catalog_path: settings.catalog_path(catalog_flag),
            share_base_url: settings.share_base_url,
            store,
            storage_path: core_config::storage_path(),
            clipboard: Box::new(SystemClipboard),
        }
    }

    /// Load the catalog, reporting failure on stderr.
    pub fn load_prompts(&self) -> Result<Vec<Prompt>, i32> {
        catalog::load_catalog(&self.catalog_path).map_err(|e| {
            eprintln!("Error: {e} ({})", self.catalog_path.display());
            1
        })
    }

    pub fn share_base(&self) -> String {
        match &self.share_base_url {
            Some(url) => url.clone(),
            None => core_link::default_base_url(&self.catalog_path),
        }
    }
}

pub fn find_prompt<'a>(prompts: &'a [Prompt], id: &str) -> Result<&'a Prompt, i32> {
    prompts.iter().find(|p| p.id == id).ok_or_else(|| {
        eprintln!("No prompt with id '{id}'.");
        1
    })
}
