//! The controller that owns the catalog, the browsing state and its store.
//!
//! Every user-facing transition goes through a method here: mutate the state,
//! persist it, recompute the visible list. Presenters read the result through
//! [`Browser::view`].

use crate::catalog::{self, CatalogError, Prompt, TAG_ALL};
use crate::filter;
use crate::state::{self, AppState, KeyValueStore, Theme};
use crate::view::BrowserView;

pub struct Browser {
    prompts: Vec<Prompt>,
    tags: Vec<String>,
    state: AppState,
    visible: Vec<usize>,
    store: Box<dyn KeyValueStore>,
    load_error: Option<String>,
}

impl Browser {
    /// Build from a loaded catalog, restoring persisted state from `store`.
    pub fn new(prompts: Vec<Prompt>, store: Box<dyn KeyValueStore>) -> Self {
        let state = state::load_state(store.as_ref());
        let mut browser = Self {
            prompts: Vec::new(),
            tags: Vec::new(),
            state,
            visible: Vec::new(),
            store,
            load_error: None,
        };
        browser.reload(prompts);
        browser
    }

    /// Like [`Browser::new`], but a failed load yields an empty browser that
    /// reports the error instead of showing nothing.
    pub fn from_load(
        result: Result<Vec<Prompt>, CatalogError>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        match result {
            Ok(prompts) => Self::new(prompts, store),
            Err(e) => {
                tracing::error!(error = %e, "failed to load prompts");
                let mut browser = Self::new(Vec::new(), store);
                browser.load_error = Some(e.to_string());
                browser
            }
        }
    }

    /// Replace the catalog and recompute tags and matches.
    pub fn reload(&mut self, prompts: Vec<Prompt>) {
        self.tags = catalog::unique_tags(&prompts);
        self.prompts = prompts;
        self.load_error = None;
        self.refilter();
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// `"all"` followed by every distinct tag.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Catalog indices of the prompts passing the current filter.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_prompts(&self) -> impl Iterator<Item = &Prompt> + '_ {
        self.visible.iter().filter_map(|&i| self.prompts.get(i))
    }

    pub fn find(&self, id: &str) -> Option<(usize, &Prompt)> {
        self.prompts.iter().enumerate().find(|(_, p)| p.id == id)
    }

    pub fn set_search(&mut self, search: &str) {
        if self.state.search == search {
            return;
        }
        self.state.search = search.to_string();
        self.commit();
    }

    pub fn select_tag(&mut self, tag: &str) {
        if self.state.tag == tag {
            return;
        }
        self.state.tag = tag.to_string();
        self.commit();
    }

    /// Move the tag selection along the chip list, wrapping at either end.
    /// A stale tag restarts from `"all"`.
    pub fn cycle_tag(&mut self, forward: bool) {
        let len = self.tags.len();
        if len == 0 {
            return;
        }
        let next = match self.tags.iter().position(|t| *t == self.state.tag) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        let tag = self.tags[next].clone();
        self.select_tag(&tag);
    }

    pub fn reset(&mut self) {
        self.state = AppState {
            search: String::new(),
            tag: TAG_ALL.to_string(),
        };
        self.commit();
    }

    /// Snapshot for presenters. `linked` marks the card a deep link points at.
    pub fn view(&self, linked: Option<&str>) -> BrowserView<'_> {
        BrowserView::build(self, linked)
    }

    pub fn theme(&self) -> Option<Theme> {
        state::restore_theme(self.store.as_ref())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        state::persist_theme(self.store.as_mut(), theme);
    }

    fn commit(&mut self) {
        state::persist(self.store.as_mut(), &self.state);
        self.refilter();
        tracing::debug!(
            search = %self.state.search,
            tag = %self.state.tag,
            visible = self.visible.len(),
            "state updated"
        );
    }

    fn refilter(&mut self) {
        self.visible = filter::filter_indices(&self.prompts, &self.state);
    }
}
