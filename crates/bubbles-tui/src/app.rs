use std::collections::HashMap;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use bubbles_core::browser::Browser;
use bubbles_core::catalog::{Prompt, TAG_ALL};
use bubbles_core::clipboard::Clipboard;
use bubbles_core::debounce::Debouncer;
use bubbles_core::keymap::{BrowseAction, EditAction, Keymap, SearchAction};
use bubbles_core::link;
use bubbles_core::placeholder::{self, PlaceholderForm};
use bubbles_core::state::Theme;

pub const COPIED_TEXT: &str = "Copied ✓";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Browse,
    /// Typing into the search box.
    Search,
    /// Filling the selected card's placeholders.
    Edit,
}

pub struct App {
    pub browser: Browser,
    pub mode: AppMode,
    /// Selection within the visible (filtered) list.
    pub list_state: ListState,
    pub keymap: Keymap,
    /// Live contents of the search box; applied to the browser after the
    /// debounce window.
    pub search_input: String,
    pub search_debounce: Debouncer<String>,
    /// Placeholder values typed so far, keyed by prompt id.
    pub forms: HashMap<String, PlaceholderForm>,
    /// Card named by the `--link` deep link, if it exists.
    pub linked_id: Option<String>,
    pub share_base: String,
    pub theme: Theme,
    /// Transient status message shown in the help bar.
    pub status_message: Option<(String, Instant)>,
    pub show_help_overlay: bool,
    pub help_scroll: u16,
    pub should_quit: bool,
    /// Tick counter incremented every 100ms.
    pub tick: u64,
    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(
        browser: Browser,
        keymap: Keymap,
        search_debounce: Debouncer<String>,
        share_base: String,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let search_input = browser.state().search.clone();
        let theme = browser.theme().unwrap_or_default();
        let mut app = Self {
            browser,
            mode: AppMode::Browse,
            list_state: ListState::default(),
            keymap,
            search_input,
            search_debounce,
            forms: HashMap::new(),
            linked_id: None,
            share_base,
            theme,
            status_message: None,
            show_help_overlay: false,
            help_scroll: 0,
            should_quit: false,
            tick: 0,
            clipboard,
        };
        app.clamp_selection(None);
        app
    }

    /// Select and mark the card a deep link names. Cards hidden by the
    /// restored filter are left alone.
    pub fn follow_link(&mut self, target: &str) {
        let Some(id) = link::fragment(target) else {
            return;
        };
        let position = self
            .browser
            .visible_prompts()
            .position(|p| p.id == id);
        match position {
            Some(pos) => {
                self.list_state.select(Some(pos));
                self.linked_id = Some(id.to_string());
            }
            None => tracing::debug!(id, "deep link target not visible"),
        }
    }

    pub fn selected_prompt(&self) -> Option<&Prompt> {
        let pos = self.list_state.selected()?;
        let idx = *self.browser.visible_indices().get(pos)?;
        self.browser.prompts().get(idx)
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_prompt().map(|p| p.id.clone())
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status messages older than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, created)) = &self.status_message {
            if created.elapsed().as_secs() >= 3 {
                self.status_message = None;
            }
        }
    }

    // ── Search ──

    /// Apply the pending search text once its idle window has passed.
    pub fn poll_search(&mut self, now: Instant) {
        if let Some(text) = self.search_debounce.poll(now) {
            self.apply_search(&text);
        }
    }

    fn apply_search(&mut self, text: &str) {
        let prev = self.selected_id();
        self.browser.set_search(text);
        self.clamp_selection(prev.as_deref());
    }

    fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_debounce.cancel();
        self.apply_search("");
    }

    // ── Tags ──

    fn select_tag(&mut self, tag: &str) {
        let prev = self.selected_id();
        self.browser.select_tag(tag);
        self.clamp_selection(prev.as_deref());
    }

    fn cycle_tag(&mut self, forward: bool) {
        let prev = self.selected_id();
        self.browser.cycle_tag(forward);
        self.clamp_selection(prev.as_deref());
    }

    /// Keep `prev` selected if it is still visible, otherwise fall back to
    /// the first visible card.
    fn clamp_selection(&mut self, prev: Option<&str>) {
        let visible = self.browser.visible_indices();
        if visible.is_empty() {
            self.list_state.select(None);
            return;
        }
        let kept = prev.and_then(|id| self.browser.visible_prompts().position(|p| p.id == id));
        self.list_state.select(Some(kept.unwrap_or(0)));
    }

    // ── Copy ──

    /// Prompt text with the user's placeholder values (or identifiers).
    pub fn resolved_text(&self, prompt: &Prompt) -> String {
        match self.forms.get(&prompt.id) {
            Some(form) => form.resolve(),
            None => placeholder::resolve(&placeholder::parse(&prompt.text), &[]),
        }
    }

    fn copy_selected_prompt(&mut self) {
        let Some(prompt) = self.selected_prompt() else {
            return;
        };
        let id = prompt.id.clone();
        let text = placeholder::clipboard_text(&self.resolved_text(prompt));
        self.copy(&id, &text);
    }

    fn copy_selected_link(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let url = link::card_url(&self.share_base, &id);
        self.copy(&id, &url);
    }

    fn copy(&mut self, id: &str, text: &str) {
        match self.clipboard.set_text(text) {
            Ok(()) => {
                tracing::info!(id, chars = text.chars().count(), "copied to clipboard");
                self.set_status(COPIED_TEXT);
            }
            Err(e) => self.set_status(format!("Copy failed: {e}")),
        }
    }

    // ── Key handling ──

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys
        if self.show_help_overlay {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help_overlay = false;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.help_scroll = self.help_scroll.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.help_scroll = self.help_scroll.saturating_sub(1);
                }
                _ => {}
            }
            return;
        }

        match self.mode {
            AppMode::Browse => self.handle_browse_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::Edit => self.handle_edit_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        let Some(action) = self.keymap.browse.get(&key.code).copied() else {
            return;
        };
        match action {
            BrowseAction::Quit => self.should_quit = true,
            BrowseAction::SelectNext => self.select_next(),
            BrowseAction::SelectPrev => self.select_prev(),
            BrowseAction::GoToTop => self.select_first(),
            BrowseAction::GoToBottom => self.select_last(),
            BrowseAction::Search => self.mode = AppMode::Search,
            BrowseAction::ClearSearch => self.clear_search(),
            BrowseAction::NextTag => self.cycle_tag(true),
            BrowseAction::PrevTag => self.cycle_tag(false),
            BrowseAction::AllTags => self.select_tag(TAG_ALL),
            BrowseAction::CardTag => {
                let tag = self
                    .selected_prompt()
                    .and_then(|p| p.tags.first().cloned());
                if let Some(tag) = tag {
                    self.select_tag(&tag);
                }
            }
            BrowseAction::CopyPrompt => self.copy_selected_prompt(),
            BrowseAction::CopyLink => self.copy_selected_link(),
            BrowseAction::EditFields => self.start_edit(),
            BrowseAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.browser.set_theme(self.theme);
            }
            BrowseAction::ShowHelp => {
                self.show_help_overlay = true;
                self.help_scroll = 0;
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        if let Some(action) = self.keymap.search.get(&key.code).copied() {
            match action {
                SearchAction::Confirm => {
                    if let Some(text) = self.search_debounce.flush() {
                        self.apply_search(&text);
                    }
                }
                SearchAction::Cancel => self.clear_search(),
            }
            self.mode = AppMode::Browse;
            return;
        }
        match key.code {
            KeyCode::Backspace => {
                self.search_input.pop();
                self.search_debounce
                    .request(self.search_input.clone(), Instant::now());
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.clear();
                self.search_debounce
                    .request(self.search_input.clone(), Instant::now());
            }
            KeyCode::Char(c) if is_plain_char(&key) => {
                self.search_input.push(c);
                self.search_debounce
                    .request(self.search_input.clone(), Instant::now());
            }
            _ => {}
        }
    }

    /// Feed bracketed-paste text into the search box or focused field.
    /// Line breaks and tabs are dropped so they never act as bindings.
    pub fn handle_paste(&mut self, text: &str) {
        if self.mode == AppMode::Browse || self.show_help_overlay {
            return;
        }
        for c in text.chars().filter(|c| !matches!(c, '\r' | '\n' | '\t')) {
            self.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    fn start_edit(&mut self) {
        let Some(prompt) = self.selected_prompt() else {
            return;
        };
        let (id, text) = (prompt.id.clone(), prompt.text.clone());
        let form = self
            .forms
            .entry(id)
            .or_insert_with(|| PlaceholderForm::new(&text));
        if form.field_count() == 0 {
            self.set_status("No placeholders to fill");
        } else {
            self.mode = AppMode::Edit;
        }
    }

    fn selected_form_mut(&mut self) -> Option<&mut PlaceholderForm> {
        let id = self.selected_id()?;
        self.forms.get_mut(&id)
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        if let Some(action) = self.keymap.edit.get(&key.code).copied() {
            match action {
                EditAction::Back => self.mode = AppMode::Browse,
                EditAction::NextField => {
                    if let Some(form) = self.selected_form_mut() {
                        form.focus_next();
                    }
                }
                EditAction::PrevField => {
                    if let Some(form) = self.selected_form_mut() {
                        form.focus_prev();
                    }
                }
                EditAction::ClearField => {
                    if let Some(form) = self.selected_form_mut() {
                        form.clear_focused();
                    }
                }
                EditAction::Copy => self.copy_selected_prompt(),
            }
            return;
        }
        let Some(form) = self.selected_form_mut() else {
            self.mode = AppMode::Browse;
            return;
        };
        match key.code {
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if is_plain_char(&key) => form.insert_char(c),
            _ => {}
        }
    }

    // ── Navigation ──

    fn visible_len(&self) -> usize {
        self.browser.visible_indices().len()
    }

    fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.visible_len() == 0 {
            return;
        }
        let prev = self
            .list_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.list_state.select(Some(prev));
    }

    fn select_first(&mut self) {
        if self.visible_len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}

/// A character typed without Ctrl or Alt held.
fn is_plain_char(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use bubbles_core::catalog;
    use bubbles_core::clipboard::{ClipboardError, MemoryClipboard};
    use bubbles_core::state::{KeyValueStore, MemoryStore, STATE_KEY};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Clipboard whose writes stay observable after the app takes ownership.
    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<MemoryClipboard>>);

    impl Clipboard for SharedClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.borrow_mut().set_text(text)
        }
    }

    impl SharedClipboard {
        fn last(&self) -> Option<String> {
            self.0.borrow().contents.last().cloned()
        }
    }

    const CATALOG: &str = r#"[
        {"id": "a", "title": "Greeting", "text": "Hi {name}", "tags": ["social"]},
        {"id": "b", "title": "Code review", "text": "Review {file}\r\nfor {issue}", "tags": ["dev"]},
        {"id": "c", "title": "Plain", "text": "  no fields  ", "tags": ["dev", "misc"]}
    ]"#;

    fn test_app_with_store(store: MemoryStore) -> (App, SharedClipboard) {
        let prompts = catalog::parse_catalog(CATALOG).unwrap();
        let browser = Browser::new(prompts, Box::new(store));
        let clipboard = SharedClipboard::default();
        let app = App::new(
            browser,
            Keymap::default(),
            Debouncer::new(Duration::from_millis(80)),
            "https://prompts.example.com/".to_string(),
            Box::new(clipboard.clone()),
        );
        (app, clipboard)
    }

    fn test_app() -> (App, SharedClipboard) {
        test_app_with_store(MemoryStore::new())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn visible_ids(app: &App) -> Vec<String> {
        app.browser.visible_prompts().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn app_new_defaults() {
        let (app, _) = test_app();
        assert_eq!(app.mode, AppMode::Browse);
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.search_input, "");
        assert!(!app.should_quit);
    }

    #[test]
    fn restored_search_fills_search_box() {
        let mut store = MemoryStore::new();
        store
            .set(STATE_KEY, r#"{"search": "review", "tag": "all"}"#)
            .unwrap();
        let (app, _) = test_app_with_store(store);
        assert_eq!(app.search_input, "review");
        assert_eq!(visible_ids(&app), vec!["b"]);
    }

    #[test]
    fn slash_enters_search_and_typing_is_debounced() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.mode, AppMode::Search);

        type_text(&mut app, "hi");
        assert_eq!(app.search_input, "hi");
        // Nothing applied until the idle window passes
        assert_eq!(app.browser.state().search, "");
        assert_eq!(visible_ids(&app).len(), 3);

        app.poll_search(Instant::now() + Duration::from_millis(200));
        assert_eq!(app.browser.state().search, "hi");
        assert_eq!(visible_ids(&app), vec!["a"]);
    }

    #[test]
    fn confirm_flushes_pending_search() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "plain");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Browse);
        assert_eq!(visible_ids(&app), vec!["c"]);
        assert!(!app.search_debounce.is_pending());
    }

    #[test]
    fn cancel_clears_search() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "plain");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('/')));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Browse);
        assert_eq!(app.search_input, "");
        assert_eq!(visible_ids(&app).len(), 3);
    }

    #[test]
    fn search_mode_typing_does_not_trigger_bindings() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "q/x");
        assert!(!app.should_quit);
        assert_eq!(app.search_input, "q/x");
    }

    #[test]
    fn clear_search_key() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "greet");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(visible_ids(&app), vec!["a"]);
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(visible_ids(&app).len(), 3);
        assert_eq!(app.search_input, "");
    }

    #[test]
    fn tag_cycling_filters_and_keeps_selection() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected_prompt().unwrap().id, "b");

        // all -> dev
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.browser.state().tag, "dev");
        assert_eq!(visible_ids(&app), vec!["b", "c"]);
        assert_eq!(app.selected_prompt().unwrap().id, "b");

        // dev -> misc: "b" is gone, selection falls back to first
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.browser.state().tag, "misc");
        assert_eq!(app.selected_prompt().unwrap().id, "c");

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.browser.state().tag, TAG_ALL);
    }

    #[test]
    fn card_tag_selects_first_tag_of_card() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('G')));
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.browser.state().tag, "dev");
    }

    #[test]
    fn empty_result_clears_selection() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "zzz");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.selected_prompt().is_none());
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn navigation_clamps() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.list_state.selected(), Some(0));
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Char('j')));
        }
        assert_eq!(app.list_state.selected(), Some(2));
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn enter_copies_prompt_with_identifiers() {
        let (mut app, clipboard) = test_app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(clipboard.last().as_deref(), Some("Hi name"));
        assert_eq!(app.status_message.as_ref().map(|(m, _)| m.as_str()), Some(COPIED_TEXT));
    }

    #[test]
    fn copy_strips_carriage_returns_and_trims() {
        let (mut app, clipboard) = test_app();
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(clipboard.last().as_deref(), Some("Review file\nfor issue"));

        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(clipboard.last().as_deref(), Some("no fields"));
    }

    #[test]
    fn edit_fields_then_copy() {
        let (mut app, clipboard) = test_app();
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.mode, AppMode::Edit);

        type_text(&mut app, "main.rs");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "leaks");
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(clipboard.last().as_deref(), Some("Review main.rs\nfor leak"));

        // Values survive leaving edit mode
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Browse);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(clipboard.last().as_deref(), Some("Review main.rs\nfor leak"));
    }

    #[test]
    fn edit_typing_q_does_not_quit() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.resolved_text(app.selected_prompt().unwrap()), "Hi q");
    }

    #[test]
    fn edit_without_fields_stays_in_browse() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('G')));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.mode, AppMode::Browse);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn share_copies_card_url() {
        let (mut app, clipboard) = test_app();
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(clipboard.last().as_deref(), Some("https://prompts.example.com/#b"));
    }

    #[test]
    fn copy_failure_sets_status() {
        let (mut app, clipboard) = test_app();
        clipboard.0.borrow_mut().fail = true;
        app.handle_key(key(KeyCode::Enter));
        let msg = app.status_message.as_ref().map(|(m, _)| m.clone()).unwrap();
        assert!(msg.starts_with("Copy failed"));
    }

    #[test]
    fn follow_link_selects_and_marks_card() {
        let (mut app, _) = test_app();
        app.follow_link("https://prompts.example.com/#c");
        assert_eq!(app.selected_prompt().unwrap().id, "c");
        assert_eq!(app.linked_id.as_deref(), Some("c"));

        let (mut app, _) = test_app();
        app.follow_link("#missing");
        assert_eq!(app.list_state.selected(), Some(0));
        assert!(app.linked_id.is_none());
    }

    #[test]
    fn toggle_theme_persists() {
        let (mut app, _) = test_app();
        assert_eq!(app.theme, Theme::Light);
        app.handle_key(key(KeyCode::Char('T')));
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.browser.theme(), Some(Theme::Dark));
    }

    #[test]
    fn help_overlay_intercepts_keys() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help_overlay);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.help_scroll, 1);
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.show_help_overlay);
        assert!(!app.should_quit);
    }

    #[test]
    fn modified_chars_are_not_typed() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "ab");
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        app.handle_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(app.search_input, "ab");
        app.handle_key(key(KeyCode::Char('C')));
        assert_eq!(app.search_input, "abC");

        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(app.resolved_text(app.selected_prompt().unwrap()), "Hi name");
    }

    #[test]
    fn paste_drops_tabs_and_line_breaks() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_paste("main\t.rs\r\n");
        assert_eq!(app.mode, AppMode::Edit);
        assert_eq!(app.forms["b"].focused(), Some(0));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.resolved_text(app.selected_prompt().unwrap()),
            "Review main.rs\r\nfor issue"
        );
    }

    #[test]
    fn paste_is_ignored_while_browsing() {
        let (mut app, _) = test_app();
        app.handle_paste("q");
        assert!(!app.should_quit);
        assert_eq!(app.search_input, "");
    }

    #[test]
    fn quit_keys() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
