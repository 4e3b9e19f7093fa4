//! Keybindings: TOML binding tables, key parsing/display, action enums, and
//! the runtime `Keymap`.

use std::collections::HashMap;

use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::{self, TomlConfig};

// ── TOML deserialization types ──

#[derive(Deserialize, Serialize, Default)]
pub struct TomlBrowseBindings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quit: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_next: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_prev: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_to_top: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_to_bottom: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_search: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tag: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_tag: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_tag: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_prompt: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_link: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_theme: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_help: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Default)]
pub struct TomlSearchBindings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Default)]
pub struct TomlEditBindings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_field: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_field: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_field: Option<Vec<String>>,
}

// ── Key parsing and display ──

pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Esc" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "BackTab" => Some(KeyCode::BackTab),
        "Backspace" => Some(KeyCode::Backspace),
        "Delete" => Some(KeyCode::Delete),
        "Home" => Some(KeyCode::Home),
        "End" => Some(KeyCode::End),
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Space" => Some(KeyCode::Char(' ')),
        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),
        _ => None,
    }
}

pub fn key_display(kc: &KeyCode) -> String {
    match kc {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        _ => "?".to_string(),
    }
}

/// Remove all existing bindings for `action`, then insert new ones from `keys`.
/// If `keys` is None, keep defaults.
pub fn apply_bindings<A: PartialEq + Copy>(
    map: &mut HashMap<KeyCode, A>,
    action: A,
    keys: Option<Vec<String>>,
) {
    let Some(keys) = keys else {
        return;
    };

    map.retain(|_, v| *v != action);

    for key_str in &keys {
        match parse_key(key_str) {
            Some(kc) => {
                map.insert(kc, action);
            }
            None => tracing::warn!(key = %key_str, "ignoring unknown key name in config"),
        }
    }
}

/// Collect all keys bound to a given action, sorted for display consistency.
pub fn keys_for_action<A: PartialEq>(map: &HashMap<KeyCode, A>, action: A) -> Vec<KeyCode> {
    let mut keys: Vec<KeyCode> = map
        .iter()
        .filter(|(_, a)| **a == action)
        .map(|(k, _)| *k)
        .collect();
    keys.sort_by_key(key_display);
    keys
}

/// Format a list of keycodes as a display string like "j/Down".
pub fn format_keys(keys: &[KeyCode]) -> String {
    keys.iter().map(key_display).collect::<Vec<_>>().join("/")
}

// ── Action enums ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    Quit,
    SelectNext,
    SelectPrev,
    GoToTop,
    GoToBottom,
    Search,
    ClearSearch,
    NextTag,
    PrevTag,
    AllTags,
    CardTag,
    CopyPrompt,
    CopyLink,
    EditFields,
    ToggleTheme,
    ShowHelp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Back,
    NextField,
    PrevField,
    Copy,
    ClearField,
}

/// Config names of every action per mode, in help order.
pub const BROWSE_ACTIONS: &[(BrowseAction, &str)] = &[
    (BrowseAction::Quit, "quit"),
    (BrowseAction::SelectNext, "select_next"),
    (BrowseAction::SelectPrev, "select_prev"),
    (BrowseAction::GoToTop, "go_to_top"),
    (BrowseAction::GoToBottom, "go_to_bottom"),
    (BrowseAction::Search, "search"),
    (BrowseAction::ClearSearch, "clear_search"),
    (BrowseAction::NextTag, "next_tag"),
    (BrowseAction::PrevTag, "prev_tag"),
    (BrowseAction::AllTags, "all_tags"),
    (BrowseAction::CardTag, "card_tag"),
    (BrowseAction::CopyPrompt, "copy_prompt"),
    (BrowseAction::CopyLink, "copy_link"),
    (BrowseAction::EditFields, "edit_fields"),
    (BrowseAction::ToggleTheme, "toggle_theme"),
    (BrowseAction::ShowHelp, "show_help"),
];

pub const SEARCH_ACTIONS: &[(SearchAction, &str)] = &[
    (SearchAction::Confirm, "confirm"),
    (SearchAction::Cancel, "cancel"),
];

pub const EDIT_ACTIONS: &[(EditAction, &str)] = &[
    (EditAction::Back, "back"),
    (EditAction::NextField, "next_field"),
    (EditAction::PrevField, "prev_field"),
    (EditAction::Copy, "copy"),
    (EditAction::ClearField, "clear_field"),
];

// ── Keymap ──

pub struct Keymap {
    pub browse: HashMap<KeyCode, BrowseAction>,
    pub search: HashMap<KeyCode, SearchAction>,
    pub edit: HashMap<KeyCode, EditAction>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut browse = HashMap::new();
        browse.insert(KeyCode::Char('q'), BrowseAction::Quit);
        browse.insert(KeyCode::Char('j'), BrowseAction::SelectNext);
        browse.insert(KeyCode::Down, BrowseAction::SelectNext);
        browse.insert(KeyCode::Char('k'), BrowseAction::SelectPrev);
        browse.insert(KeyCode::Up, BrowseAction::SelectPrev);
        browse.insert(KeyCode::Char('g'), BrowseAction::GoToTop);
        browse.insert(KeyCode::Home, BrowseAction::GoToTop);
        browse.insert(KeyCode::Char('G'), BrowseAction::GoToBottom);
        browse.insert(KeyCode::End, BrowseAction::GoToBottom);
        browse.insert(KeyCode::Char('/'), BrowseAction::Search);
        browse.insert(KeyCode::Char('x'), BrowseAction::ClearSearch);
        browse.insert(KeyCode::Char('l'), BrowseAction::NextTag);
        browse.insert(KeyCode::Right, BrowseAction::NextTag);
        browse.insert(KeyCode::Char('h'), BrowseAction::PrevTag);
        browse.insert(KeyCode::Left, BrowseAction::PrevTag);
        browse.insert(KeyCode::Char('a'), BrowseAction::AllTags);
        browse.insert(KeyCode::Char('t'), BrowseAction::CardTag);
        browse.insert(KeyCode::Enter, BrowseAction::CopyPrompt);
        browse.insert(KeyCode::Char('y'), BrowseAction::CopyPrompt);
        browse.insert(KeyCode::Char('s'), BrowseAction::CopyLink);
        browse.insert(KeyCode::Char('e'), BrowseAction::EditFields);
        browse.insert(KeyCode::Tab, BrowseAction::EditFields);
        browse.insert(KeyCode::Char('T'), BrowseAction::ToggleTheme);
        browse.insert(KeyCode::Char('?'), BrowseAction::ShowHelp);

        let mut search = HashMap::new();
        search.insert(KeyCode::Enter, SearchAction::Confirm);
        search.insert(KeyCode::Down, SearchAction::Confirm);
        search.insert(KeyCode::Esc, SearchAction::Cancel);

        let mut edit = HashMap::new();
        edit.insert(KeyCode::Esc, EditAction::Back);
        edit.insert(KeyCode::Tab, EditAction::NextField);
        edit.insert(KeyCode::Down, EditAction::NextField);
        edit.insert(KeyCode::BackTab, EditAction::PrevField);
        edit.insert(KeyCode::Up, EditAction::PrevField);
        edit.insert(KeyCode::Enter, EditAction::Copy);
        edit.insert(KeyCode::Delete, EditAction::ClearField);

        Self {
            browse,
            search,
            edit,
        }
    }
}

impl Keymap {
    pub fn load() -> Self {
        Self::from_toml(config::load_toml_config())
    }

    pub fn from_toml(config: TomlConfig) -> Self {
        let mut keymap = Self::default();

        if let Some(browse) = config.browse {
            let map = &mut keymap.browse;
            apply_bindings(map, BrowseAction::Quit, browse.quit);
            apply_bindings(map, BrowseAction::SelectNext, browse.select_next);
            apply_bindings(map, BrowseAction::SelectPrev, browse.select_prev);
            apply_bindings(map, BrowseAction::GoToTop, browse.go_to_top);
            apply_bindings(map, BrowseAction::GoToBottom, browse.go_to_bottom);
            apply_bindings(map, BrowseAction::Search, browse.search);
            apply_bindings(map, BrowseAction::ClearSearch, browse.clear_search);
            apply_bindings(map, BrowseAction::NextTag, browse.next_tag);
            apply_bindings(map, BrowseAction::PrevTag, browse.prev_tag);
            apply_bindings(map, BrowseAction::AllTags, browse.all_tags);
            apply_bindings(map, BrowseAction::CardTag, browse.card_tag);
            apply_bindings(map, BrowseAction::CopyPrompt, browse.copy_prompt);
            apply_bindings(map, BrowseAction::CopyLink, browse.copy_link);
            apply_bindings(map, BrowseAction::EditFields, browse.edit_fields);
            apply_bindings(map, BrowseAction::ToggleTheme, browse.toggle_theme);
            apply_bindings(map, BrowseAction::ShowHelp, browse.show_help);
        }

        if let Some(search) = config.search {
            apply_bindings(&mut keymap.search, SearchAction::Confirm, search.confirm);
            apply_bindings(&mut keymap.search, SearchAction::Cancel, search.cancel);
        }

        if let Some(edit) = config.edit {
            let map = &mut keymap.edit;
            apply_bindings(map, EditAction::Back, edit.back);
            apply_bindings(map, EditAction::NextField, edit.next_field);
            apply_bindings(map, EditAction::PrevField, edit.prev_field);
            apply_bindings(map, EditAction::Copy, edit.copy);
            apply_bindings(map, EditAction::ClearField, edit.clear_field);
        }

        keymap
    }

    /// Every binding spelled out as config tables (settings left empty).
    pub fn to_toml(&self) -> TomlConfig {
        fn keys<A: PartialEq>(map: &HashMap<KeyCode, A>, action: A) -> Option<Vec<String>> {
            Some(keys_for_action(map, action).iter().map(key_display).collect())
        }

        let b = &self.browse;
        let s = &self.search;
        let e = &self.edit;
        TomlConfig {
            settings: None,
            browse: Some(TomlBrowseBindings {
                quit: keys(b, BrowseAction::Quit),
                select_next: keys(b, BrowseAction::SelectNext),
                select_prev: keys(b, BrowseAction::SelectPrev),
                go_to_top: keys(b, BrowseAction::GoToTop),
                go_to_bottom: keys(b, BrowseAction::GoToBottom),
                search: keys(b, BrowseAction::Search),
                clear_search: keys(b, BrowseAction::ClearSearch),
                next_tag: keys(b, BrowseAction::NextTag),
                prev_tag: keys(b, BrowseAction::PrevTag),
                all_tags: keys(b, BrowseAction::AllTags),
                card_tag: keys(b, BrowseAction::CardTag),
                copy_prompt: keys(b, BrowseAction::CopyPrompt),
                copy_link: keys(b, BrowseAction::CopyLink),
                edit_fields: keys(b, BrowseAction::EditFields),
                toggle_theme: keys(b, BrowseAction::ToggleTheme),
                show_help: keys(b, BrowseAction::ShowHelp),
            }),
            search: Some(TomlSearchBindings {
                confirm: keys(s, SearchAction::Confirm),
                cancel: keys(s, SearchAction::Cancel),
            }),
            edit: Some(TomlEditBindings {
                back: keys(e, EditAction::Back),
                next_field: keys(e, EditAction::NextField),
                prev_field: keys(e, EditAction::PrevField),
                copy: keys(e, EditAction::Copy),
                clear_field: keys(e, EditAction::ClearField),
            }),
        }
    }

    pub fn browse_help(&self) -> Vec<(String, &'static str)> {
        let entries: &[(BrowseAction, &str)] = &[
            (BrowseAction::Search, "search"),
            (BrowseAction::SelectNext, "next"),
            (BrowseAction::SelectPrev, "prev"),
            (BrowseAction::NextTag, "next tag"),
            (BrowseAction::PrevTag, "prev tag"),
            (BrowseAction::AllTags, "all"),
            (BrowseAction::CardTag, "card tag"),
            (BrowseAction::CopyPrompt, "copy"),
            (BrowseAction::CopyLink, "link"),
            (BrowseAction::EditFields, "fill"),
            (BrowseAction::ClearSearch, "clear"),
            (BrowseAction::GoToTop, "top"),
            (BrowseAction::GoToBottom, "bottom"),
            (BrowseAction::ToggleTheme, "theme"),
            (BrowseAction::ShowHelp, "help"),
            (BrowseAction::Quit, "quit"),
        ];
        build_help(&self.browse, entries)
    }

    pub fn search_help(&self) -> Vec<(String, &'static str)> {
        let entries: &[(SearchAction, &str)] = &[
            (SearchAction::Confirm, "done"),
            (SearchAction::Cancel, "clear"),
        ];
        build_help(&self.search, entries)
    }

    pub fn edit_help(&self) -> Vec<(String, &'static str)> {
        let entries: &[(EditAction, &str)] = &[
            (EditAction::NextField, "next field"),
            (EditAction::PrevField, "prev field"),
            (EditAction::Copy, "copy"),
            (EditAction::ClearField, "clear field"),
            (EditAction::Back, "back"),
        ];
        build_help(&self.edit, entries)
    }

    pub fn browse_key_hint(&self, action: BrowseAction) -> String {
        keys_for_action(&self.browse, action)
            .first()
            .map(key_display)
            .unwrap_or_else(|| "?".to_string())
    }
}

fn build_help<A: PartialEq + Copy>(
    map: &HashMap<KeyCode, A>,
    entries: &[(A, &'static str)],
) -> Vec<(String, &'static str)> {
    let mut result = Vec::new();
    let mut seen_actions: Vec<A> = Vec::new();

    for &(action, label) in entries {
        if seen_actions.contains(&action) {
            continue;
        }
        seen_actions.push(action);
        let keys = keys_for_action(map, action);
        if keys.is_empty() {
            continue;
        }
        result.push((format_keys(&keys), label));
    }
    result
}
