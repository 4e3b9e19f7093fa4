use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::event::KeyCode;

use bubbles_core::config::{self, TomlConfig};
use bubbles_core::keymap::{
    self, Keymap, TomlBrowseBindings, TomlEditBindings, TomlSearchBindings, BROWSE_ACTIONS,
    EDIT_ACTIONS, SEARCH_ACTIONS,
};

const MODES: &str = "browse, search, edit";

pub fn cmd_keys(args: &[String]) -> i32 {
    match args.first().map(|s| s.as_str()) {
        None => keys_list(None),
        Some("list") => keys_list(args.get(1).map(|s| s.as_str())),
        Some("set") => keys_set(&args[1..]),
        Some("reset") => keys_reset(&args[1..]),
        Some(mode) if action_names_for_mode(mode).is_some() => keys_list(Some(mode)),
        _ => {
            eprintln!("Usage: bubbles-cli keys [list|set|reset]");
            eprintln!("  [list] [mode]                   List keybindings");
            eprintln!("  set <mode> <action> <key1...>   Set keybinding");
            eprintln!("  reset <mode> [action]           Reset to defaults");
            1
        }
    }
}

fn keys_list(mode: Option<&str>) -> i32 {
    let km = Keymap::load();
    match write_bindings(&km, mode, &mut io::stdout().lock()) {
        Ok(true) => 0,
        Ok(false) => {
            eprintln!("Unknown mode: {}", mode.unwrap_or_default());
            eprintln!("Valid modes: {MODES}");
            1
        }
        Err(e) => {
            eprintln!("Failed to write bindings: {e}");
            1
        }
    }
}

/// Write bindings as TOML-style tables. `Ok(false)` for an unknown mode.
fn write_bindings(km: &Keymap, mode: Option<&str>, out: &mut dyn Write) -> io::Result<bool> {
    let tables = [
        ("browse", invert_map(&km.browse, BROWSE_ACTIONS)),
        ("search", invert_map(&km.search, SEARCH_ACTIONS)),
        ("edit", invert_map(&km.edit, EDIT_ACTIONS)),
    ];
    let mut written = false;
    for (name, bindings) in &tables {
        if mode.is_some_and(|m| m != *name) {
            continue;
        }
        if written {
            writeln!(out)?;
        }
        writeln!(out, "[{name}]")?;
        for (action, keys) in bindings {
            let keys_str: Vec<String> = keys.iter().map(|k| format!("\"{k}\"")).collect();
            writeln!(out, "{action} = [{}]", keys_str.join(", "))?;
        }
        written = true;
    }
    Ok(written)
}

/// Invert a KeyCode->Action map to (action name, sorted key names).
fn invert_map<A: Eq + Copy>(
    map: &HashMap<KeyCode, A>,
    action_names: &[(A, &str)],
) -> Vec<(String, Vec<String>)> {
    action_names
        .iter()
        .map(|&(action, name)| {
            let mut keys: Vec<String> = map
                .iter()
                .filter(|(_, a)| **a == action)
                .map(|(k, _)| keymap::key_display(k))
                .collect();
            keys.sort();
            (name.to_string(), keys)
        })
        .collect()
}

fn keys_set(args: &[String]) -> i32 {
    if args.len() < 3 {
        eprintln!("Usage: bubbles-cli keys set <mode> <action> <key1> [key2...]");
        return 1;
    }
    let mode = &args[0];
    let action = &args[1];
    let keys: Vec<String> = args[2..].to_vec();

    if let Some(bad) = keys.iter().find(|k| keymap::parse_key(k).is_none()) {
        eprintln!("Invalid key: {bad}");
        return 1;
    }

    let mut config = config::load_toml_config();
    if let Err(e) = set_toml_action(&mut config, mode, action, Some(keys.clone())) {
        eprintln!("{e}");
        return 1;
    }
    if let Err(e) = config::save_toml_config(&config) {
        eprintln!("Failed to save config: {e}");
        return 1;
    }

    let keys_display: Vec<String> = keys.iter().map(|k| format!("\"{k}\"")).collect();
    println!("Set {mode}.{action} = [{}]", keys_display.join(", "));
    0
}

fn keys_reset(args: &[String]) -> i32 {
    let Some(mode) = args.first() else {
        eprintln!("Usage: bubbles-cli keys reset <mode> [action]");
        return 1;
    };
    let action = args.get(1).map(|s| s.as_str());

    let mut config = config::load_toml_config();
    let result = match action {
        Some(a) => set_toml_action(&mut config, mode, a, None),
        None => reset_toml_mode(&mut config, mode),
    };
    if let Err(e) = result {
        eprintln!("{e}");
        return 1;
    }
    if let Err(e) = config::save_toml_config(&config) {
        eprintln!("Failed to save config: {e}");
        return 1;
    }

    match action {
        Some(a) => println!("Reset {mode}.{a} to default."),
        None => println!("Reset all {mode} bindings to defaults."),
    }
    0
}

// ── helpers ──

fn action_names_for_mode(mode: &str) -> Option<Vec<&'static str>> {
    fn names<A>(actions: &[(A, &'static str)]) -> Vec<&'static str> {
        actions.iter().map(|(_, name)| *name).collect()
    }
    match mode {
        "browse" => Some(names(BROWSE_ACTIONS)),
        "search" => Some(names(SEARCH_ACTIONS)),
        "edit" => Some(names(EDIT_ACTIONS)),
        _ => None,
    }
}

fn validate(mode: &str, action: &str) -> Result<(), String> {
    let valid = action_names_for_mode(mode)
        .ok_or_else(|| format!("Unknown mode: {mode}\nValid modes: {MODES}"))?;
    if valid.contains(&action) {
        Ok(())
    } else {
        Err(format!(
            "Unknown action '{action}' for mode '{mode}'.\nValid actions: {}",
            valid.join(", ")
        ))
    }
}

/// The config field holding the keys for `mode.action`, creating the mode's
/// table if needed.
fn binding_slot<'a>(
    config: &'a mut TomlConfig,
    mode: &str,
    action: &str,
) -> Option<&'a mut Option<Vec<String>>> {
    let slot = match mode {
        "browse" => {
            let b = config.browse.get_or_insert_with(TomlBrowseBindings::default);
            match action {
                "quit" => &mut b.quit,
                "select_next" => &mut b.select_next,
                "select_prev" => &mut b.select_prev,
                "go_to_top" => &mut b.go_to_top,
                "go_to_bottom" => &mut b.go_to_bottom,
                "search" => &mut b.search,
                "clear_search" => &mut b.clear_search,
                "next_tag" => &mut b.next_tag,
                "prev_tag" => &mut b.prev_tag,
                "all_tags" => &mut b.all_tags,
                "card_tag" => &mut b.card_tag,
                "copy_prompt" => &mut b.copy_prompt,
                "copy_link" => &mut b.copy_link,
                "edit_fields" => &mut b.edit_fields,
                "toggle_theme" => &mut b.toggle_theme,
                "show_help" => &mut b.show_help,
                _ => return None,
            }
        }
        "search" => {
            let b = config.search.get_or_insert_with(TomlSearchBindings::default);
            match action {
                "confirm" => &mut b.confirm,
                "cancel" => &mut b.cancel,
                _ => return None,
            }
        }
        "edit" => {
            let b = config.edit.get_or_insert_with(TomlEditBindings::default);
            match action {
                "back" => &mut b.back,
                "next_field" => &mut b.next_field,
                "prev_field" => &mut b.prev_field,
                "copy" => &mut b.copy,
                "clear_field" => &mut b.clear_field,
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(slot)
}

/// Set (`Some`) or reset (`None`) the keys of one action.
fn set_toml_action(
    config: &mut TomlConfig,
    mode: &str,
    action: &str,
    keys: Option<Vec<String>>,
) -> Result<(), String> {
    validate(mode, action)?;
    let slot = binding_slot(config, mode, action)
        .ok_or_else(|| format!("Unknown action '{action}' for mode '{mode}'."))?;
    *slot = keys;
    Ok(())
}

fn reset_toml_mode(config: &mut TomlConfig, mode: &str) -> Result<(), String> {
    match mode {
        "browse" => config.browse = None,
        "search" => config.search = None,
        "edit" => config.edit = None,
        _ => return Err(format!("Unknown mode: {mode}\nValid modes: {MODES}")),
    }
    Ok(())
}
