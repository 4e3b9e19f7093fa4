use std::io::{self, Write};

use bubbles_core::state::{self, KeyValueStore, STATE_KEY, THEME_KEY};

use super::Context;

pub fn cmd_state(ctx: &mut Context, args: &[String], out: &mut dyn Write) -> i32 {
    match args.first().map(|s| s.as_str()) {
        Some("show") => state_show(ctx.store.as_ref(), out),
        Some("reset") => {
            let all = args.get(1).map(|s| s.as_str()) == Some("--all");
            state_reset(ctx.store.as_mut(), all, out)
        }
        Some("path") => state_path(ctx, out),
        _ => {
            eprintln!("Usage: bubbles-cli state <show|reset|path>");
            eprintln!("  show          Print the saved search, tag and theme");
            eprintln!("  reset [--all] Forget the saved search and tag (--all: theme too)");
            eprintln!("  path          Print storage file path");
            1
        }
    }
}

fn state_show(store: &dyn KeyValueStore, out: &mut dyn Write) -> i32 {
    match write_state(store, out) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Failed to write output: {e}");
            1
        }
    }
}

fn write_state(store: &dyn KeyValueStore, out: &mut dyn Write) -> io::Result<()> {
    let current = state::load_state(store);
    writeln!(out, "search: {:?}", current.search)?;
    writeln!(out, "tag:    {}", current.tag)?;
    match state::restore_theme(store) {
        Some(theme) => writeln!(out, "theme:  {}", theme.as_str()),
        None => writeln!(out, "theme:  (default)"),
    }
}

fn state_reset(store: &mut dyn KeyValueStore, all: bool, out: &mut dyn Write) -> i32 {
    let mut keys = vec![STATE_KEY];
    if all {
        keys.push(THEME_KEY);
    }
    for key in keys {
        if let Err(e) = store.remove(key) {
            eprintln!("Failed to reset {key}: {e}");
            return 1;
        }
    }
    let message = if all {
        "Saved state and theme cleared."
    } else {
        "Saved state cleared."
    };
    match writeln!(out, "{message}") {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Failed to write output: {e}");
            1
        }
    }
}

fn state_path(ctx: &Context, out: &mut dyn Write) -> i32 {
    let Some(path) = &ctx.storage_path else {
        eprintln!("Cannot determine storage path.");
        return 1;
    };
    match writeln!(out, "{}", path.display()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Failed to write output: {e}");
            1
        }
    }
}
