use std::path::{Path, PathBuf};

use bubbles_core::config;

pub fn cmd_config(args: &[String]) -> i32 {
    match args.first().map(|s| s.as_str()) {
        Some("path") => config_path(),
        Some("edit") => config_edit(),
        Some("init") => config_init(args.get(1).map(|s| s.as_str()) == Some("--force")),
        _ => {
            eprintln!("Usage: bubbles-cli config <path|edit|init>");
            eprintln!("  path          Print config file path");
            eprintln!("  edit          Open config in $EDITOR");
            eprintln!("  init [--force] Create config with defaults");
            1
        }
    }
}

fn path_or_err() -> Result<PathBuf, i32> {
    config::config_path().ok_or_else(|| {
        eprintln!("Cannot determine config path.");
        1
    })
}

fn config_path() -> i32 {
    match path_or_err() {
        Ok(p) => {
            println!("{}", p.display());
            0
        }
        Err(code) => code,
    }
}

fn config_edit() -> i32 {
    let path = match path_or_err() {
        Ok(p) => p,
        Err(code) => return code,
    };

    // Create file with defaults if it doesn't exist
    if !path.exists() {
        if let Err(e) = config::save_toml_config_to(&path, &config::default_toml_config()) {
            eprintln!("Failed to create config file: {e}");
            return 1;
        }
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());
    match std::process::Command::new(&editor).arg(&path).status() {
        Ok(status) if status.success() => 0,
        Ok(_) => 1,
        Err(e) => {
            eprintln!("Failed to open editor '{editor}': {e}");
            1
        }
    }
}

fn config_init(force: bool) -> i32 {
    match path_or_err() {
        Ok(path) => config_init_at(&path, force),
        Err(code) => code,
    }
}

fn config_init_at(path: &Path, force: bool) -> i32 {
    if path.exists() && !force {
        eprintln!("Config file already exists: {}", path.display());
        eprintln!("Use --force to overwrite.");
        return 1;
    }

    if let Err(e) = config::save_toml_config_to(path, &config::default_toml_config()) {
        eprintln!("Failed to write config: {e}");
        return 1;
    }
    println!("Created config: {}", path.display());
    0
}
