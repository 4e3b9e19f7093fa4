mod commands;
mod presenters;

use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

use commands::Context;

const LOG_ENV: &str = "BUBBLES_LOG";

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    let code = run(&args);
    std::process::exit(code);
}

/// Diagnostics go to stderr so stdout stays pipeable.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &[String]) -> i32 {
    let mut rest = args.get(1..).unwrap_or_default();
    let mut catalog: Option<&str> = None;
    if rest.first().map(|s| s.as_str()) == Some("--catalog") {
        let Some(path) = rest.get(1) else {
            eprintln!("Error: --catalog requires a path argument");
            return 1;
        };
        catalog = Some(path.as_str());
        rest = &rest[2..];
    }

    let cmd = rest.first().map(|s| s.as_str());
    let sub_args = rest.get(1..).unwrap_or_default();
    match cmd {
        Some("help") | Some("--help") | Some("-h") => cmd_help(),
        Some("keys") => commands::keys::cmd_keys(sub_args),
        Some("config") => commands::config::cmd_config(sub_args),
        Some(name @ ("list" | "tags" | "show" | "copy" | "link" | "state")) => {
            let mut ctx = Context::load(catalog);
            let mut stdout = io::stdout().lock();
            let code = dispatch(&mut ctx, name, sub_args, &mut stdout);
            let _ = stdout.flush();
            code
        }
        _ => {
            cmd_help();
            1
        }
    }
}

/// Commands that read the catalog or the saved state.
fn dispatch(ctx: &mut Context, cmd: &str, args: &[String], out: &mut dyn Write) -> i32 {
    match cmd {
        "list" => commands::list::cmd_list(ctx, args, out),
        "tags" => commands::tags::cmd_tags(ctx, out),
        "show" => commands::show::cmd_show(ctx, args, out),
        "copy" => commands::copy::cmd_copy(ctx, args, out),
        "link" => commands::link::cmd_link(ctx, args, out),
        "state" => commands::state::cmd_state(ctx, args, out),
        _ => {
            eprintln!("Unknown command: {cmd}");
            1
        }
    }
}

fn cmd_help() -> i32 {
    println!("bubbles-cli {}", env!("CARGO_PKG_VERSION"));
    println!("Query and copy prompts from the catalog without the browser.");
    println!();
    println!("Usage: bubbles-cli [--catalog <path>] <command> [options]");
    println!();
    println!("Commands:");
    println!("  list [--tag T] [--format F] [query...]");
    println!("                      Print prompts matching the tag and every query word");
    println!("                      Formats: plain (default), markdown, json");
    println!("  tags                List tags with prompt counts");
    println!("  show <id>           Print one prompt with its fields and share link");
    println!("  copy <id> [name=value...] [--print]");
    println!("                      Fill placeholders and copy (or print) the result");
    println!("  link <id>           Print the share link for a prompt");
    println!("  state               Manage the browser's saved state");
    println!("    show              Print saved search, tag and theme");
    println!("    reset [--all]     Forget saved search and tag");
    println!("    path              Print storage file path");
    println!("  keys                Manage keybindings");
    println!("    [list] [mode]     List keybindings (all or by mode)");
    println!("    set <mode> <action> <key1...>");
    println!("                      Set keys for an action");
    println!("    reset <mode> [action]");
    println!("                      Reset bindings to defaults");
    println!("  config              Manage config file");
    println!("    path              Print config file path");
    println!("    edit              Open config in $EDITOR");
    println!("    init [--force]    Create config with defaults");
    println!();
    println!("Modes: browse, search, edit");
    println!();
    println!("The catalog is --catalog, else $BUBBLES_CATALOG, else the config's");
    println!("`catalog` setting, else ./prompts.json.");
    println!();
    println!("Examples:");
    println!("  bubbles-cli list --tag dev review");
    println!("  bubbles-cli copy code-review file=src/main.rs");
    println!("  bubbles-cli --catalog team.json list --format markdown");
    println!("  bubbles-cli keys set browse copy_link L");
    0
}
