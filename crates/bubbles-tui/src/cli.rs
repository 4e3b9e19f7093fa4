#[derive(Debug, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub catalog: Option<String>,
    /// Share URL, `#id` or bare id of the card to open on.
    pub link: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Exit(i32),
    LaunchTui(LaunchOptions),
}

pub fn run(args: &[String]) -> CliAction {
    let mut opts = LaunchOptions::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "help" | "--help" | "-h" => return CliAction::Exit(cmd_help()),
            "--version" | "-V" => {
                println!("bubbles {}", env!("CARGO_PKG_VERSION"));
                return CliAction::Exit(0);
            }
            flag @ ("--catalog" | "--link") => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {flag} requires an argument");
                    return CliAction::Exit(1);
                };
                if flag == "--catalog" {
                    opts.catalog = Some(value.clone());
                } else {
                    opts.link = Some(value.clone());
                }
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run 'bubbles --help' for usage.");
                return CliAction::Exit(1);
            }
        }
    }
    CliAction::LaunchTui(opts)
}

fn cmd_help() -> i32 {
    println!("bubbles {}", env!("CARGO_PKG_VERSION"));
    println!("Browse a catalog of prompt snippets and copy them to the clipboard.");
    println!();
    println!("Usage: bubbles [options]");
    println!();
    println!("Options:");
    println!("  --catalog <path>    Prompt file to load (default: $BUBBLES_CATALOG,");
    println!("                      then config, then ./prompts.json)");
    println!("  --link <url|#id>    Open with the linked card selected");
    println!("  --version, -V       Show version");
    println!("  --help, -h          Show this help");
    println!();
    println!("Press ? inside the browser for key bindings.");
    println!();
    println!("For scripting and config management, use bubbles-cli:");
    println!("  bubbles-cli list    Print matching prompts");
    println!("  bubbles-cli copy    Copy a prompt with filled placeholders");
    println!("  bubbles-cli keys    Show keybindings");
    println!("  bubbles-cli config  Manage config file");
    0
}
