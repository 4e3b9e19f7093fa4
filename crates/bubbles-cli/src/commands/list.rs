use std::io::Write;

use bubbles_core::browser::Browser;
use bubbles_core::state::MemoryStore;

use super::Context;
use crate::presenters::Format;

pub fn cmd_list(ctx: &Context, args: &[String], out: &mut dyn Write) -> i32 {
    let mut tag: Option<&str> = None;
    let mut format = Format::Plain;
    let mut query: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--tag" | "--format") => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {flag} requires an argument");
                    return 1;
                };
                if flag == "--tag" {
                    tag = Some(value.as_str());
                } else {
                    match Format::parse(value) {
                        Some(f) => format = f,
                        None => {
                            eprintln!("Unknown format: {value}");
                            eprintln!("Valid formats: plain, markdown, json");
                            return 1;
                        }
                    }
                }
                i += 2;
            }
            word => {
                query.push(word);
                i += 1;
            }
        }
    }

    let prompts = match ctx.load_prompts() {
        Ok(p) => p,
        Err(code) => return code,
    };

    // Listing never touches the browser's saved state
    let mut browser = Browser::new(prompts, Box::new(MemoryStore::new()));
    if let Some(tag) = tag {
        browser.select_tag(tag);
    }
    browser.set_search(&query.join(" "));

    if let Err(e) = format.presenter().present(&browser.view(None), out) {
        eprintln!("Failed to write output: {e}");
        return 1;
    }
    0
}
