use std::io::{self, Write};

use bubbles_core::catalog::Prompt;
use bubbles_core::link;
use bubbles_core::placeholder::PlaceholderForm;

use super::{find_prompt, Context};

pub fn cmd_show(ctx: &Context, args: &[String], out: &mut dyn Write) -> i32 {
    let Some(id) = args.first() else {
        eprintln!("Usage: bubbles-cli show <id>");
        return 1;
    };
    let prompts = match ctx.load_prompts() {
        Ok(p) => p,
        Err(code) => return code,
    };
    let prompt = match find_prompt(&prompts, id) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let url = link::card_url(&ctx.share_base(), &prompt.id);
    if let Err(e) = write_prompt(prompt, &url, out) {
        eprintln!("Failed to write output: {e}");
        return 1;
    }
    0
}

fn write_prompt(prompt: &Prompt, url: &str, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{} ({})", prompt.title, prompt.id)?;
    if !prompt.tags.is_empty() {
        writeln!(out, "Tags:   {}", prompt.tags.join(", "))?;
    }
    let form = PlaceholderForm::new(&prompt.text);
    let mut names = form.field_names();
    if !names.is_empty() {
        // Repeated identifiers are separate fields but fill the same way
        let mut seen = std::collections::HashSet::new();
        names.retain(|n| seen.insert(*n));
        writeln!(out, "Fields: {}", names.join(", "))?;
    }
    writeln!(out, "Link:   {url}")?;
    writeln!(out)?;
    writeln!(out, "{}", prompt.text)
}
