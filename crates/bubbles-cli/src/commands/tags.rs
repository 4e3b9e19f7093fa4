use std::io::{self, Write};

use bubbles_core::catalog::{self, Prompt, TAG_ALL};

use super::Context;

/// Print every tag with the number of prompts carrying it.
pub fn cmd_tags(ctx: &Context, out: &mut dyn Write) -> i32 {
    let prompts = match ctx.load_prompts() {
        Ok(p) => p,
        Err(code) => return code,
    };
    if let Err(e) = write_tags(&prompts, out) {
        eprintln!("Failed to write output: {e}");
        return 1;
    }
    0
}

fn write_tags(prompts: &[Prompt], out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{:<24} PROMPTS", "TAG")?;
    for tag in catalog::unique_tags(prompts) {
        let count = if tag == TAG_ALL {
            prompts.len()
        } else {
            prompts.iter().filter(|p| p.tags.contains(&tag)).count()
        };
        writeln!(out, "{tag:<24} {count}")?;
    }
    Ok(())
}
