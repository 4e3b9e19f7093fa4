use std::io::Write;

use bubbles_core::placeholder::{self, PlaceholderForm};

use super::{find_prompt, Context};

/// Resolve a prompt's placeholders from `name=value` arguments and copy the
/// result, or print it with `--print`.
pub fn cmd_copy(ctx: &mut Context, args: &[String], out: &mut dyn Write) -> i32 {
    let mut print = false;
    let mut id: Option<&str> = None;
    let mut fills: Vec<(&str, &str)> = Vec::new();
    for arg in args {
        if arg == "--print" {
            print = true;
        } else if let Some((name, value)) = arg.split_once('=') {
            fills.push((name, value));
        } else if id.is_none() {
            id = Some(arg.as_str());
        } else {
            eprintln!("Unexpected argument: {arg}");
            return 1;
        }
    }
    let Some(id) = id else {
        eprintln!("Usage: bubbles-cli copy <id> [name=value...] [--print]");
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

    let mut form = PlaceholderForm::new(&prompt.text);
    for (name, value) in fills {
        if form.fill(name, value) == 0 {
            eprintln!("Prompt '{id}' has no placeholder '{name}'.");
            let names = form.field_names();
            if !names.is_empty() {
                eprintln!("Fields: {}", names.join(", "));
            }
            return 1;
        }
    }
    let text = placeholder::clipboard_text(&form.resolve());

    if print {
        if let Err(e) = writeln!(out, "{text}") {
            eprintln!("Failed to write output: {e}");
            return 1;
        }
        return 0;
    }
    match ctx.clipboard.set_text(&text) {
        Ok(()) => {
            tracing::info!(id, chars = text.chars().count(), "copied to clipboard");
            eprintln!("Copied '{id}' to clipboard.");
            0
        }
        Err(e) => {
            eprintln!("Copy failed: {e}");
            eprintln!("Use --print to write the text to stdout instead.");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    fn copied(f: &Fixture) -> Option<String> {
        f.clipboard.0.borrow().contents.last().cloned()
    }

    #[test]
    fn copies_with_identifiers_by_default() {
        let mut f = fixture();
        let mut out = Vec::new();
        assert_eq!(cmd_copy(&mut f.ctx, &args(&["greet"]), &mut out), 0);
        assert_eq!(copied(&f).as_deref(), Some("Hi name, from name and sender"));
        assert!(out.is_empty());
    }

    #[test]
    fn fills_every_field_with_the_same_name() {
        let mut f = fixture();
        let mut out = Vec::new();
        let code = cmd_copy(&mut f.ctx, &args(&["greet", "name=Ada", "sender=Bo"]), &mut out);
        assert_eq!(code, 0);
        assert_eq!(copied(&f).as_deref(), Some("Hi Ada, from Ada and Bo"));
    }

    #[test]
    fn empty_value_falls_back_to_identifier() {
        let mut f = fixture();
        let mut out = Vec::new();
        cmd_copy(&mut f.ctx, &args(&["greet", "name="]), &mut out);
        assert_eq!(copied(&f).as_deref(), Some("Hi name, from name and sender"));
    }

    #[test]
    fn print_trims_and_strips_carriage_returns() {
        let mut f = fixture();
        let mut out = Vec::new();
        let code = cmd_copy(&mut f.ctx, &args(&["review", "file=lib.rs", "--print"]), &mut out);
        assert_eq!(code, 0);
        assert_eq!(output(out), "Review lib.rs\nfor issue\n");
        assert!(copied(&f).is_none());
    }

    #[test]
    fn value_may_contain_equals() {
        let mut f = fixture();
        let mut out = Vec::new();
        cmd_copy(&mut f.ctx, &args(&["review", "issue=a=b", "--print"]), &mut out);
        assert_eq!(output(out), "Review file\nfor a=b\n");
    }

    #[test]
    fn unknown_placeholder_fails() {
        let mut f = fixture();
        let mut out = Vec::new();
        assert_eq!(cmd_copy(&mut f.ctx, &args(&["greet", "nick=x"]), &mut out), 1);
        assert!(copied(&f).is_none());
    }

    #[test]
    fn clipboard_failure_exits_one() {
        let mut f = fixture();
        f.clipboard.0.borrow_mut().fail = true;
        let mut out = Vec::new();
        assert_eq!(cmd_copy(&mut f.ctx, &args(&["plain"]), &mut out), 1);
    }

    #[test]
    fn missing_id_fails() {
        let mut f = fixture();
        let mut out = Vec::new();
        assert_eq!(cmd_copy(&mut f.ctx, &args(&["--print"]), &mut out), 1);
        assert_eq!(cmd_copy(&mut f.ctx, &args(&["nope"]), &mut out), 1);
    }
}
