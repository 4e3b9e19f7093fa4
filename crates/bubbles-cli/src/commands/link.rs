use std::io::Write;

use bubbles_core::link;

use super::{find_prompt, Context};

pub fn cmd_link(ctx: &Context, args: &[String], out: &mut dyn Write) -> i32 {
    let Some(id) = args.first() else {
        eprintln!("Usage: bubbles-cli link <id>");
        return 1;
    };
    let prompts = match ctx.load_prompts() {
        Ok(p) => p,
        Err(code) => return code,
    };
    if let Err(code) = find_prompt(&prompts, id) {
        return code;
    }
    match writeln!(out, "{}", link::card_url(&ctx.share_base(), id)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Failed to write output: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn prints_card_url() {
        let f = fixture();
        let mut out = Vec::new();
        assert_eq!(cmd_link(&f.ctx, &args(&["review"]), &mut out), 0);
        assert_eq!(output(out), "https://prompts.example.com/#review\n");
    }

    #[test]
    fn configured_fragment_is_replaced() {
        let mut f = fixture();
        f.ctx.share_base_url = Some("https://host/page#old".to_string());
        let mut out = Vec::new();
        assert_eq!(cmd_link(&f.ctx, &args(&["plain"]), &mut out), 0);
        assert_eq!(output(out), "https://host/page#plain\n");
    }

    #[test]
    fn unknown_id_fails() {
        let f = fixture();
        let mut out = Vec::new();
        assert_eq!(cmd_link(&f.ctx, &args(&["nope"]), &mut out), 1);
        assert_eq!(cmd_link(&f.ctx, &[], &mut out), 1);
    }
}
