//! Text renderings of the browser view for `bubbles-cli list`.

use std::io::{self, Write};

use bubbles_core::view::{BrowserView, Card, Presenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    Markdown,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Format> {
        match s {
            "plain" | "text" => Some(Format::Plain),
            "markdown" | "md" => Some(Format::Markdown),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    pub fn presenter(self) -> Box<dyn Presenter> {
        match self {
            Format::Plain => Box::new(PlainPresenter),
            Format::Markdown => Box::new(MarkdownPresenter),
            Format::Json => Box::new(JsonPresenter),
        }
    }
}

/// Terminal listing: chip line, then one indented block per card.
pub struct PlainPresenter;

impl Presenter for PlainPresenter {
    fn present(&self, view: &BrowserView<'_>, out: &mut dyn Write) -> io::Result<()> {
        let chips: Vec<String> = view
            .chips
            .iter()
            .map(|c| {
                if c.active {
                    format!("[{}]", c.label)
                } else {
                    c.label.clone()
                }
            })
            .collect();
        writeln!(out, "{}", chips.join(" "))?;
        if !view.search.is_empty() {
            writeln!(out, "search: {}", view.search)?;
        }
        writeln!(out)?;

        for card in &view.cards {
            write_plain_card(card, out)?;
        }
        if let Some(notice) = &view.notice {
            writeln!(out, "{}", notice.message())?;
        } else {
            writeln!(out, "{} prompt(s) shown.", view.cards.len())?;
        }
        Ok(())
    }
}

fn write_plain_card(card: &Card<'_>, out: &mut dyn Write) -> io::Result<()> {
    let marker = if card.linked { "* " } else { "" };
    if card.tags.is_empty() {
        writeln!(out, "{marker}{}  {}", card.id, card.title)?;
    } else {
        writeln!(out, "{marker}{}  {}  ({})", card.id, card.title, card.tags.join(", "))?;
    }
    for line in card.default_text().lines() {
        writeln!(out, "    {line}")?;
    }
    writeln!(out)
}

pub struct MarkdownPresenter;

impl Presenter for MarkdownPresenter {
    fn present(&self, view: &BrowserView<'_>, out: &mut dyn Write) -> io::Result<()> {
        match view.active_tag() {
            Some(tag) if view.search.is_empty() => writeln!(out, "# Prompts: {tag}")?,
            Some(tag) => writeln!(out, "# Prompts: {tag}, \"{}\"", view.search)?,
            None => writeln!(out, "# Prompts")?,
        }
        if let Some(notice) = &view.notice {
            writeln!(out)?;
            writeln!(out, "_{}_", notice.message())?;
            return Ok(());
        }
        for card in &view.cards {
            writeln!(out)?;
            writeln!(out, "## {}", card.title)?;
            writeln!(out)?;
            let tags: Vec<String> = card.tags.iter().map(|t| format!("`{t}`")).collect();
            if !tags.is_empty() {
                writeln!(out, "Tags: {}", tags.join(" "))?;
            }
            let names = card.placeholder_names();
            if !names.is_empty() {
                let names: Vec<String> = names.iter().map(|n| format!("`{n}`")).collect();
                writeln!(out, "Fields: {}", names.join(" "))?;
            }
            writeln!(out)?;
            writeln!(out, "```text")?;
            writeln!(out, "{}", card.default_text())?;
            writeln!(out, "```")?;
        }
        Ok(())
    }
}

/// The view model as pretty JSON.
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn present(&self, view: &BrowserView<'_>, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, view).map_err(io::Error::other)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbles_core::browser::Browser;
    use bubbles_core::catalog;
    use bubbles_core::state::MemoryStore;

    const CATALOG: &str = r#"[
        {"id": "a", "title": "Greeting", "text": "Hi {name}", "tags": ["social"]},
        {"id": "b", "title": "Code review", "text": "Review {file}\nfor {issue}", "tags": ["dev"]}
    ]"#;

    fn browser() -> Browser {
        Browser::new(
            catalog::parse_catalog(CATALOG).unwrap(),
            Box::new(MemoryStore::new()),
        )
    }

    fn render(format: Format, browser: &Browser) -> String {
        let mut out = Vec::new();
        format
            .presenter()
            .present(&browser.view(None), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_formats() {
        assert_eq!(Format::parse("plain"), Some(Format::Plain));
        assert_eq!(Format::parse("md"), Some(Format::Markdown));
        assert_eq!(Format::parse("json"), Some(Format::Json));
        assert_eq!(Format::parse("html"), None);
    }

    #[test]
    fn plain_lists_cards_with_default_text() {
        let text = render(Format::Plain, &browser());
        assert!(text.starts_with("[all] dev social\n"));
        assert!(text.contains("a  Greeting  (social)\n    Hi name\n"));
        assert!(text.contains("    Review file\n    for issue\n"));
        assert!(text.contains("2 prompt(s) shown."));
    }

    #[test]
    fn plain_shows_no_match_notice() {
        let mut b = browser();
        b.set_search("nothing here");
        let text = render(Format::Plain, &b);
        assert!(text.contains("search: nothing here"));
        assert!(text.contains("No prompts match your search/filter."));
    }

    #[test]
    fn markdown_lists_fields() {
        let mut b = browser();
        b.select_tag("dev");
        let text = render(Format::Markdown, &b);
        assert!(text.starts_with("# Prompts: dev\n"));
        assert!(text.contains("## Code review"));
        assert!(text.contains("Fields: `file` `issue`"));
        assert!(!text.contains("Greeting"));
    }

    #[test]
    fn json_is_the_view_model() {
        let text = render(Format::Json, &browser());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["cards"].as_array().unwrap().len(), 2);
        assert_eq!(value["cards"][0]["id"], "a");
        assert_eq!(value["chips"][0]["label"], "all");
        assert_eq!(value["chips"][0]["active"], true);
        assert!(value.get("notice").is_none());
    }
}
