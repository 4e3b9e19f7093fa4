use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use bubbles_core::keymap::BrowseAction;
use bubbles_core::placeholder::{PlaceholderForm, Segment};
use bubbles_core::state::Theme;
use bubbles_core::view::{BrowserView, Card, Notice};

use crate::app::{App, AppMode};

/// Colors for one theme.
struct Palette {
    bg: Color,
    fg: Color,
    dim: Color,
    accent: Color,
    border: Color,
    chip_fg: Color,
    chip_active: Color,
    selected_bg: Color,
    field_bg: Color,
    focus_bg: Color,
    linked: Color,
    error: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::Rgb(250, 250, 247),
                fg: Color::Rgb(30, 30, 30),
                dim: Color::Rgb(140, 140, 140),
                accent: Color::Rgb(30, 100, 200),
                border: Color::Rgb(190, 190, 200),
                chip_fg: Color::Rgb(60, 60, 80),
                chip_active: Color::Rgb(30, 100, 200),
                selected_bg: Color::Rgb(225, 235, 250),
                field_bg: Color::Rgb(235, 235, 235),
                focus_bg: Color::Rgb(255, 240, 180),
                linked: Color::Rgb(200, 120, 0),
                error: Color::Rgb(190, 30, 30),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(20, 20, 30),
                fg: Color::White,
                dim: Color::DarkGray,
                accent: Color::Cyan,
                border: Color::Rgb(80, 80, 100),
                chip_fg: Color::Gray,
                chip_active: Color::Cyan,
                selected_bg: Color::Rgb(40, 40, 60),
                field_bg: Color::Rgb(45, 45, 60),
                focus_bg: Color::Rgb(80, 80, 20),
                linked: Color::Yellow,
                error: Color::LightRed,
            },
        }
    }
}

pub fn render(f: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme);
    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Length(1), // tag chips
            Constraint::Min(5),    // cards
            Constraint::Length(1), // help bar
        ])
        .split(f.area());

    render_search_bar(f, app, &palette, chunks[0]);

    let view = app.browser.view(app.linked_id.as_deref());
    render_chips(f, &view, &palette, chunks[1]);
    match &view.notice {
        Some(notice) => render_notice(f, notice, &palette, chunks[2]),
        None => {
            let detail = DetailContext {
                forms: &app.forms,
                mode: app.mode,
            };
            render_cards(f, &view, &mut app.list_state, &detail, &palette, chunks[2]);
        }
    }
    render_help_bar(f, app, &palette, chunks[3]);

    if app.show_help_overlay {
        render_help_overlay(f, app, &palette, centered_rect(60, 80, f.area()));
    }
}

fn render_search_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let searching = app.mode == AppMode::Search;
    let (title, content, style, border_color) = if searching {
        (
            " Search (Enter to apply, Esc to clear) ".to_string(),
            app.search_input.clone(),
            Style::default().fg(palette.fg),
            palette.accent,
        )
    } else if app.search_input.is_empty() {
        let key = app.keymap.browse_key_hint(BrowseAction::Search);
        (
            format!(" Search (press '{key}') "),
            String::new(),
            Style::default().fg(palette.dim),
            palette.border,
        )
    } else {
        (
            " Search ".to_string(),
            app.search_input.clone(),
            Style::default().fg(palette.fg),
            palette.border,
        )
    };

    let paragraph = Paragraph::new(content).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(title, Style::default().fg(border_color))),
    );
    f.render_widget(paragraph, area);

    if searching {
        let x = area.x + app.search_input.chars().count() as u16 + 1;
        let y = area.y + 1;
        f.set_cursor_position((x, y));
    }
}

fn render_chips(f: &mut Frame, view: &BrowserView<'_>, palette: &Palette, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for chip in &view.chips {
        let style = if chip.active {
            Style::default()
                .fg(palette.bg)
                .bg(palette.chip_active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.chip_fg)
        };
        spans.push(Span::styled(format!(" {} ", chip.label), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notice(f: &mut Frame, notice: &Notice, palette: &Palette, area: Rect) {
    let color = match notice {
        Notice::NoMatches => palette.dim,
        Notice::LoadFailed(_) => palette.error,
    };
    let paragraph = Paragraph::new(notice.message())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(paragraph, area);
}

/// What the detail pane needs beyond the card itself.
struct DetailContext<'a> {
    forms: &'a HashMap<String, PlaceholderForm>,
    mode: AppMode,
}

fn render_cards(
    f: &mut Frame,
    view: &BrowserView<'_>,
    list_state: &mut ListState,
    detail: &DetailContext<'_>,
    palette: &Palette,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let title_width = (chunks[0].width as usize).saturating_sub(6);
    let items: Vec<ListItem> = view
        .cards
        .iter()
        .map(|card| {
            let mut spans = vec![Span::styled(
                truncate(card.title, title_width),
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
            )];
            if card.linked {
                spans.push(Span::styled(" ●", Style::default().fg(palette.linked)));
            }
            let tags: Vec<Span> = card
                .tags
                .iter()
                .flat_map(|tag| {
                    [
                        Span::styled(format!("#{tag}"), Style::default().fg(tag_color(tag))),
                        Span::raw(" "),
                    ]
                })
                .collect();
            ListItem::new(vec![Line::from(spans), Line::from(tags)])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(Span::styled(
                    format!(" Prompts ({}) ", view.cards.len()),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                )),
        )
        .highlight_style(
            Style::default()
                .bg(palette.selected_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, chunks[0], list_state);

    let selected = list_state.selected().and_then(|i| view.cards.get(i));
    if let Some(card) = selected {
        render_detail(f, detail, card, palette, chunks[1]);
    }
}

fn render_detail(
    f: &mut Frame,
    detail: &DetailContext<'_>,
    card: &Card<'_>,
    palette: &Palette,
    area: Rect,
) {
    let editing = detail.mode == AppMode::Edit;
    let form = detail.forms.get(card.id);
    let values = form.map(|form| form.values()).unwrap_or(&[]);
    let focus = if editing {
        form.and_then(|form| form.focused())
    } else {
        None
    };

    let mut lines = vec![Line::from(
        card.tags
            .iter()
            .flat_map(|tag| {
                [
                    Span::styled(
                        format!(" {tag} "),
                        Style::default().fg(palette.bg).bg(tag_color(tag)),
                    ),
                    Span::raw(" "),
                ]
            })
            .collect::<Vec<_>>(),
    )];
    lines.push(Line::from(""));
    lines.extend(body_lines(&card.segments, values, focus, palette));

    let border_color = if editing {
        palette.accent
    } else if card.linked {
        palette.linked
    } else {
        palette.border
    };
    let title = if editing {
        format!(" {} (editing) ", card.title)
    } else {
        format!(" {} ", card.title)
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(
                    title,
                    Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(paragraph, area);
}

/// Prompt text as styled lines: literals verbatim, fields as inline inputs
/// showing the typed value or the identifier as a hint.
fn body_lines<'a>(
    segments: &'a [Segment],
    values: &'a [String],
    focus: Option<usize>,
    palette: &Palette,
) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::new();
    let mut current: Vec<Span<'a>> = Vec::new();
    let mut field = 0;
    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    push_literal(&mut current, first);
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    push_literal(&mut current, part);
                }
            }
            Segment::Field { name } => {
                let bg = if focus == Some(field) {
                    palette.focus_bg
                } else {
                    palette.field_bg
                };
                let span = match values.get(field).filter(|v| !v.is_empty()) {
                    Some(value) => {
                        Span::styled(value.as_str(), Style::default().fg(palette.fg).bg(bg))
                    }
                    None => Span::styled(
                        format!("{:<width$}", name, width = segment.width()),
                        Style::default()
                            .fg(palette.dim)
                            .bg(bg)
                            .add_modifier(Modifier::ITALIC),
                    ),
                };
                current.push(span);
                field += 1;
            }
        }
    }
    lines.push(Line::from(current));
    lines
}

fn push_literal<'a>(spans: &mut Vec<Span<'a>>, text: &'a str) {
    let text = text.strip_suffix('\r').unwrap_or(text);
    if !text.is_empty() {
        spans.push(Span::raw(text));
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else if max_chars <= 3 {
        text.chars().take(max_chars).collect()
    } else {
        let truncated: String = text.chars().take(max_chars - 3).collect();
        format!("{truncated}...")
    }
}

/// Deterministic color for a tag name (hashed to a palette of distinct colors).
fn tag_color(tag: &str) -> Color {
    const PALETTE: &[Color] = &[
        Color::LightBlue,
        Color::LightGreen,
        Color::LightMagenta,
        Color::LightCyan,
        Color::LightRed,
        Color::Cyan,
    ];
    let hash: usize = tag
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    PALETTE[hash % PALETTE.len()]
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_help_overlay(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let title_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(palette.linked)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(palette.fg);
    let section_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines: Vec<Line> = Vec::new();

    let mut add_section = |name: &str, bindings: &[(String, &str)], extras: &[(&str, &str)]| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {name}"), section_style)));
        for (key, desc) in bindings {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(format!("{key:>12}"), key_style),
                Span::raw("  "),
                Span::styled(desc.to_string(), desc_style),
            ]));
        }
        for (key, desc) in extras {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(format!("{key:>12}"), key_style),
                Span::raw("  "),
                Span::styled(desc.to_string(), desc_style),
            ]));
        }
    };

    add_section("BROWSE", &app.keymap.browse_help(), &[("Ctrl+C", "quit")]);
    add_section(
        "SEARCH",
        &app.keymap.search_help(),
        &[("Ctrl+U", "clear input"), ("*", "type to filter")],
    );
    add_section("EDIT", &app.keymap.edit_help(), &[("*", "type into field")]);
    lines.push(Line::from(""));

    let total_lines = lines.len() as u16;
    let inner_height = area.height.saturating_sub(2);
    let max_scroll = total_lines.saturating_sub(inner_height);
    let scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(Span::styled(" Keybindings ", title_style))
                .title_bottom(Line::from(vec![
                    Span::styled(" ?", key_style),
                    Span::styled("/", desc_style),
                    Span::styled("Esc", key_style),
                    Span::styled(" to close", desc_style),
                    Span::raw("  "),
                    Span::styled("j", key_style),
                    Span::styled("/", desc_style),
                    Span::styled("k", key_style),
                    Span::styled(" to scroll ", desc_style),
                ])),
        )
        .style(Style::default().bg(palette.bg));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn render_help_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let bindings = match app.mode {
        AppMode::Browse => {
            let mut help = app.keymap.browse_help();
            help.retain(|(_, desc)| !matches!(*desc, "top" | "bottom" | "prev" | "prev tag"));
            help
        }
        AppMode::Search => app.keymap.search_help(),
        AppMode::Edit => app.keymap.edit_help(),
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            key.as_str(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(":{desc}"), Style::default().fg(palette.dim)));
    }

    // Transient status message at the right end of the help bar
    if let Some((ref msg, _)) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(palette.border)));
        spans.push(Span::styled(
            msg.as_str(),
            Style::default().fg(palette.linked).add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
