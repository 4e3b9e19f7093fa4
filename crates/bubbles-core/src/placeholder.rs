//! `{name}` placeholders inside prompt text.
//!
//! A placeholder is an opening brace, one or more characters other than `}`,
//! and a closing brace. Anything else (unclosed `{`, empty `{}`) stays literal.
//! Each placeholder becomes an editable field whose identifier doubles as the
//! hint and as the value used when the field is left empty.

use serde::Serialize;

/// A piece of parsed prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Segment {
    Literal(String),
    Field { name: String },
}

impl Segment {
    /// Display width of the segment in characters. Fields are sized to their
    /// identifier.
    pub fn width(&self) -> usize {
        match self {
            Segment::Literal(text) => text.chars().count(),
            Segment::Field { name } => name.chars().count(),
        }
    }
}

/// Split `text` into literal runs and placeholder fields, in source order.
pub fn parse(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut search_from = 0;

    while let Some(rel) = text[search_from..].find('{') {
        let open = search_from + rel;
        let Some(close_rel) = text[open + 1..].find('}') else {
            break;
        };
        let close = open + 1 + close_rel;
        if close == open + 1 {
            // `{}` has no identifier; keep scanning after the brace
            search_from = open + 1;
            continue;
        }
        if literal_start < open {
            segments.push(Segment::Literal(text[literal_start..open].to_string()));
        }
        segments.push(Segment::Field {
            name: text[open + 1..close].to_string(),
        });
        literal_start = close + 1;
        search_from = close + 1;
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(text[literal_start..].to_string()));
    }
    segments
}

/// Concatenate segments, taking the i-th non-empty value for the i-th field
/// and falling back to the field's identifier.
pub fn resolve(segments: &[Segment], values: &[String]) -> String {
    let mut out = String::new();
    let mut field_index = 0;
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Field { name } => {
                match values.get(field_index).filter(|v| !v.is_empty()) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(name),
                }
                field_index += 1;
            }
        }
    }
    out
}

/// Strip carriage returns so clipboard contents use `\n` line endings.
pub fn sanitize(text: &str) -> String {
    text.replace('\r', "")
}

/// Final text handed to the clipboard for a resolved prompt.
pub fn clipboard_text(resolved: &str) -> String {
    sanitize(resolved.trim())
}

/// Editable state for one prompt's placeholders.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderForm {
    segments: Vec<Segment>,
    values: Vec<String>,
    focus: usize,
}

impl PlaceholderForm {
    pub fn new(text: &str) -> Self {
        let segments = parse(text);
        let field_count = segments
            .iter()
            .filter(|s| matches!(s, Segment::Field { .. }))
            .count();
        Self {
            segments,
            values: vec![String::new(); field_count],
            focus: 0,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn field_count(&self) -> usize {
        self.values.len()
    }

    /// Identifiers of every field, in order (duplicates included).
    pub fn field_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field { name } => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Index of the focused field, or `None` when the prompt has no fields.
    pub fn focused(&self) -> Option<usize> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.focus)
        }
    }

    pub fn focus_next(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + 1) % self.values.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + self.values.len() - 1) % self.values.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.pop();
        }
    }

    pub fn clear_focused(&mut self) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.clear();
        }
    }

    /// Set every field named `name`. Returns how many fields were filled.
    pub fn fill(&mut self, name: &str, value: &str) -> usize {
        let indices: Vec<usize> = self
            .field_names()
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == name)
            .map(|(i, _)| i)
            .collect();
        for &i in &indices {
            self.values[i] = value.to_string();
        }
        indices.len()
    }

    pub fn resolve(&self) -> String {
        resolve(&self.segments, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn field(s: &str) -> Segment {
        Segment::Field {
            name: s.to_string(),
        }
    }

    #[test]
    fn parse_plain_text() {
        assert_eq!(parse("no placeholders here"), vec![lit("no placeholders here")]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn parse_interleaves_literals_and_fields() {
        assert_eq!(
            parse("Hello {name}, welcome to {place}."),
            vec![lit("Hello "), field("name"), lit(", welcome to "), field("place"), lit(".")]
        );
    }

    #[test]
    fn parse_adjacent_fields_and_edges() {
        assert_eq!(parse("{a}{b}"), vec![field("a"), field("b")]);
        assert_eq!(parse("{only}"), vec![field("only")]);
    }

    #[test]
    fn parse_keeps_newlines_verbatim() {
        assert_eq!(
            parse("line one\n{x}\nline three\n"),
            vec![lit("line one\n"), field("x"), lit("\nline three\n")]
        );
    }

    #[test]
    fn unclosed_brace_is_literal() {
        assert_eq!(parse("open {brace"), vec![lit("open {brace")]);
        assert_eq!(parse("{a} then {b"), vec![field("a"), lit(" then {b")]);
    }

    #[test]
    fn empty_braces_are_literal() {
        assert_eq!(parse("x {} y"), vec![lit("x {} y")]);
        assert_eq!(parse("{}{a}"), vec![lit("{}"), field("a")]);
    }

    #[test]
    fn inner_open_brace_belongs_to_identifier() {
        assert_eq!(parse("{a{b} c"), vec![field("a{b"), lit(" c")]);
    }

    #[test]
    fn stray_closing_brace_is_literal() {
        assert_eq!(parse("a } {b}"), vec![lit("a } "), field("b")]);
    }

    #[test]
    fn identifiers_keep_spaces_and_unicode() {
        assert_eq!(parse("{file name}"), vec![field("file name")]);
        assert_eq!(parse("café {ville}"), vec![lit("café "), field("ville")]);
    }

    #[test]
    fn field_width_counts_characters() {
        assert_eq!(field("name").width(), 4);
        assert_eq!(field("città").width(), 5);
    }

    #[test]
    fn resolve_without_input_uses_bare_identifiers() {
        let text = "Hello {name}, welcome to {place}.";
        assert_eq!(resolve(&parse(text), &[]), "Hello name, welcome to place.");
        assert_eq!(PlaceholderForm::new(text).resolve(), "Hello name, welcome to place.");
    }

    #[test]
    fn resolve_with_values() {
        let mut form = PlaceholderForm::new("Hello {name}, welcome to {place}.");
        for c in "Ann".chars() {
            form.insert_char(c);
        }
        form.focus_next();
        for c in "Paris".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.resolve(), "Hello Ann, welcome to Paris.");
    }

    #[test]
    fn resolve_empty_value_falls_back_to_identifier() {
        let segments = parse("{a} and {b}");
        let values = vec![String::new(), "B".to_string()];
        assert_eq!(resolve(&segments, &values), "a and B");
    }

    #[test]
    fn form_focus_wraps() {
        let mut form = PlaceholderForm::new("{a} {b} {c}");
        assert_eq!(form.focused(), Some(0));
        form.focus_prev();
        assert_eq!(form.focused(), Some(2));
        form.focus_next();
        assert_eq!(form.focused(), Some(0));
    }

    #[test]
    fn form_without_fields_ignores_edits() {
        let mut form = PlaceholderForm::new("static");
        assert_eq!(form.focused(), None);
        form.focus_next();
        form.insert_char('x');
        form.backspace();
        assert_eq!(form.resolve(), "static");
    }

    #[test]
    fn form_backspace_and_clear() {
        let mut form = PlaceholderForm::new("Hi {name}");
        form.insert_char('B');
        form.insert_char('o');
        form.insert_char('b');
        form.backspace();
        assert_eq!(form.resolve(), "Hi Bo");
        form.clear_focused();
        assert_eq!(form.resolve(), "Hi name");
    }

    #[test]
    fn fill_sets_every_field_with_that_name() {
        let mut form = PlaceholderForm::new("{x} + {y} = {x}");
        assert_eq!(form.fill("x", "1"), 2);
        assert_eq!(form.fill("z", "9"), 0);
        assert_eq!(form.resolve(), "1 + y = 1");
        assert_eq!(form.field_names(), vec!["x", "y", "x"]);
    }

    #[test]
    fn sanitize_strips_carriage_returns() {
        assert_eq!(sanitize("a\r\nb\rc"), "a\nbc");
        assert!(!clipboard_text("\r\n line\r\n two \r\n").contains('\r'));
        assert_eq!(clipboard_text("  body\r\n"), "body");
    }
}
