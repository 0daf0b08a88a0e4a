use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, Copy)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Common hint groups for reuse across screens.
pub mod common {
    use super::KeyHint;

    pub const TABLE: [KeyHint; 6] = [
        KeyHint::new("↑↓", "select"),
        KeyHint::new("←→", "column"),
        KeyHint::new("s", "sort"),
        KeyHint::new("/", "filter"),
        KeyHint::new("c", "edit cell"),
        KeyHint::new("x", "delete"),
    ];

    pub const FORM: [KeyHint; 4] = [
        KeyHint::new("Tab", "next"),
        KeyHint::new("←→", "choose"),
        KeyHint::new("Enter", "save"),
        KeyHint::new("Esc", "cancel"),
    ];

    pub const TYPING: [KeyHint; 2] = [KeyHint::new("Enter", "apply"), KeyHint::new("Esc", "cancel")];

    pub const CONFIRM: [KeyHint; 2] = [KeyHint::new("y", "yes"), KeyHint::new("n", "no")];

    pub const DETAIL: [KeyHint; 3] = [
        KeyHint::new("e", "edit"),
        KeyHint::new("d", "delete"),
        KeyHint::new("b", "back"),
    ];

    pub const GLOBAL: [KeyHint; 3] = [
        KeyHint::new("1/2/3", "nav"),
        KeyHint::new("Ctrl+P", "go to"),
        KeyHint::new("q", "quit"),
    ];
}
