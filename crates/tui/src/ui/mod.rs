pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::AppState;

use components::hints::{self, common, hint_separator, hints_to_spans};

pub use terminal::{AppTerminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    // Info bar, tab bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.route, &theme);
    screens::render(frame, layout[2], &state.page);
    render_bottom_bar(frame, layout[3], state, &theme);

    components::prompt::render(frame, area, state.prompt.as_deref());
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Page", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.route.title())),
        Span::styled("Route", Style::default().fg(theme.text_muted)),
        Span::styled(format!(": {}", state.route), Style::default().fg(theme.accent)),
    ];
    if state.pending > 0 {
        spans.push(Span::styled(
            format!("  ⟳ {}", state.pending),
            Style::default().fg(theme.dim),
        ));
    }
    let line = Line::from(spans);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = if state.prompt.is_some() {
        hints_to_spans(&common::TYPING, theme)
    } else {
        hints_to_spans(&screens::hints(&state.page), theme)
    };

    if !state.page.captures_input() && state.prompt.is_none() {
        parts.push(hint_separator(theme));
        parts.extend(hints_to_spans(&common::GLOBAL, theme));
    }
    if state.toast.is_some() {
        parts.push(hint_separator(theme));
        parts.extend(hints_to_spans(
            &[hints::KeyHint::new("Ctrl+X", "dismiss")],
            theme,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
