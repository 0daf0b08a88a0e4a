use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::ui::{components::centered_rect, theme::Theme};

const ROUTES: [(&str, &str); 7] = [
    ("/", "inventory"),
    ("/rooms", "all rooms"),
    ("/rooms/<id>", "room detail"),
    ("/rooms/<id>/inventory", "room inventory"),
    ("/locations/<id>", "location detail"),
    ("/items/<id>", "item detail"),
    ("/items/new", "new item"),
];

/// Route prompt opened with Ctrl+P.
pub fn render(frame: &mut Frame<'_>, area: Rect, input: Option<&str>) {
    let Some(input) = input else {
        return;
    };

    let theme = Theme::default();
    let popup = centered_rect(70, 50, area);
    frame.render_widget(Clear, popup);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(popup);

    render_input(frame, layout[0], input, &theme);
    render_routes(frame, layout[1], &theme);
}

fn render_input(frame: &mut Frame<'_>, area: Rect, input: &str, theme: &Theme) {
    let (text, style) = if input.is_empty() {
        ("/rooms/1", Style::default().fg(theme.dim))
    } else {
        (input, Style::default().fg(theme.text))
    };

    let line = Line::from(vec![
        Span::styled("Go to", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled(text.to_string(), style),
        Span::styled(" |", Style::default().fg(theme.accent)),
    ]);

    let block = Block::default()
        .title("Ctrl+P")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_routes(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let items = ROUTES
        .iter()
        .map(|(path, label)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{path:<24}"), Style::default().fg(theme.text)),
                Span::styled(*label, Style::default().fg(theme.dim)),
            ]))
        })
        .collect::<Vec<_>>();

    let list = List::new(items).block(
        Block::default()
            .title("Routes")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );
    frame.render_widget(list, area);
}
