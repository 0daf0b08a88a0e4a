use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::{components::centered_line, theme::Theme};

/// Yes/no modal for a pending delete.
pub fn render(frame: &mut Frame<'_>, area: Rect, question: &str, theme: &Theme) {
    let popup = centered_line(60, 5, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            question.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::raw(" delete    "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" keep"),
        ]),
    ];
    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}
