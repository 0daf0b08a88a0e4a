use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

use crate::{
    ui::{components::card::Card, theme::Theme},
    view::{capitalized, detail::Phase},
};

/// Draws the loading, not-found and failure states of `phase`. Returns the
/// record when it is ready so the caller can draw it instead.
pub fn ready<'a, R>(
    frame: &mut Frame<'_>,
    area: Rect,
    noun: &str,
    phase: &'a Phase<R>,
    theme: &Theme,
) -> Option<&'a R> {
    let (text, style) = match phase {
        Phase::Ready(record) => return Some(record),
        Phase::Loading => ("Loading...".to_string(), Style::default().fg(theme.dim)),
        Phase::NotFound => (
            format!("{} not found.", capitalized(noun)),
            Style::default().fg(theme.text_muted),
        ),
        Phase::Failed(message) => (message.clone(), Style::default().fg(theme.error)),
    };
    let title = capitalized(noun);
    Card::new(&title, theme).render_with(
        frame,
        area,
        Paragraph::new(Line::from(text))
            .style(style)
            .alignment(Alignment::Center),
    );
    None
}
