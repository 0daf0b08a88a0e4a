use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

use crate::{
    app::pages::ItemCreatePage,
    ui::{
        components::{
            form,
            hints::{KeyHint, common},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &ItemCreatePage, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    form::render(
        frame,
        layout[0],
        "New item",
        page.view.form(),
        page.choices(),
        page.view.is_submitting(),
        theme,
    );

    let status = if let Some(id) = page.view.pending_redirect() {
        Line::styled(
            format!("Created item #{id}. Opening it..."),
            Style::default().fg(theme.positive),
        )
    } else if page.view.is_submitting() {
        Line::styled("Saving...", Style::default().fg(theme.dim))
    } else {
        Line::styled(
            "Empty fields are left to the server defaults.",
            Style::default().fg(theme.dim),
        )
    };
    frame.render_widget(Paragraph::new(status), layout[1]);
}

pub fn hints() -> Vec<KeyHint> {
    common::FORM.to_vec()
}
