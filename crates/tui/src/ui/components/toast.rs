use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::ActiveToast,
    ui::theme::Theme,
    view::toast::ToastLevel,
};

/// Bottom-right notification box.
pub fn render(frame: &mut Frame<'_>, area: Rect, active: Option<&ActiveToast>) {
    let Some(ActiveToast { toast, .. }) = active else {
        return;
    };
    let theme = Theme::default();
    let width = u16::try_from(toast.message.chars().count() + 4)
        .unwrap_or(u16::MAX)
        .min(area.width);
    let height = 3u16;
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 1));
    let rect = Rect { x, y, width, height };

    let style = match toast.level {
        ToastLevel::Info => Style::default().fg(theme.text),
        ToastLevel::Success => Style::default().fg(theme.positive),
        ToastLevel::Error => Style::default().fg(theme.error),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title("Ctrl+X");
    let content = Paragraph::new(Line::from(toast.message.as_str())).style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(content.block(block), rect);
}
