use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::ui::theme::Theme;

/// Rounded, titled panel. A busy card carries a right-aligned marker while
/// a save or delete for its record is in flight.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
    busy: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
            busy: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        let mut block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface_bright));
        if self.busy {
            block = block.title_top(
                Line::styled(" working... ", Style::default().fg(self.theme.dim)).right_aligned(),
            );
        }
        block
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}
