use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::route::Route, ui::theme::Theme};

/// Top-level navigation entries, in shortcut order (`1`, `2`, `3`).
const SECTIONS: [(Route, &str); 3] = [
    (Route::Inventory, "Inventory"),
    (Route::Rooms, "Rooms"),
    (Route::ItemCreate, "New item"),
];

/// Navigation entry that owns `route`, if any.
pub fn section_of(route: Route) -> Option<Route> {
    match route {
        Route::Inventory | Route::ItemDetail(_) => Some(Route::Inventory),
        Route::Rooms | Route::RoomDetail(_) | Route::RoomInventory(_) | Route::LocationDetail(_) => {
            Some(Route::Rooms)
        }
        Route::ItemCreate => Some(Route::ItemCreate),
    }
}

pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: Route, theme: &Theme) {
    let active = section_of(active);
    let mut spans = vec![Span::raw(" ")];

    for (i, (route, label)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{} ", i + 1),
            Style::default().fg(theme.dim),
        ));
        if active == Some(*route) {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                *label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(*label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
