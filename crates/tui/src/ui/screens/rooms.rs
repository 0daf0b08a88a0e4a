use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::pages::RoomsPage,
    ui::{
        components::{
            card::Card,
            hints::{KeyHint, common},
            table,
        },
        screens::{field_line, non_empty, status},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &RoomsPage, theme: &Theme) {
    if status::ready(frame, area, "rooms", &page.rooms, theme).is_none() {
        return;
    }
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let visible = page.visible();
    table::render(frame, layout[0], "Rooms", &page.table, &visible, true, theme);

    let card = Card::new("Selected room", theme);
    let Some(room) = page.selected() else {
        card.render_with(
            frame,
            layout[1],
            Paragraph::new("No rooms yet.").style(Style::default().fg(theme.dim)),
        );
        return;
    };

    let mut lines = vec![
        field_line("Name", Some(&room.name), theme),
        field_line("Floor", non_empty(room.floor_level.as_ref()), theme),
        field_line("Items", Some(room.items().count()), theme),
        Line::from(""),
        Line::from(Span::styled("Locations", Style::default().fg(theme.accent))),
    ];
    lines.extend(room.locations.iter().map(|location| {
        Line::from(format!("  {} ({} items)", location.name, location.items.len()))
    }));
    card.render_with(frame, layout[1], Paragraph::new(lines));
}

pub fn hints(page: &RoomsPage) -> Vec<KeyHint> {
    if page.table.is_typing() {
        return common::TYPING.to_vec();
    }
    let mut hints = vec![KeyHint::new("Enter", "open"), KeyHint::new("i", "inventory")];
    hints.extend(common::TABLE);
    hints.push(KeyHint::new("r", "reload"));
    hints
}
