use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::pages::RoomDetailPage,
    ui::{
        components::{
            card::Card,
            confirm, form,
            hints::{KeyHint, common},
        },
        screens::{field_line, non_empty, status},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &RoomDetailPage, theme: &Theme) {
    let Some(room) = status::ready(frame, area, "room", page.view.phase(), theme) else {
        return;
    };
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    if let Some(edit) = page.view.form() {
        form::render(frame, layout[0], "Edit room", edit, None, page.view.is_busy(), theme);
    } else {
        let lines = vec![
            field_line("Name", Some(&room.name), theme),
            field_line("Description", non_empty(room.description.as_ref()), theme),
            field_line("Floor level", non_empty(room.floor_level.as_ref()), theme),
            field_line("Items", Some(room.items().count()), theme),
        ];
        Card::new(&format!("Room #{}", room.id), theme)
            .busy(page.view.is_busy())
            .render_with(frame, layout[0], Paragraph::new(lines));
    }

    let card = Card::new("Locations", theme).focused(!page.view.is_editing());
    if room.locations.is_empty() {
        card.render_with(
            frame,
            layout[1],
            Paragraph::new("No locations.").style(Style::default().fg(theme.dim)),
        );
    } else {
        let items = room
            .locations
            .iter()
            .map(|location| {
                ListItem::new(Line::from(format!(
                    "{}  ({} items)",
                    location.name,
                    location.items.len()
                )))
            })
            .collect::<Vec<_>>();
        let mut list_state = ListState::default();
        list_state.select(Some(page.location_cursor.min(items.len() - 1)));
        let list = List::new(items)
            .block(card.block())
            .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .highlight_symbol("» ");
        frame.render_stateful_widget(list, layout[1], &mut list_state);
    }

    if page.view.confirm_pending() {
        confirm::render(frame, area, &format!("Delete room \"{}\"?", room.name), theme);
    }
}

pub fn hints(page: &RoomDetailPage) -> Vec<KeyHint> {
    if page.view.confirm_pending() {
        return common::CONFIRM.to_vec();
    }
    if page.view.is_editing() {
        return common::FORM.to_vec();
    }
    let mut hints = vec![
        KeyHint::new("↑↓", "location"),
        KeyHint::new("Enter", "open"),
        KeyHint::new("i", "inventory"),
    ];
    hints.extend(common::DETAIL);
    hints
}
