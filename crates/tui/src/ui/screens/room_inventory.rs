use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use crate::{
    app::pages::room_inventory::{Pane, RoomInventoryPage},
    ui::{
        components::{
            card::Card,
            hints::{KeyHint, common},
            table,
        },
        screens::status,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &RoomInventoryPage, theme: &Theme) {
    let Some(room) = status::ready(frame, area, "room inventory", &page.room, theme) else {
        return;
    };
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let title = format!("{} locations", room.name);
    let card = Card::new(&title, theme).focused(page.pane == Pane::Locations);
    let items = page
        .locations()
        .iter()
        .map(|location| {
            let style = if page.narrowed == Some(location.id) {
                Style::default().fg(theme.positive).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{} ({})", location.name, location.items.len()),
                style,
            )))
        })
        .collect::<Vec<_>>();
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(page.location_cursor.min(items.len() - 1)));
    }
    let list = List::new(items)
        .block(card.block())
        .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, layout[0], &mut list_state);

    let narrowed = page.narrowed.and_then(|id| {
        page.locations()
            .iter()
            .find(|location| location.id == id)
            .map(|location| location.name.as_str())
    });
    let title = match narrowed {
        Some(name) => format!("Items in {name}"),
        None => format!("Items in {}", room.name),
    };
    let visible = page.visible();
    table::render(
        frame,
        layout[1],
        &title,
        &page.table,
        &visible,
        page.pane == Pane::Items,
        theme,
    );
}

pub fn hints(page: &RoomInventoryPage) -> Vec<KeyHint> {
    if page.table.is_typing() {
        return common::TYPING.to_vec();
    }
    let mut hints = match page.pane {
        Pane::Locations => vec![
            KeyHint::new("Enter", "narrow"),
            KeyHint::new("o", "open location"),
        ],
        Pane::Items => {
            let mut hints = vec![KeyHint::new("Enter", "open")];
            hints.extend(common::TABLE);
            hints
        }
    };
    hints.push(KeyHint::new("Tab", "pane"));
    hints.push(KeyHint::new("r", "room"));
    hints.push(KeyHint::new("b", "back"));
    hints
}
