pub mod inventory;
pub mod item_create;
pub mod item_detail;
pub mod location_detail;
pub mod room_detail;
pub mod room_inventory;
pub mod rooms;
pub mod status;

use std::fmt::Display;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use crate::{
    app::pages::Page,
    ui::{components::hints::KeyHint, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &Page) {
    let theme = Theme::default();
    match page {
        Page::Inventory(page) => inventory::render(frame, area, page, &theme),
        Page::Rooms(page) => rooms::render(frame, area, page, &theme),
        Page::RoomDetail(page) => room_detail::render(frame, area, page, &theme),
        Page::RoomInventory(page) => room_inventory::render(frame, area, page, &theme),
        Page::LocationDetail(page) => location_detail::render(frame, area, page, &theme),
        Page::ItemDetail(page) => item_detail::render(frame, area, page, &theme),
        Page::ItemCreate(page) => item_create::render(frame, area, page, &theme),
    }
}

/// Key hints for the page's current mode.
pub fn hints(page: &Page) -> Vec<KeyHint> {
    match page {
        Page::Inventory(page) => inventory::hints(page),
        Page::Rooms(page) => rooms::hints(page),
        Page::RoomDetail(page) => room_detail::hints(page),
        Page::RoomInventory(page) => room_inventory::hints(page),
        Page::LocationDetail(page) => location_detail::hints(page),
        Page::ItemDetail(page) => item_detail::hints(page),
        Page::ItemCreate(_) => item_create::hints(),
    }
}

/// `label: value` line for record views; absent values show as `-`.
fn field_line<T: Display>(label: &str, value: Option<T>, theme: &Theme) -> Line<'static> {
    let value = value.map_or_else(|| "-".to_string(), |value| value.to_string());
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Style::default().fg(theme.text_muted)),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

/// Treats blank optional strings as absent.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.trim().is_empty())
}

