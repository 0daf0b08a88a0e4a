use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{
    app::pages::LocationDetailPage,
    ui::{
        components::{
            card::Card,
            confirm, form,
            hints::{KeyHint, common},
            table,
        },
        screens::{field_line, non_empty, status},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &LocationDetailPage, theme: &Theme) {
    let Some(location) = status::ready(frame, area, "location", page.view.phase(), theme) else {
        return;
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    if let Some(edit) = page.view.form() {
        form::render(
            frame,
            layout[0],
            "Edit location",
            edit,
            None,
            page.view.is_busy(),
            theme,
        );
    } else {
        let lines = vec![
            field_line("Name", Some(&location.name), theme),
            field_line("Description", non_empty(location.description.as_ref()), theme),
            field_line("Room", Some(format!("#{}", location.room_id)), theme),
            field_line("Items", Some(page.items.len()), theme),
        ];
        Card::new(&format!("Location #{}", location.id), theme)
            .busy(page.view.is_busy())
            .render_with(frame, layout[0], Paragraph::new(lines));
    }

    if page.show_items {
        let visible = page.table.visible(page.items.children());
        table::render(
            frame,
            layout[1],
            "Items",
            &page.table,
            &visible,
            !page.view.is_editing(),
            theme,
        );
    } else {
        let text = if page.items.is_empty() {
            "No items here. Press a to add one.".to_string()
        } else {
            format!("{} item(s) hidden. Press t to show.", page.items.len())
        };
        Card::new("Items", theme).render_with(
            frame,
            layout[1],
            Paragraph::new(text).style(Style::default().fg(theme.dim)),
        );
    }

    if page.view.confirm_pending() {
        confirm::render(
            frame,
            area,
            &format!("Delete location \"{}\"?", location.name),
            theme,
        );
    }
}

pub fn hints(page: &LocationDetailPage) -> Vec<KeyHint> {
    if page.view.confirm_pending() {
        return common::CONFIRM.to_vec();
    }
    if page.view.is_editing() {
        return common::FORM.to_vec();
    }
    if page.show_items && page.table.is_typing() {
        return common::TYPING.to_vec();
    }
    let mut hints = vec![
        KeyHint::new("t", "items"),
        KeyHint::new("a", "add item"),
        KeyHint::new("r", "room"),
    ];
    if page.show_items {
        hints.extend(common::TABLE);
    }
    hints.extend(common::DETAIL);
    hints
}
