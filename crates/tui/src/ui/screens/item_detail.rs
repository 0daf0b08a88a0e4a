use ratatui::{
    Frame,
    layout::Rect,
    widgets::Paragraph,
};

use crate::{
    app::pages::ItemDetailPage,
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

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &ItemDetailPage, theme: &Theme) {
    let Some(item) = status::ready(frame, area, "item", page.view.phase(), theme) else {
        return;
    };

    if let Some(edit) = page.view.form() {
        form::render(
            frame,
            area,
            "Edit item",
            edit,
            page.choices(),
            page.view.is_busy(),
            theme,
        );
    } else {
        let lines = vec![
            field_line("Name", Some(&item.name), theme),
            field_line("Description", non_empty(item.description.as_ref()), theme),
            field_line("Serial number", non_empty(item.serial_number.as_ref()), theme),
            field_line("Purchase date", item.purchase_date, theme),
            field_line("Purchase price", item.purchase_price, theme),
            field_line("Current value", item.current_value, theme),
            field_line("Quantity", Some(item.quantity), theme),
            field_line("Notes", non_empty(item.notes.as_ref()), theme),
            field_line("Room", item.room_name.as_ref(), theme),
            field_line("Location", item.location_name.as_ref(), theme),
            field_line("Category", item.category.map(|id| format!("#{id}")), theme),
        ];
        Card::new(&format!("Item #{}", item.id), theme)
            .busy(page.view.is_busy())
            .render_with(frame, area, Paragraph::new(lines));
    }

    if page.view.confirm_pending() {
        confirm::render(frame, area, &format!("Delete item \"{}\"?", item.name), theme);
    }
}

pub fn hints(page: &ItemDetailPage) -> Vec<KeyHint> {
    if page.view.confirm_pending() {
        return common::CONFIRM.to_vec();
    }
    if page.view.is_editing() {
        return common::FORM.to_vec();
    }
    let mut hints = vec![KeyHint::new("l", "location")];
    hints.extend(common::DETAIL);
    hints
}
