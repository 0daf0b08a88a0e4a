use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::pages::Choices,
    ui::{components::card::Card, theme::Theme},
    view::form::{FieldKind, Form, LOCATION_KEY, ROOM_KEY},
};

const LABEL_WIDTH: usize = 16;

/// Labelled field list with the focused field marked. Choice fields show
/// the picked record's name.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    form: &Form,
    choices: Option<Choices<'_>>,
    busy: bool,
    theme: &Theme,
) {
    let lines = form
        .fields()
        .enumerate()
        .map(|(index, (spec, raw))| {
            let focused = index == form.focus();
            let marker = if focused { "» " } else { "  " };
            let value = if spec.kind == FieldKind::Choice {
                choice_label(form, spec.key, choices)
            } else if focused {
                format!("{raw}_")
            } else {
                raw.to_string()
            };
            let value_style = if focused {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(
                    format!("{:<width$}", spec.label, width = LABEL_WIDTH),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(value, value_style),
            ])
        })
        .collect::<Vec<_>>();

    Card::new(title, theme)
        .focused(true)
        .busy(busy)
        .render_with(frame, area, Paragraph::new(lines));
}

fn choice_label(form: &Form, key: &str, choices: Option<Choices<'_>>) -> String {
    let Some(choices) = choices else {
        return "loading...".to_string();
    };
    let id = form.choice(key);
    let name = match key {
        ROOM_KEY => choices.room_name(id),
        LOCATION_KEY => choices.location_name(id),
        _ => None,
    };
    match (id, name) {
        (None, _) => "< none >".to_string(),
        (Some(_), Some(name)) => format!("< {name} >"),
        (Some(id), None) => format!("< #{id} >"),
    }
}
