use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row as TableRow, Table, TableState},
};

use crate::{
    ui::{components::card::Card, theme::Theme},
    view::list::{ListView, Row},
};

/// Table over `visible` with the sort marker, active column, filter line
/// and an open cell edit drawn in place.
pub fn render<R: Row>(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    view: &ListView<R>,
    visible: &[&R],
    focused: bool,
    theme: &Theme,
) {
    let card = Card::new(title, theme).focused(focused);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let columns = R::columns();
    let header = TableRow::new(columns.iter().enumerate().map(|(index, column)| {
        let marker = match view.sort() {
            Some(sort) if sort.column == index && sort.descending => " ▼",
            Some(sort) if sort.column == index => " ▲",
            _ => "",
        };
        let mut style = Style::default().fg(theme.text_muted);
        if focused && index == view.column() {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        Cell::from(Span::styled(format!("{}{marker}", column.title), style))
    }));

    let edit = view.edit();
    let rows = visible.iter().map(|row| {
        TableRow::new((0..columns.len()).map(|index| match edit {
            Some(edit) if edit.id == row.id() && edit.column == index => Cell::from(Span::styled(
                format!("{}_", edit.buffer),
                Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
            )),
            _ => Cell::from(row.cell(index)),
        }))
    });

    let widths = columns
        .iter()
        .map(|column| Constraint::Length(column.width))
        .collect::<Vec<_>>();
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");

    let mut state = TableState::default().with_selected(view.selected_index(visible.len()));
    frame.render_stateful_widget(table, layout[0], &mut state);

    frame.render_widget(Paragraph::new(status_line(view, visible.len(), theme)), layout[1]);
}

fn status_line<R: Row>(view: &ListView<R>, count: usize, theme: &Theme) -> Line<'static> {
    if let Some(error) = view.edit().and_then(|edit| edit.error.clone()) {
        return Line::from(Span::styled(error, Style::default().fg(theme.error)));
    }
    let mut spans = vec![Span::styled(
        format!("{count} row(s)"),
        Style::default().fg(theme.dim),
    )];
    if let Some(filter) = view.filter() {
        let column = R::columns()
            .get(filter.column)
            .map_or("?", |column| column.title);
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{column} contains \"{}\"", filter.query),
            Style::default().fg(theme.accent),
        ));
    }
    Line::from(spans)
}
