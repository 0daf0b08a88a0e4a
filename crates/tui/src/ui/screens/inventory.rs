use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::pages::inventory::{InventoryPage, Panel},
    ui::{
        components::{
            card::Card,
            centered_line,
            hints::{KeyHint, common},
            table,
        },
        screens::status,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, page: &InventoryPage, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(area);

    render_categories(frame, layout[0], page, theme);
    if status::ready(frame, layout[1], "items", &page.items, theme).is_some() {
        let title = match page.category_name() {
            Some(name) => format!("Items in {name}"),
            None => "All items".to_string(),
        };
        let visible = page.visible();
        table::render(
            frame,
            layout[1],
            &title,
            &page.table,
            &visible,
            page.panel == Panel::Items,
            theme,
        );
    }

    if let Some(path) = &page.voice {
        render_voice_prompt(frame, area, path, theme);
    }
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, page: &InventoryPage, theme: &Theme) {
    let card = Card::new("Categories", theme).focused(page.panel == Panel::Categories);
    let items = page
        .tree
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let style = if page.category == Some(row.id) {
                Style::default().fg(theme.positive).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(Span::styled(format!("{indent}{}", row.name), style)))
        })
        .collect::<Vec<_>>();

    if items.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new("No categories.").style(Style::default().fg(theme.dim)),
        );
        return;
    }

    let mut list_state = ListState::default();
    if page.panel == Panel::Categories {
        list_state.select(Some(page.tree_cursor.min(items.len() - 1)));
    }
    let list = List::new(items)
        .block(card.block())
        .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_voice_prompt(frame: &mut Frame<'_>, area: Rect, path: &str, theme: &Theme) {
    let popup = centered_line(70, 3, area);
    frame.render_widget(Clear, popup);
    let line = Line::from(vec![
        Span::styled("Recording", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled(path.to_string(), Style::default().fg(theme.text)),
        Span::styled(" |", Style::default().fg(theme.accent)),
    ]);
    let block = Block::default()
        .title("Voice add (audio file path)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(line).block(block), popup);
}

pub fn hints(page: &InventoryPage) -> Vec<KeyHint> {
    if page.voice.is_some() {
        return vec![KeyHint::new("Enter", "upload"), KeyHint::new("Esc", "cancel")];
    }
    if page.table.is_typing() {
        return common::TYPING.to_vec();
    }
    let mut hints = match page.panel {
        Panel::Items => {
            let mut hints = vec![KeyHint::new("Enter", "open")];
            hints.extend(common::TABLE);
            hints
        }
        Panel::Categories => vec![
            KeyHint::new("Enter", "filter"),
            KeyHint::new("c", "clear"),
        ],
    };
    hints.push(KeyHint::new("Tab", "panel"));
    hints.push(KeyHint::new("n", "new"));
    if !page.voice_busy {
        hints.push(KeyHint::new("v", "voice"));
    }
    hints.push(KeyHint::new("r", "reload"));
    hints
}
