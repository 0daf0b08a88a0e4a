pub mod card;
pub mod confirm;
pub mod form;
pub mod hints;
pub mod prompt;
pub mod table;
pub mod tabs;
pub mod toast;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Rectangle of fixed `height` rows, `percent_x` wide, centered in `area`.
pub fn centered_line(percent_x: u16, height: u16, area: Rect) -> Rect {
    let column = centered_rect(percent_x, 100, area);
    let height = height.min(column.height);
    Rect {
        y: column.y + (column.height - height) / 2,
        height,
        ..column
    }
}
