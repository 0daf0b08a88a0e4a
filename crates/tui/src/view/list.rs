//! Sortable, filterable table over rows owned by the caller.
//!
//! [`ListView`] never holds the rows: every call borrows the caller's
//! sequence and returns views into it. Row actions come back as
//! [`ListEvent`]s and the caller decides how to persist them.

use std::cmp::Ordering;
use std::marker::PhantomData;

use api_types::{Amount, item::Item, room::Room};
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: u16,
    pub editable: bool,
}

const fn column(title: &'static str, width: u16, editable: bool) -> Column {
    Column {
        title,
        width,
        editable,
    }
}

pub trait Row: Clone {
    fn id(&self) -> u64;

    fn columns() -> &'static [Column];

    fn cell(&self, column: usize) -> String;

    /// Copy of the row with one cell replaced, or why the value is rejected.
    fn with_cell(&self, column: usize, value: &str) -> Result<Self, String>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<R> {
    View(u64),
    Delete(u64),
    /// Full record after an inline cell edit.
    Update(R),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<R> {
    Ignored,
    Consumed,
    Event(ListEvent<R>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub column: usize,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: usize,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub id: u64,
    pub column: usize,
    pub buffer: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListView<R> {
    filter: Option<Filter>,
    filtering: bool,
    sort: Option<Sort>,
    selected: usize,
    column: usize,
    edit: Option<CellEdit>,
    _rows: PhantomData<fn() -> R>,
}

impl<R> Default for ListView<R> {
    fn default() -> Self {
        Self {
            filter: None,
            filtering: false,
            sort: None,
            selected: 0,
            column: 0,
            edit: None,
            _rows: PhantomData,
        }
    }
}

impl<R: Row> ListView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that pass the filter, in display order.
    pub fn visible<'a, I>(&self, rows: I) -> Vec<&'a R>
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        let mut visible: Vec<&R> = rows
            .into_iter()
            .filter(|row| self.matches(row))
            .collect();
        if let Some(sort) = self.sort {
            visible.sort_by(|a, b| {
                let ordering = compare_cells(&a.cell(sort.column), &b.cell(sort.column));
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        visible
    }

    fn matches(&self, row: &R) -> bool {
        match &self.filter {
            Some(filter) if !filter.query.is_empty() => row
                .cell(filter.column)
                .to_lowercase()
                .contains(&filter.query.to_lowercase()),
            _ => true,
        }
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn edit(&self) -> Option<&CellEdit> {
        self.edit.as_ref()
    }

    /// Whether keystrokes are currently text input.
    pub fn is_typing(&self) -> bool {
        self.filtering || self.edit.is_some()
    }

    /// Index of the selection within `visible`, clamped to its length.
    pub fn selected_index(&self, visible: usize) -> Option<usize> {
        (visible > 0).then(|| self.selected.min(visible - 1))
    }

    pub fn selected<'a>(&self, visible: &[&'a R]) -> Option<&'a R> {
        self.selected_index(visible.len()).map(|idx| visible[idx])
    }

    pub fn select_next(&mut self, visible: usize) {
        if let Some(idx) = self.selected_index(visible) {
            self.selected = (idx + 1).min(visible - 1);
        }
    }

    pub fn select_prev(&mut self, visible: usize) {
        if let Some(idx) = self.selected_index(visible) {
            self.selected = idx.saturating_sub(1);
        }
    }

    pub fn next_column(&mut self) {
        self.column = (self.column + 1) % R::columns().len().max(1);
    }

    pub fn prev_column(&mut self) {
        let count = R::columns().len().max(1);
        self.column = (self.column + count - 1) % count;
    }

    pub fn set_filter(&mut self, column: usize, query: impl Into<String>) {
        self.filter = Some(Filter {
            column,
            query: query.into(),
        });
        self.selected = 0;
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.filtering = false;
    }

    /// Sorts by `column`; sorting by the same column again flips the order.
    pub fn sort_by(&mut self, column: usize) {
        self.sort = Some(match self.sort {
            Some(sort) if sort.column == column => Sort {
                column,
                descending: !sort.descending,
            },
            _ => Sort {
                column,
                descending: false,
            },
        });
    }

    /// Starts editing the current column of `row` if that column is editable.
    pub fn begin_edit(&mut self, row: &R) -> bool {
        let editable = R::columns()
            .get(self.column)
            .is_some_and(|column| column.editable);
        if editable {
            self.edit = Some(CellEdit {
                id: row.id(),
                column: self.column,
                buffer: row.cell(self.column),
                error: None,
            });
        }
        editable
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Applies the edit buffer to its row. An invalid value keeps the edit
    /// open with the reason attached.
    pub fn commit_edit(&mut self, rows: &[&R]) -> Option<ListEvent<R>> {
        let edit = self.edit.as_mut()?;
        let Some(row) = rows.iter().find(|row| row.id() == edit.id) else {
            self.edit = None;
            return None;
        };
        match row.with_cell(edit.column, &edit.buffer) {
            Ok(updated) => {
                self.edit = None;
                Some(ListEvent::Update(updated))
            }
            Err(reason) => {
                edit.error = Some(reason);
                None
            }
        }
    }

    /// Table keys. `visible` must be the rows as currently displayed.
    pub fn handle_key(&mut self, key: KeyEvent, visible: &[&R]) -> Outcome<R> {
        if self.edit.is_some() {
            return self.edit_key(key, visible);
        }
        if self.filtering {
            return self.filter_key(key);
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(visible.len()),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(visible.len()),
            KeyCode::Right => self.next_column(),
            KeyCode::Left => self.prev_column(),
            KeyCode::Char('s') => self.sort_by(self.column),
            KeyCode::Char('/') => {
                let query = self
                    .filter
                    .as_ref()
                    .filter(|filter| filter.column == self.column)
                    .map(|filter| filter.query.clone())
                    .unwrap_or_default();
                self.set_filter(self.column, query);
                self.filtering = true;
            }
            KeyCode::Enter => {
                return match self.selected(visible) {
                    Some(row) => Outcome::Event(ListEvent::View(row.id())),
                    None => Outcome::Consumed,
                };
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                return match self.selected(visible) {
                    Some(row) => Outcome::Event(ListEvent::Delete(row.id())),
                    None => Outcome::Consumed,
                };
            }
            KeyCode::Char('c') => {
                if let Some(row) = self.selected(visible) {
                    self.begin_edit(row);
                }
            }
            _ => return Outcome::Ignored,
        }
        Outcome::Consumed
    }

    fn edit_key(&mut self, key: KeyEvent, visible: &[&R]) -> Outcome<R> {
        match key.code {
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Enter => {
                if let Some(event) = self.commit_edit(visible) {
                    return Outcome::Event(event);
                }
            }
            KeyCode::Backspace => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.buffer.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.buffer.push(ch);
                }
            }
            _ => {}
        }
        Outcome::Consumed
    }

    fn filter_key(&mut self, key: KeyEvent) -> Outcome<R> {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => self.filtering = false,
            KeyCode::Backspace => {
                if let Some(filter) = self.filter.as_mut() {
                    filter.query.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(filter) = self.filter.as_mut() {
                    filter.query.push(ch);
                }
                self.selected = 0;
            }
            _ => {}
        }
        Outcome::Consumed
    }
}

/// Numbers sort before text; numbers compare numerically, text
/// case-insensitively. Total, so `sort_by` stays well defined on mixed columns.
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(value: &str, label: &str) -> Result<String, String> {
    optional(value).ok_or_else(|| format!("{label} cannot be empty"))
}

const ITEM_COLUMNS: &[Column] = &[
    column("ID", 5, false),
    column("Name", 24, true),
    column("Qty", 5, true),
    column("Location", 16, false),
    column("Room", 14, false),
    column("Value", 10, true),
    column("Serial", 14, true),
];

impl Row for Item {
    fn id(&self) -> u64 {
        self.id
    }

    fn columns() -> &'static [Column] {
        ITEM_COLUMNS
    }

    fn cell(&self, column: usize) -> String {
        match column {
            0 => self.id.to_string(),
            1 => self.name.clone(),
            2 => self.quantity.to_string(),
            3 => self.location_name.clone().unwrap_or_default(),
            4 => self.room_name.clone().unwrap_or_default(),
            5 => self
                .current_value
                .map(|value| value.to_string())
                .unwrap_or_default(),
            6 => self.serial_number.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn with_cell(&self, column: usize, value: &str) -> Result<Self, String> {
        let mut item = self.clone();
        match column {
            1 => item.name = required(value, "Name")?,
            2 => {
                item.quantity = value
                    .trim()
                    .parse()
                    .map_err(|_| "Quantity must be a whole number".to_string())?
            }
            5 => {
                item.current_value = optional(value)
                    .map(|raw| raw.parse::<Amount>())
                    .transpose()
                    .map_err(|err| err.to_string())?
            }
            6 => item.serial_number = optional(value),
            _ => return Err("Column is read-only".to_string()),
        }
        Ok(item)
    }
}

const ROOM_COLUMNS: &[Column] = &[
    column("ID", 5, false),
    column("Name", 20, true),
    column("Floor", 8, true),
    column("Description", 30, true),
    column("Locations", 9, false),
];

impl Row for Room {
    fn id(&self) -> u64 {
        self.id
    }

    fn columns() -> &'static [Column] {
        ROOM_COLUMNS
    }

    fn cell(&self, column: usize) -> String {
        match column {
            0 => self.id.to_string(),
            1 => self.name.clone(),
            2 => self.floor_level.clone().unwrap_or_default(),
            3 => self.description.clone().unwrap_or_default(),
            4 => self.locations.len().to_string(),
            _ => String::new(),
        }
    }

    fn with_cell(&self, column: usize, value: &str) -> Result<Self, String> {
        let mut room = self.clone();
        match column {
            1 => room.name = required(value, "Name")?,
            2 => room.floor_level = optional(value),
            3 => room.description = optional(value),
            _ => return Err("Column is read-only".to_string()),
        }
        Ok(room)
    }
}
