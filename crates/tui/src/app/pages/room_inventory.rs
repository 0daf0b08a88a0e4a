use api_types::{item::Item, location::Location, room::Room};
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::dispatch::{Effects, Net};
use crate::app::route::Route;
use crate::view::child_list::ChildList;
use crate::view::detail::Phase;
use crate::view::list::{ListView, Outcome};

use super::rows::row_event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Locations,
    Items,
}

/// A room's locations beside the items they hold.
#[derive(Debug)]
pub struct RoomInventoryPage {
    pub room_id: u64,
    pub room: Phase<Room>,
    pub items: ChildList<Item>,
    pub table: ListView<Item>,
    pub location_cursor: usize,
    /// When set, only items stored in this location are shown.
    pub narrowed: Option<u64>,
    pub pane: Pane,
}

impl RoomInventoryPage {
    pub fn mount(room_id: u64, net: &mut Net) -> Self {
        let client = net.client();
        net.request(
            async move { client.get::<Room>(room_id).await },
            |page: &mut Self, result, _fx| {
                if let Ok(room) = &result {
                    page.items = ChildList::root(flatten_items(&room.locations));
                }
                page.room = Phase::from_result(result, "room inventory");
            },
        );
        Self {
            room_id,
            room: Phase::Loading,
            items: ChildList::root(Vec::new()),
            table: ListView::new(),
            location_cursor: 0,
            narrowed: None,
            pane: Pane::Locations,
        }
    }

    pub fn captures_input(&self) -> bool {
        self.table.is_typing()
    }

    pub fn locations(&self) -> &[Location] {
        self.room
            .ready()
            .map(|room| room.locations.as_slice())
            .unwrap_or_default()
    }

    pub fn visible(&self) -> Vec<&Item> {
        let narrowed = self.narrowed;
        self.table.visible(
            self.items
                .children()
                .iter()
                .filter(|item| narrowed.is_none_or(|id| item.location_id == Some(id))),
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        match self.pane {
            Pane::Items => {
                let narrowed = self.narrowed;
                let visible = self.table.visible(
                    self.items
                        .children()
                        .iter()
                        .filter(|item| narrowed.is_none_or(|id| item.location_id == Some(id))),
                );
                match self.table.handle_key(key, &visible) {
                    Outcome::Consumed => return true,
                    Outcome::Event(event) => {
                        row_event(event, net, fx, Route::ItemDetail, room_items);
                        return true;
                    }
                    Outcome::Ignored => {}
                }
            }
            Pane::Locations => {
                if self.location_key(key, fx) {
                    return true;
                }
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.pane = match self.pane {
                    Pane::Items => Pane::Locations,
                    Pane::Locations => Pane::Items,
                };
                true
            }
            KeyCode::Char('r') => {
                fx.push(Route::RoomDetail(self.room_id));
                true
            }
            _ => false,
        }
    }

    fn location_key(&mut self, key: KeyEvent, fx: &mut Effects) -> bool {
        let count = self.locations().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.location_cursor = (self.location_cursor + 1).min(count.saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.location_cursor = self.location_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let Some(id) = self.locations().get(self.location_cursor).map(|l| l.id) else {
                    return true;
                };
                // Selecting the narrowed location again clears the narrowing.
                self.narrowed = if self.narrowed == Some(id) {
                    None
                } else {
                    Some(id)
                };
            }
            KeyCode::Char('o') => {
                if let Some(location) = self.locations().get(self.location_cursor) {
                    fx.push(Route::LocationDetail(location.id));
                }
            }
            _ => return false,
        }
        true
    }
}

/// Items of every location, each tagged with the location it came from.
fn flatten_items(locations: &[Location]) -> Vec<Item> {
    locations
        .iter()
        .flat_map(|location| {
            location.items.iter().cloned().map(move |mut item| {
                if item.location_id.is_none() {
                    item.location_id = Some(location.id);
                }
                item
            })
        })
        .collect()
}

fn room_items(page: &mut RoomInventoryPage) -> Option<&mut ChildList<Item>> {
    Some(&mut page.items)
}
