use api_types::room::Room;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::dispatch::{Effects, Net};
use crate::app::route::Route;
use crate::view::child_list::ChildList;
use crate::view::detail::Phase;
use crate::view::list::{ListView, Outcome};

use super::rows::row_event;

#[derive(Debug)]
pub struct RoomsPage {
    pub rooms: Phase<ChildList<Room>>,
    pub table: ListView<Room>,
}

impl RoomsPage {
    pub fn mount(net: &mut Net) -> Self {
        let mut page = Self {
            rooms: Phase::Loading,
            table: ListView::new(),
        };
        page.load(net);
        page
    }

    fn load(&mut self, net: &mut Net) {
        self.rooms = Phase::Loading;
        let client = net.client();
        net.request(
            async move { client.list::<Room>().await },
            |page: &mut Self, result, _fx| {
                page.rooms = Phase::from_result(result.map(ChildList::root), "rooms");
            },
        );
    }

    pub fn captures_input(&self) -> bool {
        self.table.is_typing()
    }

    pub fn visible(&self) -> Vec<&Room> {
        let children = self.rooms.ready().map(ChildList::children).unwrap_or_default();
        self.table.visible(children)
    }

    pub fn selected(&self) -> Option<&Room> {
        self.table.selected(&self.visible())
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        let children = self.rooms.ready().map(ChildList::children).unwrap_or_default();
        let visible = self.table.visible(children);
        match self.table.handle_key(key, &visible) {
            Outcome::Consumed => return true,
            Outcome::Event(event) => {
                row_event(event, net, fx, Route::RoomDetail, room_rows);
                return true;
            }
            Outcome::Ignored => {}
        }

        match key.code {
            KeyCode::Char('i') => {
                if let Some(room) = self.selected() {
                    fx.push(Route::RoomInventory(room.id));
                }
            }
            KeyCode::Char('r') => self.load(net),
            _ => return false,
        }
        true
    }
}

fn room_rows(page: &mut RoomsPage) -> Option<&mut ChildList<Room>> {
    page.rooms.ready_mut()
}
