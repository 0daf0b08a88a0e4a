use api_types::{item::Item, location::Location};
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::json;

use crate::app::dispatch::{Effects, Net};
use crate::app::route::Route;
use crate::client::Payload;
use crate::view::child_list::ChildList;
use crate::view::detail::DetailView;
use crate::view::list::{ListView, Outcome};

use super::editing::{DetailKey, detail_key};
use super::rows::row_event;

/// Item write key addressing the owning location.
const PARENT_KEY: &str = "location";

#[derive(Debug)]
pub struct LocationDetailPage {
    pub view: DetailView<Location>,
    /// The location's items. Seeded from the loaded record and afterwards
    /// changed only by confirmed add/update/delete calls.
    pub items: ChildList<Item>,
    pub table: ListView<Item>,
    pub show_items: bool,
}

impl LocationDetailPage {
    pub fn mount(id: u64, net: &mut Net) -> Self {
        let client = net.client();
        net.request(
            async move { client.get::<Location>(id).await },
            |page: &mut Self, result, _fx| {
                if let Ok(location) = &result {
                    page.items.reset(location.items.clone());
                }
                page.view.loaded(result);
            },
        );
        Self {
            view: DetailView::new(id),
            items: ChildList::scoped(PARENT_KEY, id, Vec::new()),
            table: ListView::new(),
            show_items: false,
        }
    }

    pub fn captures_input(&self) -> bool {
        self.view.is_editing() || self.view.confirm_pending() || self.table.is_typing()
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        if self.show_items && self.table.is_typing() {
            return self.table_key(key, net, fx);
        }

        let id = self.view.id();
        match detail_key(&mut self.view, key, None) {
            DetailKey::Save(payload) => {
                let client = net.client();
                net.request(
                    async move { client.patch::<Location>(id, &payload).await },
                    |page: &mut Self, result, fx| {
                        if let Ok(location) = &result {
                            page.items.reset(location.items.clone());
                        }
                        fx.toast(page.view.saved(result));
                    },
                );
                return true;
            }
            DetailKey::Delete => {
                // Whether the backend cascades, blocks or orphans the items
                // is its call; a refusal is shown as reported.
                let client = net.client();
                net.request(
                    async move { client.delete::<Location>(id).await },
                    |page: &mut Self, result, fx| match page.view.deleted(result) {
                        Ok(toast) => {
                            fx.toast(toast);
                            fx.replace(Route::Inventory);
                        }
                        Err(toast) => fx.toast(toast),
                    },
                );
                return true;
            }
            DetailKey::Consumed => return true,
            DetailKey::Ignored => {}
        }

        match key.code {
            KeyCode::Char('t') => {
                self.show_items = !self.show_items;
                true
            }
            KeyCode::Char('a') if self.view.record().is_some() => {
                self.add_item(net);
                true
            }
            KeyCode::Char('r') => {
                if let Some(location) = self.view.record() {
                    fx.push(Route::RoomDetail(location.room_id));
                }
                true
            }
            _ if self.show_items => self.table_key(key, net, fx),
            _ => false,
        }
    }

    fn table_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        let visible = self.table.visible(self.items.children());
        match self.table.handle_key(key, &visible) {
            Outcome::Consumed => true,
            Outcome::Event(event) => {
                row_event(event, net, fx, Route::ItemDetail, location_items);
                true
            }
            Outcome::Ignored => false,
        }
    }

    fn add_item(&mut self, net: &mut Net) {
        let mut draft = Payload::new();
        draft.insert("name".into(), json!("New Item"));
        draft.insert("quantity".into(), json!(1));
        let payload = self.items.add_payload(draft);

        self.show_items = true;
        let client = net.client();
        net.request(
            async move { client.create::<Item>(&payload).await },
            |page: &mut Self, result, fx| fx.toast(page.items.added(result)),
        );
    }
}

fn location_items(page: &mut LocationDetailPage) -> Option<&mut ChildList<Item>> {
    Some(&mut page.items)
}
