use api_types::{item::Item, location::Location, room::Room};
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::dispatch::{Effects, Net};
use crate::app::route::Route;
use crate::view::detail::DetailView;
use crate::view::relations::{infer_room, reconcile_location};
use crate::view::toast::Toast;

use super::editing::{Choices, DetailKey, detail_key};

#[derive(Debug)]
pub struct ItemDetailPage {
    pub view: DetailView<Item>,
    pub rooms: Option<Vec<Room>>,
    pub locations: Option<Vec<Location>>,
}

impl ItemDetailPage {
    pub fn mount(id: u64, net: &mut Net) -> Self {
        let client = net.client();
        net.request(
            async move { client.get::<Item>(id).await },
            |page: &mut Self, result, _fx| page.view.loaded(result),
        );
        request_candidates(net);
        Self {
            view: DetailView::new(id),
            rooms: None,
            locations: None,
        }
    }

    pub fn choices(&self) -> Option<Choices<'_>> {
        Choices::from_loaded(self.rooms.as_deref(), self.locations.as_deref())
    }

    pub fn captures_input(&self) -> bool {
        self.view.is_editing() || self.view.confirm_pending()
    }

    /// Seeds the room selector and drops a location the room does not own.
    /// Runs when editing starts and when the locations arrive mid-edit.
    fn sync_relations(&mut self) {
        let (Some(form), Some(locations)) = (self.view.form_mut(), self.locations.as_deref())
        else {
            return;
        };
        infer_room(form, locations);
        reconcile_location(form, locations);
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        let id = self.view.id();
        let was_editing = self.view.is_editing();
        let choices = Choices::from_loaded(self.rooms.as_deref(), self.locations.as_deref());
        match detail_key(&mut self.view, key, choices) {
            DetailKey::Save(payload) => {
                let client = net.client();
                net.request(
                    async move { client.patch::<Item>(id, &payload).await },
                    |page: &mut Self, result, fx| fx.toast(page.view.saved(result)),
                );
                return true;
            }
            DetailKey::Delete => {
                let client = net.client();
                net.request(
                    async move { client.delete::<Item>(id).await },
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
            DetailKey::Consumed => {
                if !was_editing && self.view.is_editing() {
                    self.sync_relations();
                }
                return true;
            }
            DetailKey::Ignored => {}
        }

        match key.code {
            KeyCode::Char('l') => {
                if let Some(location) = self.view.record().and_then(|item| item.location_id) {
                    fx.push(Route::LocationDetail(location));
                }
                true
            }
            _ => false,
        }
    }
}

/// Full Room and Location sets for the relation selectors.
fn request_candidates(net: &mut Net) {
    let client = net.client();
    net.request(
        async move { client.list::<Room>().await },
        |page: &mut ItemDetailPage, result, fx| match result {
            Ok(rooms) => page.rooms = Some(rooms),
            Err(err) => fx.toast(Toast::failure("Failed to fetch rooms", &err)),
        },
    );
    let client = net.client();
    net.request(
        async move { client.list::<Location>().await },
        |page: &mut ItemDetailPage, result, fx| match result {
            Ok(locations) => {
                page.locations = Some(locations);
                page.sync_relations();
            }
            Err(err) => fx.toast(Toast::failure("Failed to fetch locations", &err)),
        },
    );
}
