use api_types::room::Room;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::dispatch::{Effects, Net};
use crate::app::route::Route;
use crate::view::detail::DetailView;

use super::editing::{DetailKey, detail_key};

#[derive(Debug)]
pub struct RoomDetailPage {
    pub view: DetailView<Room>,
    pub location_cursor: usize,
}

impl RoomDetailPage {
    pub fn mount(id: u64, net: &mut Net) -> Self {
        let client = net.client();
        net.request(
            async move { client.get::<Room>(id).await },
            |page: &mut Self, result, _fx| page.view.loaded(result),
        );
        Self {
            view: DetailView::new(id),
            location_cursor: 0,
        }
    }

    pub fn captures_input(&self) -> bool {
        self.view.is_editing() || self.view.confirm_pending()
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        let id = self.view.id();
        match detail_key(&mut self.view, key, None) {
            DetailKey::Save(payload) => {
                let client = net.client();
                net.request(
                    async move { client.patch::<Room>(id, &payload).await },
                    |page: &mut Self, result, fx| fx.toast(page.view.saved(result)),
                );
                return true;
            }
            DetailKey::Delete => {
                let client = net.client();
                net.request(
                    async move { client.delete::<Room>(id).await },
                    |page: &mut Self, result, fx| match page.view.deleted(result) {
                        Ok(toast) => {
                            fx.toast(toast);
                            fx.replace(Route::Rooms);
                        }
                        Err(toast) => fx.toast(toast),
                    },
                );
                return true;
            }
            DetailKey::Consumed => return true,
            DetailKey::Ignored => {}
        }

        let count = self
            .view
            .record()
            .map_or(0, |room| room.locations.len());
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.location_cursor = (self.location_cursor + 1).min(count.saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.location_cursor = self.location_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let location = self
                    .view
                    .record()
                    .and_then(|room| room.locations.get(self.location_cursor));
                if let Some(location) = location {
                    fx.push(Route::LocationDetail(location.id));
                }
            }
            KeyCode::Char('i') => fx.push(Route::RoomInventory(id)),
            _ => return false,
        }
        true
    }
}
