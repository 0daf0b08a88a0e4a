use std::time::{Duration, Instant};

use api_types::{item::Item, location::Location, room::Room};
use crossterm::event::KeyEvent;

use crate::app::dispatch::{Effects, Net};
use crate::view::create::CreateView;
use crate::view::toast::Toast;

use super::editing::{Choices, FormKey, form_key};

#[derive(Debug)]
pub struct ItemCreatePage {
    pub view: CreateView<Item>,
    pub rooms: Option<Vec<Room>>,
    pub locations: Option<Vec<Location>>,
    redirect_delay: Duration,
}

impl ItemCreatePage {
    pub fn mount(net: &mut Net, redirect_delay: Duration) -> Self {
        let client = net.client();
        net.request(
            async move { client.list::<Room>().await },
            |page: &mut Self, result, fx| match result {
                Ok(rooms) => page.rooms = Some(rooms),
                Err(err) => fx.toast(Toast::failure("Failed to fetch rooms", &err)),
            },
        );
        let client = net.client();
        net.request(
            async move { client.list::<Location>().await },
            |page: &mut Self, result, fx| match result {
                Ok(locations) => page.locations = Some(locations),
                Err(err) => fx.toast(Toast::failure("Failed to fetch locations", &err)),
            },
        );
        Self {
            view: CreateView::new(),
            rooms: None,
            locations: None,
            redirect_delay,
        }
    }

    pub fn choices(&self) -> Option<Choices<'_>> {
        Choices::from_loaded(self.rooms.as_deref(), self.locations.as_deref())
    }

    /// The whole page is a form.
    pub fn captures_input(&self) -> bool {
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        let choices = Choices::from_loaded(self.rooms.as_deref(), self.locations.as_deref());
        match form_key(self.view.form_mut(), key, choices) {
            FormKey::Submit => {
                let Some(payload) = self.view.submit() else {
                    return true;
                };
                let client = net.client();
                net.request(
                    async move { client.create::<Item>(&payload).await },
                    |page: &mut Self, result, fx| {
                        let toast = page.view.created(result, Instant::now(), page.redirect_delay);
                        fx.toast(toast);
                    },
                );
            }
            FormKey::Cancel => fx.back(),
            FormKey::Handled => {}
        }
        true
    }

    /// Target of a redirect whose delay has passed.
    pub fn due_redirect(&mut self, now: Instant) -> Option<u64> {
        self.view.due_redirect(now)
    }
}
