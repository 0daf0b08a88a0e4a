//! One state struct per route, each owned exclusively by the mounted page.

mod editing;
mod rows;
pub mod inventory;
pub mod item_create;
pub mod item_detail;
pub mod location_detail;
pub mod room_detail;
pub mod room_inventory;
pub mod rooms;

use crossterm::event::KeyEvent;

use crate::config::AppConfig;

use super::dispatch::{Effects, Net};
use super::route::Route;

pub use editing::Choices;
pub use inventory::InventoryPage;
pub use item_create::ItemCreatePage;
pub use item_detail::ItemDetailPage;
pub use location_detail::LocationDetailPage;
pub use room_detail::RoomDetailPage;
pub use room_inventory::RoomInventoryPage;
pub use rooms::RoomsPage;

#[derive(Debug)]
pub enum Page {
    Inventory(InventoryPage),
    Rooms(RoomsPage),
    RoomDetail(RoomDetailPage),
    RoomInventory(RoomInventoryPage),
    LocationDetail(LocationDetailPage),
    ItemDetail(ItemDetailPage),
    ItemCreate(ItemCreatePage),
}

/// Downcast used to route a reply to the page type that requested it.
pub trait PageState: 'static {
    fn cast(page: &mut Page) -> Option<&mut Self>;
}

macro_rules! page_state {
    ($variant:ident, $ty:ty) => {
        impl PageState for $ty {
            fn cast(page: &mut Page) -> Option<&mut Self> {
                match page {
                    Page::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

page_state!(Inventory, InventoryPage);
page_state!(Rooms, RoomsPage);
page_state!(RoomDetail, RoomDetailPage);
page_state!(RoomInventory, RoomInventoryPage);
page_state!(LocationDetail, LocationDetailPage);
page_state!(ItemDetail, ItemDetailPage);
page_state!(ItemCreate, ItemCreatePage);

impl Page {
    /// Builds the page for `route` and issues its initial fetches.
    pub fn mount(route: Route, net: &mut Net, config: &AppConfig) -> Self {
        match route {
            Route::Inventory => Self::Inventory(InventoryPage::mount(net)),
            Route::Rooms => Self::Rooms(RoomsPage::mount(net)),
            Route::RoomDetail(id) => Self::RoomDetail(RoomDetailPage::mount(id, net)),
            Route::RoomInventory(id) => Self::RoomInventory(RoomInventoryPage::mount(id, net)),
            Route::LocationDetail(id) => {
                Self::LocationDetail(LocationDetailPage::mount(id, net))
            }
            Route::ItemDetail(id) => Self::ItemDetail(ItemDetailPage::mount(id, net)),
            Route::ItemCreate => {
                Self::ItemCreate(ItemCreatePage::mount(net, config.redirect_delay()))
            }
        }
    }

    /// Whether the page is consuming raw text or a modal answer, in which
    /// case global shortcuts stay off.
    pub fn captures_input(&self) -> bool {
        match self {
            Self::Inventory(page) => page.captures_input(),
            Self::Rooms(page) => page.captures_input(),
            Self::RoomDetail(page) => page.captures_input(),
            Self::RoomInventory(page) => page.captures_input(),
            Self::LocationDetail(page) => page.captures_input(),
            Self::ItemDetail(page) => page.captures_input(),
            Self::ItemCreate(page) => page.captures_input(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        match self {
            Self::Inventory(page) => page.handle_key(key, net, fx),
            Self::Rooms(page) => page.handle_key(key, net, fx),
            Self::RoomDetail(page) => page.handle_key(key, net, fx),
            Self::RoomInventory(page) => page.handle_key(key, net, fx),
            Self::LocationDetail(page) => page.handle_key(key, net, fx),
            Self::ItemDetail(page) => page.handle_key(key, net, fx),
            Self::ItemCreate(page) => page.handle_key(key, net, fx),
        }
    }
}
