use std::fmt;

/// Client-visible routes. Paths mirror the backend's resource names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Inventory,
    Rooms,
    RoomDetail(u64),
    RoomInventory(u64),
    LocationDetail(u64),
    ItemDetail(u64),
    ItemCreate,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let id = |raw: &str| raw.parse::<u64>().ok();
        match segments.as_slice() {
            [] | ["inventory"] => Some(Self::Inventory),
            ["rooms"] => Some(Self::Rooms),
            ["rooms", raw] => id(raw).map(Self::RoomDetail),
            ["rooms", raw, "inventory"] => id(raw).map(Self::RoomInventory),
            ["locations", raw] => id(raw).map(Self::LocationDetail),
            // `new` must win over the numeric match below.
            ["items", "new"] => Some(Self::ItemCreate),
            ["items", raw] => id(raw).map(Self::ItemDetail),
            _ => None,
        }
    }

    pub fn path(self) -> String {
        match self {
            Self::Inventory => "/".to_string(),
            Self::Rooms => "/rooms".to_string(),
            Self::RoomDetail(id) => format!("/rooms/{id}"),
            Self::RoomInventory(id) => format!("/rooms/{id}/inventory"),
            Self::LocationDetail(id) => format!("/locations/{id}"),
            Self::ItemDetail(id) => format!("/items/{id}"),
            Self::ItemCreate => "/items/new".to_string(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Inventory => "Inventory",
            Self::Rooms => "Rooms",
            Self::RoomDetail(_) => "Room",
            Self::RoomInventory(_) => "Room inventory",
            Self::LocationDetail(_) => "Location",
            Self::ItemDetail(_) => "Item",
            Self::ItemCreate => "New item",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
