//! Records exchanged with the inventory REST service.
//!
//! Every record is a plain, behaviour-free copy of what the backend returns.
//! Identifiers are assigned by the backend; the client never fabricates one.

mod amount;

pub use amount::{Amount, AmountError};

pub mod room {
    use serde::{Deserialize, Serialize};

    use crate::location::Location;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Room {
        pub id: u64,
        pub name: String,
        pub description: Option<String>,
        pub floor_level: Option<String>,
        /// Populated by the backend on read, ordered as returned.
        #[serde(default)]
        pub locations: Vec<Location>,
    }

    impl Room {
        /// All items stored in any of the room's locations.
        pub fn items(&self) -> impl Iterator<Item = &crate::item::Item> {
            self.locations.iter().flat_map(|location| location.items.iter())
        }
    }
}

pub mod location {
    use serde::{Deserialize, Serialize};

    use crate::item::Item;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Location {
        pub id: u64,
        pub name: String,
        pub description: Option<String>,
        /// Owning room. Older payloads name this field `room`.
        #[serde(alias = "room")]
        pub room_id: u64,
        #[serde(default)]
        pub items: Vec<Item>,
    }
}

pub mod item {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    use crate::Amount;

    fn default_quantity() -> i64 {
        1
    }

    /// An inventory item.
    ///
    /// `room_id`, `room_name` and `location_name` are denormalised by the
    /// backend for display and are never written back. Writes address the
    /// owning location through the `location` key.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Item {
        pub id: u64,
        pub name: String,
        pub description: Option<String>,
        pub serial_number: Option<String>,
        pub purchase_date: Option<NaiveDate>,
        pub purchase_price: Option<Amount>,
        pub current_value: Option<Amount>,
        #[serde(default = "default_quantity")]
        pub quantity: i64,
        pub notes: Option<String>,
        pub category: Option<u64>,
        pub location_id: Option<u64>,
        pub room_id: Option<u64>,
        pub location_name: Option<String>,
        pub room_name: Option<String>,
    }
}

pub mod category {
    use serde::{Deserialize, Serialize};

    /// Node of the category forest. `parent` and `subcategories` mirror each
    /// other; the backend keeps them acyclic.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        pub id: u64,
        pub name: String,
        pub description: Option<String>,
        pub parent: Option<u64>,
        #[serde(default)]
        pub subcategories: Vec<u64>,
    }
}

#[cfg(test)]
mod tests {
    use super::{item::Item, room::Room};

    #[test]
    fn nested_room_read_shape() {
        let body = r#"{
            "id": 1,
            "name": "Garage",
            "description": null,
            "floor_level": "0",
            "locations": [
                {"id": 4, "name": "Shelf A", "description": "", "room_id": 1,
                 "items": [
                    {"id": 9, "name": "Drill", "quantity": 1, "location": 4,
                     "location_id": 4, "location_name": "Shelf A", "room_name": "Garage",
                     "purchase_price": "89.90", "purchase_date": "2023-04-01"}
                 ]}
            ]
        }"#;

        let room: Room = serde_json::from_str(body).unwrap();
        assert_eq!(room.locations.len(), 1);
        assert_eq!(room.locations[0].room_id, 1);

        let items: Vec<&Item> = room.items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].location_id, Some(4));
        assert_eq!(items[0].room_name.as_deref(), Some("Garage"));
        assert_eq!(items[0].purchase_price.map(|p| p.cents()), Some(8990));
        assert_eq!(
            items[0].purchase_date.map(|d| d.to_string()).as_deref(),
            Some("2023-04-01")
        );
    }

    #[test]
    fn location_accepts_legacy_room_key_and_defaults_quantity() {
        let location: super::location::Location =
            serde_json::from_str(r#"{"id": 2, "name": "Drawer", "room": 7}"#).unwrap();
        assert_eq!(location.room_id, 7);
        assert!(location.items.is_empty());

        let item: Item = serde_json::from_str(r#"{"id": 3, "name": "Tape"}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.location_id, None);
    }
}
