//! Dependent relation fields: the Location choice follows the Room choice.

use api_types::location::Location;

use super::form::{Form, LOCATION_KEY, ROOM_KEY};

/// Locations selectable for `room`. Without a room every location is a
/// candidate.
pub fn location_candidates(locations: &[Location], room: Option<u64>) -> Vec<&Location> {
    locations
        .iter()
        .filter(|location| room.is_none_or(|room| location.room_id == room))
        .collect()
}

/// Clears the location when the current room no longer owns it.
///
/// Returns `true` if the field was reset.
pub fn reconcile_location(form: &mut Form, locations: &[Location]) -> bool {
    let Some(selected) = form.choice(LOCATION_KEY) else {
        return false;
    };
    let room = form.choice(ROOM_KEY);
    let still_valid = location_candidates(locations, room)
        .iter()
        .any(|location| location.id == selected);
    if !still_valid {
        form.set_choice(LOCATION_KEY, None);
    }
    !still_valid
}

/// Fills in the room from the selected location when it is missing.
pub fn infer_room(form: &mut Form, locations: &[Location]) {
    if form.choice(ROOM_KEY).is_some() {
        return;
    }
    let owner = form
        .choice(LOCATION_KEY)
        .and_then(|id| locations.iter().find(|location| location.id == id))
        .map(|location| location.room_id);
    if owner.is_some() {
        form.set_choice(ROOM_KEY, owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::form::ITEM_FIELDS;

    fn location(id: u64, room_id: u64) -> Location {
        Location {
            id,
            name: format!("Location {id}"),
            description: None,
            room_id,
            items: Vec::new(),
        }
    }

    #[test]
    fn candidates_follow_room() {
        let locations = vec![location(1, 10), location(2, 20), location(3, 10)];
        let ids = |room| {
            location_candidates(&locations, room)
                .iter()
                .map(|l| l.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Some(10)), vec![1, 3]);
        assert_eq!(ids(Some(20)), vec![2]);
        assert_eq!(ids(Some(30)), Vec::<u64>::new());
        assert_eq!(ids(None), vec![1, 2, 3]);
    }

    #[test]
    fn changing_room_resets_foreign_location() {
        let locations = vec![location(1, 10), location(2, 20)];
        let mut form = Form::blank(ITEM_FIELDS);
        form.set_choice(ROOM_KEY, Some(10));
        form.set_choice(LOCATION_KEY, Some(1));
        assert!(!reconcile_location(&mut form, &locations));
        assert_eq!(form.choice(LOCATION_KEY), Some(1));

        form.set_choice(ROOM_KEY, Some(20));
        assert!(reconcile_location(&mut form, &locations));
        assert_eq!(form.choice(LOCATION_KEY), None);
        assert_eq!(form.get(LOCATION_KEY), "");
    }

    #[test]
    fn room_is_inferred_from_location() {
        let locations = vec![location(1, 10)];
        let mut form = Form::blank(ITEM_FIELDS);
        form.set_choice(LOCATION_KEY, Some(1));
        infer_room(&mut form, &locations);
        assert_eq!(form.choice(ROOM_KEY), Some(10));
    }
}
