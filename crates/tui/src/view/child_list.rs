//! Collection owned by a page and mutated only after the backend confirms.

use serde_json::{Value, json};

use crate::client::{ClientResult, Payload, Resource};

use super::capitalized;
use super::toast::Toast;

#[derive(Debug, Clone, PartialEq)]
pub struct ChildList<C> {
    /// Foreign key forced onto added children, e.g. `("location", 4)`.
    parent: Option<(&'static str, u64)>,
    children: Vec<C>,
}

impl<C: Resource + Clone> ChildList<C> {
    pub fn scoped(parent_key: &'static str, parent_id: u64, children: Vec<C>) -> Self {
        Self {
            parent: Some((parent_key, parent_id)),
            children,
        }
    }

    /// A list with no parent, such as the full inventory.
    pub fn root(children: Vec<C>) -> Self {
        Self {
            parent: None,
            children,
        }
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Create payload for a new child: empty values dropped, parent key set.
    pub fn add_payload(&self, draft: Payload) -> Payload {
        let mut payload: Payload = draft
            .into_iter()
            .filter(|(_, value)| !is_empty(value))
            .collect();
        if let Some((key, id)) = self.parent {
            payload.insert(key.to_string(), json!(id));
        }
        payload
    }

    /// Appends the record the server returned, with its real identifier.
    pub fn added(&mut self, result: ClientResult<C>) -> Toast {
        match result {
            Ok(child) => {
                self.children.push(child);
                Toast::success(format!("{} added.", capitalized(C::NOUN)))
            }
            Err(err) => Toast::failure(&format!("Failed to add {}", C::NOUN), &err),
        }
    }

    pub fn updated(&mut self, result: ClientResult<C>) -> Toast {
        match result {
            Ok(child) => {
                let id = child.id();
                if let Some(slot) = self.children.iter_mut().find(|c| c.id() == id) {
                    *slot = child;
                }
                Toast::success(format!("{} updated successfully.", capitalized(C::NOUN)))
            }
            Err(err) => Toast::failure(&format!("Failed to update {}", C::NOUN), &err),
        }
    }

    pub fn deleted(&mut self, id: u64, result: ClientResult<()>) -> Toast {
        match result {
            Ok(()) => {
                self.children.retain(|child| child.id() != id);
                Toast::success(format!("{} deleted.", capitalized(C::NOUN)))
            }
            Err(err) => Toast::failure(&format!("Failed to delete {}", C::NOUN), &err),
        }
    }

    /// Appends records created elsewhere, e.g. by a voice upload.
    pub fn extend(&mut self, created: Vec<C>) {
        self.children.extend(created);
    }

    pub fn reset(&mut self, children: Vec<C>) {
        self.children = children;
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use api_types::item::Item;

    use super::*;
    use crate::client::ClientError;
    use crate::view::toast::ToastLevel;

    fn item(id: u64, name: &str) -> Item {
        serde_json::from_value(json!({"id": id, "name": name, "location_id": 4})).unwrap()
    }

    #[test]
    fn add_payload_forces_parent_and_strips_empty() {
        let list = ChildList::<Item>::scoped("location", 4, Vec::new());
        let mut draft = Payload::new();
        draft.insert("name".into(), json!("New Item"));
        draft.insert("quantity".into(), json!(1));
        draft.insert("description".into(), json!(""));
        draft.insert("notes".into(), Value::Null);
        draft.insert("location".into(), json!(99));

        let payload = list.add_payload(draft);
        assert_eq!(
            Value::Object(payload),
            json!({"name": "New Item", "quantity": 1, "location": 4})
        );
    }

    #[test]
    fn root_list_sets_no_parent() {
        let list = ChildList::<Item>::root(Vec::new());
        let mut draft = Payload::new();
        draft.insert("name".into(), json!("Lamp"));
        assert!(!list.add_payload(draft).contains_key("location"));
    }

    fn find(list: &ChildList<Item>, id: u64) -> Option<&Item> {
        list.children().iter().find(|child| child.id == id)
    }

    #[test]
    fn mutations_apply_only_on_success() {
        let mut list = ChildList::scoped("location", 4, vec![item(1, "Drill"), item(2, "Saw")]);

        let toast = list.added(Err(ClientError::Validation("name: required".into())));
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(list.len(), 2);
        list.added(Ok(item(7, "New Item")));
        assert_eq!(find(&list, 7).map(|i| i.name.as_str()), Some("New Item"));

        list.updated(Err(ClientError::NotFound));
        assert_eq!(find(&list, 1).unwrap().name, "Drill");
        let toast = list.updated(Ok(item(1, "Cordless drill")));
        assert_eq!(toast, Toast::success("Item updated successfully."));
        assert_eq!(find(&list, 1).unwrap().name, "Cordless drill");

        let toast = list.deleted(2, Err(ClientError::Server("Database unavailable".into())));
        assert_eq!(toast.message, "Failed to delete item: Database unavailable");
        assert!(find(&list, 2).is_some());
        list.deleted(2, Ok(()));
        assert!(find(&list, 2).is_none());
        assert_eq!(
            list.children().iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![1, 7]
        );
    }
}
