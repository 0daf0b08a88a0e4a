//! Reusable view state behind every page.
//!
//! Nothing here touches the network: views produce payloads and consume
//! [`ClientResult`](crate::client::ClientResult)s, and the page that owns
//! them decides when to call the client.

pub mod category_tree;
pub mod child_list;
pub mod create;
pub mod detail;
pub mod form;
pub mod list;
pub mod relations;
pub mod toast;

/// `"item"` -> `"Item"`.
pub fn capitalized(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
