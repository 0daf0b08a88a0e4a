use std::collections::HashSet;
use std::path::Path;

use api_types::{category::Category, item::Item};
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::dispatch::{Effects, Net};
use crate::app::route::Route;
use crate::client::Client;
use crate::view::category_tree::{TreeRow, descendants, flatten};
use crate::view::child_list::ChildList;
use crate::view::detail::Phase;
use crate::view::list::{ListView, Outcome};
use crate::view::toast::Toast;

use super::rows::row_event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Items,
    Categories,
}

#[derive(Debug)]
pub struct InventoryPage {
    pub items: Phase<ChildList<Item>>,
    pub table: ListView<Item>,
    pub categories: Vec<Category>,
    pub tree: Vec<TreeRow>,
    pub tree_cursor: usize,
    /// Selected category; narrows the table to it and its descendants.
    pub category: Option<u64>,
    pub panel: Panel,
    /// Recording path while the voice prompt is open.
    pub voice: Option<String>,
    pub voice_busy: bool,
}

impl InventoryPage {
    pub fn mount(net: &mut Net) -> Self {
        let mut page = Self {
            items: Phase::Loading,
            table: ListView::new(),
            categories: Vec::new(),
            tree: Vec::new(),
            tree_cursor: 0,
            category: None,
            panel: Panel::Items,
            voice: None,
            voice_busy: false,
        };
        page.load(net);
        page
    }

    fn load(&mut self, net: &mut Net) {
        self.items = Phase::Loading;
        let client = net.client();
        net.request(
            async move { client.list::<Item>().await },
            |page: &mut Self, result, _fx| {
                page.items = Phase::from_result(result.map(ChildList::root), "items");
            },
        );

        let client = net.client();
        net.request(
            async move { client.list::<Category>().await },
            |page: &mut Self, result, fx| match result {
                Ok(categories) => {
                    page.tree = flatten(&categories);
                    page.categories = categories;
                    page.tree_cursor = page.tree_cursor.min(page.tree.len().saturating_sub(1));
                }
                Err(err) => fx.toast(Toast::failure("Failed to fetch categories", &err)),
            },
        );
    }

    pub fn captures_input(&self) -> bool {
        self.voice.is_some() || self.table.is_typing()
    }

    fn allowed_categories(&self) -> Option<HashSet<u64>> {
        self.category.map(|id| descendants(&self.categories, id))
    }

    /// Rows as displayed: category narrowing, then the table's filter and sort.
    pub fn visible(&self) -> Vec<&Item> {
        let allowed = self.allowed_categories();
        let children = self.items.ready().map(ChildList::children).unwrap_or_default();
        self.table
            .visible(children.iter().filter(|item| in_category(item, allowed.as_ref())))
    }

    pub fn category_name(&self) -> Option<&str> {
        let id = self.category?;
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }

    pub fn handle_key(&mut self, key: KeyEvent, net: &mut Net, fx: &mut Effects) -> bool {
        if let Some(path) = self.voice.as_mut() {
            match key.code {
                KeyCode::Esc => self.voice = None,
                KeyCode::Enter => {
                    let path = path.trim().to_string();
                    self.voice = None;
                    if !path.is_empty() {
                        self.upload_voice(path, net, fx);
                    }
                }
                KeyCode::Backspace => {
                    path.pop();
                }
                KeyCode::Char(ch) => path.push(ch),
                _ => {}
            }
            return true;
        }

        match self.panel {
            Panel::Items => {
                let allowed = self.allowed_categories();
                let children = self.items.ready().map(ChildList::children).unwrap_or_default();
                let visible = self
                    .table
                    .visible(children.iter().filter(|item| in_category(item, allowed.as_ref())));
                match self.table.handle_key(key, &visible) {
                    Outcome::Consumed => return true,
                    Outcome::Event(event) => {
                        row_event(event, net, fx, Route::ItemDetail, inventory_rows);
                        return true;
                    }
                    Outcome::Ignored => {}
                }
            }
            Panel::Categories => {
                if self.category_key(key) {
                    return true;
                }
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.panel = match self.panel {
                    Panel::Items => Panel::Categories,
                    Panel::Categories => Panel::Items,
                };
            }
            KeyCode::Char('n') => fx.push(Route::ItemCreate),
            KeyCode::Char('v') if !self.voice_busy => self.voice = Some(String::new()),
            KeyCode::Char('r') => self.load(net),
            _ => return false,
        }
        true
    }

    fn category_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.tree_cursor = (self.tree_cursor + 1).min(self.tree.len().saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.tree_cursor = self.tree_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let Some(row) = self.tree.get(self.tree_cursor) else {
                    return true;
                };
                self.category = if self.category == Some(row.id) {
                    None
                } else {
                    Some(row.id)
                };
            }
            KeyCode::Char('c') => self.category = None,
            _ => return false,
        }
        true
    }

    fn upload_voice(&mut self, path: String, net: &mut Net, fx: &mut Effects) {
        self.voice_busy = true;
        fx.toast(Toast::info("Processing voice input..."));
        let client = net.client();
        net.request(
            async move { voice_add(&client, &path).await },
            |page: &mut Self, created: Option<Vec<Item>>, fx| {
                page.voice_busy = false;
                let Some(created) = created else {
                    fx.toast(Toast::error("Failed to process voice input."));
                    return;
                };
                let count = created.len();
                if let Some(items) = page.items.ready_mut() {
                    items.extend(created);
                }
                fx.toast(Toast::success(format!(
                    "Added {count} item(s) from voice input."
                )));
            },
        );
    }
}

fn inventory_rows(page: &mut InventoryPage) -> Option<&mut ChildList<Item>> {
    page.items.ready_mut()
}

fn in_category(item: &Item, allowed: Option<&HashSet<u64>>) -> bool {
    allowed.is_none_or(|set| item.category.is_some_and(|id| set.contains(&id)))
}

async fn voice_add(client: &Client, path: &str) -> Option<Vec<Item>> {
    let audio = match tokio::fs::read(path).await {
        Ok(audio) => audio,
        Err(err) => {
            tracing::warn!(%err, path, "cannot read recording");
            return None;
        }
    };
    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("recording.wav")
        .to_string();
    match client.voice_add_item(audio, file_name).await {
        Ok(items) => Some(items),
        Err(err) => {
            tracing::warn!(%err, "voice add failed");
            None
        }
    }
}
