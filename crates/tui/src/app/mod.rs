mod dispatch;
pub mod pages;
pub mod route;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{self, AppAction},
    },
    view::toast::{Toast, ToastLevel},
};

use dispatch::{Effects, Nav, Net, Reply};
use pages::Page;
use route::Route;

const HISTORY_LIMIT: usize = 32;

#[derive(Debug)]
pub struct ActiveToast {
    pub toast: Toast,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub page: Page,
    pub toast: Option<ActiveToast>,
    /// Route prompt input while open (Ctrl+P).
    pub prompt: Option<String>,
    pub history: Vec<Route>,
    pub base_url: String,
    /// Requests spawned but not yet applied or dropped.
    pub pending: usize,
}

pub struct App {
    config: AppConfig,
    net: Net,
    replies: UnboundedReceiver<Reply>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, config.request_timeout())?;
        let (mut net, replies) = Net::new(client);

        let route = Route::parse(&config.start_route).unwrap_or_else(|| {
            warn!(route = %config.start_route, "unknown start route, opening inventory");
            Route::Inventory
        });
        net.next_ticket();
        let page = Page::mount(route, &mut net, &config);
        info!(%route, base_url = %config.base_url, "started");

        let state = AppState {
            route,
            page,
            toast: None,
            prompt: None,
            history: Vec::new(),
            base_url: config.base_url.clone(),
            pending: 0,
        };

        Ok(Self {
            config,
            net,
            replies,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::AppTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.drain_replies();
            self.tick(Instant::now());
            self.state.pending = self.net.in_flight();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn drain_replies(&mut self) {
        while let Ok(reply) = self.replies.try_recv() {
            self.apply_reply(reply);
        }
    }

    fn apply_reply(&mut self, reply: Reply) {
        self.net.received();
        if reply.ticket != self.net.ticket() {
            debug!(ticket = reply.ticket, current = self.net.ticket(), "stale reply dropped");
            return;
        }
        let mut fx = Effects::default();
        (reply.apply)(&mut self.state.page, &mut fx);
        self.apply_effects(fx);
    }

    /// Time-driven transitions: toast expiry and the post-create redirect.
    fn tick(&mut self, now: Instant) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|active| now >= active.expires_at)
        {
            self.state.toast = None;
        }

        let due = match &mut self.state.page {
            Page::ItemCreate(page) => page.due_redirect(now),
            _ => None,
        };
        if let Some(id) = due {
            self.navigate(Route::ItemDetail(id), false);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match keymap::map_control(key) {
            AppAction::Quit => {
                self.should_quit = true;
                return;
            }
            AppAction::TogglePrompt => {
                self.state.prompt = match self.state.prompt {
                    Some(_) => None,
                    None => Some(String::new()),
                };
                return;
            }
            AppAction::DismissToast => {
                self.state.toast = None;
                return;
            }
            _ => {}
        }

        if self.state.prompt.is_some() {
            self.prompt_key(key);
            return;
        }

        let mut fx = Effects::default();
        let handled = self.state.page.handle_key(key, &mut self.net, &mut fx);
        if !handled && !self.state.page.captures_input() {
            match keymap::map_global(key) {
                AppAction::Quit => self.should_quit = true,
                AppAction::Open(route) => fx.push(route),
                AppAction::Back => fx.back(),
                _ => {}
            }
        }
        self.apply_effects(fx);
    }

    fn prompt_key(&mut self, key: KeyEvent) {
        let Some(input) = self.state.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.prompt = None,
            KeyCode::Enter => {
                let input = input.trim().to_string();
                self.state.prompt = None;
                match Route::parse(&input) {
                    Some(route) => self.navigate(route, true),
                    None => self.show(Toast::error(format!("Unknown route: {input}"))),
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(ch) => input.push(ch),
            _ => {}
        }
    }

    fn apply_effects(&mut self, fx: Effects) {
        if let Some(toast) = fx.toast {
            self.show(toast);
        }
        match fx.nav {
            Some(Nav::Push(route)) => self.navigate(route, true),
            Some(Nav::Replace(route)) => self.navigate(route, false),
            Some(Nav::Back) => self.back(),
            None => {}
        }
    }

    fn show(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => warn!(message = %toast.message, "toast"),
            ToastLevel::Info | ToastLevel::Success => info!(message = %toast.message, "toast"),
        }
        self.state.toast = Some(ActiveToast {
            toast,
            expires_at: Instant::now() + self.config.toast_ttl(),
        });
    }

    /// Mounts `route`, invalidating replies addressed to the previous page.
    /// `remember` keeps the current route on the back stack.
    fn navigate(&mut self, route: Route, remember: bool) {
        if remember {
            self.state.history.push(self.state.route);
            if self.state.history.len() > HISTORY_LIMIT {
                self.state.history.remove(0);
            }
        }
        let ticket = self.net.next_ticket();
        self.state.page = Page::mount(route, &mut self.net, &self.config);
        info!(from = %self.state.route, to = %route, ticket, "navigate");
        self.state.route = route;
    }

    fn back(&mut self) {
        match self.state.history.pop() {
            Some(route) => self.navigate(route, false),
            None if self.state.route != Route::Inventory => {
                self.navigate(Route::Inventory, false);
            }
            None => {}
        }
    }

    /// Applies replies until nothing is in flight.
    #[cfg(test)]
    async fn settle(&mut self) {
        while self.net.in_flight() > 0 {
            match tokio::time::timeout(Duration::from_secs(5), self.replies.recv()).await {
                Ok(Some(reply)) => self.apply_reply(reply),
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use api_types::item::Item;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::{Value, json};

    use super::*;
    use crate::client::Payload;
    use crate::testing::StubServer;

    async fn open(server: &StubServer, route: &str) -> App {
        let config = AppConfig {
            base_url: server.base_url.clone(),
            start_route: route.to_string(),
            redirect_delay_ms: 50,
            ..AppConfig::default()
        };
        let mut app = App::new(config).unwrap();
        app.settle().await;
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn toast(app: &App) -> Option<&Toast> {
        app.state.toast.as_ref().map(|active| &active.toast)
    }

    #[tokio::test]
    async fn create_item_then_redirect_to_its_detail() {
        let server = StubServer::start().await;
        let garage = server.seed_room("Garage");
        let shelf = server.seed_location(garage, "Shelf A");
        let mut app = open(&server, "/items/new").await;

        type_text(&mut app, "Drill");
        for _ in 0..8 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        app.settle().await;

        assert_eq!(
            server.last_body("POST", "/api/items/"),
            Some(json!({"name": "Drill", "location": shelf}))
        );
        assert_eq!(toast(&app).unwrap().message, "Item created successfully.");
        assert_eq!(app.state.route, Route::ItemCreate);

        app.tick(Instant::now() + Duration::from_secs(1));
        let Route::ItemDetail(id) = app.state.route else {
            panic!("expected item detail, got {}", app.state.route);
        };
        app.settle().await;

        let Page::ItemDetail(page) = &app.state.page else {
            panic!("item detail page not mounted");
        };
        let item = page.view.record().unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.name, "Drill");
        assert_eq!(item.location_name.as_deref(), Some("Shelf A"));
        assert_eq!(item.room_name.as_deref(), Some("Garage"));
    }

    #[tokio::test]
    async fn second_submit_is_ignored_while_creating() {
        let server = StubServer::start().await;
        let mut app = open(&server, "/items/new").await;

        type_text(&mut app, "Tape");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        app.settle().await;

        assert_eq!(server.count("POST", "/api/items/"), 1);
    }

    #[tokio::test]
    async fn changing_room_clears_location_on_save() {
        let server = StubServer::start().await;
        let garage = server.seed_room("Garage");
        server.seed_room("Attic");
        let shelf = server.seed_location(garage, "Shelf A");
        let drill = server.seed_item(Some(shelf), "Drill");
        let mut app = open(&server, &format!("/items/{drill}")).await;

        press(&mut app, KeyCode::Char('e'));
        for _ in 0..8 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        app.settle().await;

        let body = server
            .last_body("PATCH", &format!("/api/items/{drill}/"))
            .unwrap();
        assert_eq!(body["location"], Value::Null);
        assert_eq!(body["name"], json!("Drill"));

        let Page::ItemDetail(page) = &app.state.page else {
            panic!("item detail page not mounted");
        };
        assert!(!page.view.is_editing());
        assert_eq!(page.view.record().unwrap().location_id, None);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_edit_open() {
        let server = StubServer::start().await;
        let drill = server.seed_item(None, "Drill");
        server.with_catalog(|catalog| catalog.fail_updates = true);
        let mut app = open(&server, &format!("/items/{drill}")).await;

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, " press");
        press(&mut app, KeyCode::Enter);
        app.settle().await;

        assert_eq!(server.count("PATCH", &format!("/api/items/{drill}/")), 1);
        let Page::ItemDetail(page) = &app.state.page else {
            panic!("item detail page not mounted");
        };
        assert!(page.view.is_editing());
        assert_eq!(page.view.form().unwrap().get("name"), "Drill press");
        assert_eq!(page.view.record().unwrap().name, "Drill");
        let toast = toast(&app).unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "Failed to update item: Database unavailable");
    }

    #[tokio::test]
    async fn room_inventory_narrows_by_location() {
        let server = StubServer::start().await;
        let garage = server.seed_room("Garage");
        let shelf = server.seed_location(garage, "Shelf A");
        let bench = server.seed_location(garage, "Bench");
        server.seed_item(Some(shelf), "Drill");
        server.seed_item(Some(bench), "Vise");
        server.seed_item(Some(bench), "Clamp");
        let mut app = open(&server, &format!("/rooms/{garage}/inventory")).await;

        let names = |app: &App| {
            let Page::RoomInventory(page) = &app.state.page else {
                panic!("room inventory page not mounted");
            };
            let mut names = page
                .visible()
                .iter()
                .map(|item| item.name.clone())
                .collect::<Vec<_>>();
            names.sort();
            names
        };
        assert_eq!(names(&app), ["Clamp", "Drill", "Vise"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), ["Drill"]);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), ["Clamp", "Vise"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), ["Clamp", "Drill", "Vise"]);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state.route, Route::RoomDetail(garage));
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_row() {
        let server = StubServer::start().await;
        server.seed_item(None, "Drill");
        server.with_catalog(|catalog| catalog.fail_deletes = true);
        let mut app = open(&server, "/").await;

        press(&mut app, KeyCode::Char('x'));
        app.settle().await;

        let Page::Inventory(page) = &app.state.page else {
            panic!("inventory page not mounted");
        };
        assert_eq!(page.visible().len(), 1);
        let toast = toast(&app).unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.starts_with("Failed to delete item"));
    }

    #[tokio::test]
    async fn refused_location_delete_stays_on_the_page() {
        let server = StubServer::start().await;
        let garage = server.seed_room("Garage");
        let shelf = server.seed_location(garage, "Shelf A");
        server.seed_item(Some(shelf), "Drill");
        server.with_catalog(|catalog| catalog.block_location_delete_with_items = true);
        let mut app = open(&server, &format!("/locations/{shelf}")).await;

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        app.settle().await;

        assert_eq!(
            toast(&app).unwrap().message,
            "Failed to delete location: Location still holds items"
        );
        assert_eq!(app.state.route, Route::LocationDetail(shelf));
    }

    #[tokio::test]
    async fn deleting_a_room_returns_to_the_room_list() {
        let server = StubServer::start().await;
        let garage = server.seed_room("Garage");
        let mut app = open(&server, "/rooms").await;
        app.navigate(Route::RoomDetail(garage), true);
        app.settle().await;

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        app.settle().await;

        assert_eq!(app.state.route, Route::Rooms);
        assert_eq!(toast(&app).unwrap().message, "Room deleted.");
        // The deleted room is not on the back stack.
        assert_eq!(app.state.history, vec![Route::Rooms]);
    }

    #[tokio::test]
    async fn replies_for_a_left_page_are_dropped() {
        let server = StubServer::start().await;
        let first = server.seed_item(None, "Drill");
        let second = server.seed_item(None, "Saw");
        let mut app = open(&server, "/").await;

        app.navigate(Route::ItemDetail(first), true);
        app.navigate(Route::ItemDetail(second), true);
        app.settle().await;

        let Page::ItemDetail(page) = &app.state.page else {
            panic!("item detail page not mounted");
        };
        assert_eq!(page.view.record().unwrap().name, "Saw");
        assert_eq!(app.net.in_flight(), 0);
    }

    #[tokio::test]
    async fn voice_recording_adds_items() {
        let server = StubServer::start().await;
        server.seed_item(None, "Drill");
        let path = std::env::temp_dir().join(format!("voice-{}.wav", std::process::id()));
        std::fs::write(&path, b"RIFF0000WAVE").unwrap();
        let mut app = open(&server, "/").await;

        press(&mut app, KeyCode::Char('v'));
        type_text(&mut app, &path.to_string_lossy());
        press(&mut app, KeyCode::Enter);
        app.settle().await;
        std::fs::remove_file(&path).ok();

        let Page::Inventory(page) = &app.state.page else {
            panic!("inventory page not mounted");
        };
        let names: Vec<&str> = page.visible().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Drill", "Transcribed item"]);
        assert_eq!(
            toast(&app).unwrap().message,
            "Added 1 item(s) from voice input."
        );
    }

    #[tokio::test]
    async fn adding_from_a_location_forces_the_parent() {
        let server = StubServer::start().await;
        let garage = server.seed_room("Garage");
        let shelf = server.seed_location(garage, "Shelf A");
        let mut app = open(&server, &format!("/locations/{shelf}")).await;

        press(&mut app, KeyCode::Char('a'));
        app.settle().await;

        assert_eq!(
            server.last_body("POST", "/api/items/"),
            Some(json!({"name": "New Item", "quantity": 1, "location": shelf}))
        );
        let Page::LocationDetail(page) = &app.state.page else {
            panic!("location detail page not mounted");
        };
        assert_eq!(page.items.len(), 1);
        assert_eq!(toast(&app).unwrap().message, "Item added.");
    }

    #[tokio::test]
    async fn inline_cell_edit_patches_the_row() {
        let server = StubServer::start().await;
        let id = server.seed_item(None, "Hamer");
        let mut app = open(&server, "/").await;

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('c'));
        for _ in 0.."Hamer".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "Hammer");
        press(&mut app, KeyCode::Enter);
        app.settle().await;

        let body = server
            .last_body("PATCH", &format!("/api/items/{id}/"))
            .unwrap();
        assert_eq!(body["name"], json!("Hammer"));
        let Page::Inventory(page) = &app.state.page else {
            panic!("inventory page not mounted");
        };
        assert_eq!(page.visible()[0].name, "Hammer");
    }

    #[tokio::test]
    async fn category_selection_narrows_inventory() {
        let server = StubServer::start().await;
        let tools = server.seed_category("Tools", None);
        let power = server.seed_category("Power tools", Some(tools));
        let drill = server.seed_item(None, "Drill");
        server.seed_item(None, "Sock");
        let mut category = Payload::new();
        category.insert("category".into(), json!(power));
        server
            .client()
            .patch::<Item>(drill, &category)
            .await
            .unwrap();
        let mut app = open(&server, "/").await;

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        let Page::Inventory(page) = &app.state.page else {
            panic!("inventory page not mounted");
        };
        assert_eq!(page.category_name(), Some("Tools"));
        let names: Vec<&str> = page.visible().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Drill"]);
    }

    #[tokio::test]
    async fn prompt_opens_routes_and_rejects_unknown_ones() {
        let server = StubServer::start().await;
        let mut app = open(&server, "/").await;

        app.handle_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        type_text(&mut app, "/rooms");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.route, Route::Rooms);
        assert_eq!(app.state.history, vec![Route::Inventory]);

        app.handle_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        type_text(&mut app, "/garden");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.route, Route::Rooms);
        assert_eq!(toast(&app).unwrap().message, "Unknown route: /garden");

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.state.route, Route::Inventory);
    }

    #[tokio::test]
    async fn toast_expires_after_its_ttl() {
        let server = StubServer::start().await;
        let mut app = open(&server, "/").await;
        app.show(Toast::success("Saved."));

        app.tick(Instant::now());
        assert!(app.state.toast.is_some());
        app.tick(Instant::now() + app.config.toast_ttl() + Duration::from_millis(1));
        assert!(app.state.toast.is_none());
    }

    #[tokio::test]
    async fn every_page_renders() {
        let server = StubServer::start().await;
        let garage = server.seed_room("Garage");
        let shelf = server.seed_location(garage, "Shelf A");
        let drill = server.seed_item(Some(shelf), "Drill");
        server.seed_category("Tools", None);
        let mut app = open(&server, "/").await;
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        let routes = [
            Route::Inventory,
            Route::Rooms,
            Route::RoomDetail(garage),
            Route::RoomInventory(garage),
            Route::LocationDetail(shelf),
            Route::ItemDetail(drill),
            Route::ItemCreate,
            Route::ItemDetail(9999),
        ];
        for route in routes {
            app.navigate(route, true);
            terminal
                .draw(|frame| ui::render(frame, &app.state))
                .unwrap();
            app.settle().await;
            app.show(Toast::info("Rendering"));
            app.state.prompt = Some("/rooms".to_string());
            terminal
                .draw(|frame| ui::render(frame, &app.state))
                .unwrap();
            app.state.prompt = None;
        }
    }
}
