//! In-process stand-in for the inventory REST service, used by tests.
//!
//! Serves the nested/denormalised read shapes the client expects and keeps
//! every record in memory. Knobs on [`Catalog`] make deletes or updates fail
//! so error paths can be exercised end to end.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Map, Value, json};

use crate::client::Client;

type Row = Map<String, Value>;
type Shared = Arc<Mutex<Catalog>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Rooms,
    Locations,
    Items,
}

impl Kind {
    fn segment(self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Locations => "locations",
            Self::Items => "items",
        }
    }

    fn writable(self) -> &'static [&'static str] {
        match self {
            Self::Rooms => &["name", "description", "floor_level"],
            Self::Locations => &["name", "description", "room_id"],
            Self::Items => &[
                "name",
                "description",
                "serial_number",
                "purchase_date",
                "purchase_price",
                "current_value",
                "quantity",
                "notes",
                "category",
                "location",
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    next_id: u64,
    rooms: BTreeMap<u64, Row>,
    locations: BTreeMap<u64, Row>,
    items: BTreeMap<u64, Row>,
    categories: Vec<Value>,
    pub block_location_delete_with_items: bool,
    pub fail_deletes: bool,
    pub fail_updates: bool,
    pub requests: Vec<Recorded>,
}

impl Catalog {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn table(&self, kind: Kind) -> &BTreeMap<u64, Row> {
        match kind {
            Kind::Rooms => &self.rooms,
            Kind::Locations => &self.locations,
            Kind::Items => &self.items,
        }
    }

    fn table_mut(&mut self, kind: Kind) -> &mut BTreeMap<u64, Row> {
        match kind {
            Kind::Rooms => &mut self.rooms,
            Kind::Locations => &mut self.locations,
            Kind::Items => &mut self.items,
        }
    }

    fn render(&self, kind: Kind, id: u64) -> Option<Value> {
        match kind {
            Kind::Rooms => self.render_room(id),
            Kind::Locations => self.render_location(id),
            Kind::Items => self.render_item(id),
        }
    }

    fn render_item(&self, id: u64) -> Option<Value> {
        let mut out = self.items.get(&id)?.clone();
        out.insert("id".into(), json!(id));
        let location_id = out.get("location").and_then(Value::as_u64);
        out.insert("location_id".into(), json!(location_id));
        if let Some(location) = location_id.and_then(|lid| self.locations.get(&lid)) {
            let room_id = location.get("room_id").and_then(Value::as_u64);
            out.insert("location_name".into(), location["name"].clone());
            out.insert("room_id".into(), json!(room_id));
            if let Some(room) = room_id.and_then(|rid| self.rooms.get(&rid)) {
                out.insert("room_name".into(), room["name"].clone());
            }
        }
        Some(Value::Object(out))
    }

    fn render_location(&self, id: u64) -> Option<Value> {
        let mut out = self.locations.get(&id)?.clone();
        out.insert("id".into(), json!(id));
        let items = self
            .items
            .iter()
            .filter(|(_, row)| row.get("location").and_then(Value::as_u64) == Some(id))
            .filter_map(|(item_id, _)| self.render_item(*item_id))
            .collect::<Vec<_>>();
        out.insert("items".into(), Value::Array(items));
        Some(Value::Object(out))
    }

    fn render_room(&self, id: u64) -> Option<Value> {
        let mut out = self.rooms.get(&id)?.clone();
        out.insert("id".into(), json!(id));
        let locations = self
            .locations
            .iter()
            .filter(|(_, row)| row.get("room_id").and_then(Value::as_u64) == Some(id))
            .filter_map(|(location_id, _)| self.render_location(*location_id))
            .collect::<Vec<_>>();
        out.insert("locations".into(), Value::Array(locations));
        Some(Value::Object(out))
    }

    fn validate(&self, kind: Kind, row: &Row) -> Result<(), Value> {
        let mut errors = Map::new();
        if !matches!(row.get("name"), Some(Value::String(s)) if !s.is_empty()) {
            errors.insert("name".into(), json!(["This field is required."]));
        }
        if kind == Kind::Items {
            if let Some(quantity) = row.get("quantity") {
                if !quantity.is_i64() {
                    errors.insert("quantity".into(), json!(["A valid integer is required."]));
                }
            }
            if let Some(location) = row.get("location").filter(|v| !v.is_null()) {
                let exists = location
                    .as_u64()
                    .is_some_and(|id| self.locations.contains_key(&id));
                if !exists {
                    errors.insert(
                        "location".into(),
                        json!([format!("Invalid pk \"{location}\" - object does not exist.")]),
                    );
                }
            }
        }
        if kind == Kind::Locations {
            let exists = row
                .get("room_id")
                .and_then(Value::as_u64)
                .is_some_and(|id| self.rooms.contains_key(&id));
            if !exists {
                errors.insert("room_id".into(), json!(["Invalid room."]));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Value::Object(errors))
        }
    }

    fn writable_subset(kind: Kind, body: &Row) -> Row {
        body.iter()
            .filter(|(key, _)| kind.writable().contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn create(&mut self, kind: Kind, body: Row) -> Response {
        let mut row = Self::writable_subset(kind, &body);
        if let Err(errors) = self.validate(kind, &row) {
            return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
        }
        if kind == Kind::Items && !row.contains_key("quantity") {
            row.insert("quantity".into(), json!(1));
        }
        let id = self.allocate();
        self.table_mut(kind).insert(id, row);
        (StatusCode::CREATED, Json(self.render(kind, id))).into_response()
    }

    fn write(&mut self, kind: Kind, id: u64, body: Row, partial: bool) -> Response {
        if self.fail_updates {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Database unavailable"})),
            )
                .into_response();
        }
        let Some(current) = self.table(kind).get(&id).cloned() else {
            return not_found();
        };
        let incoming = Self::writable_subset(kind, &body);
        let mut row = if partial {
            let mut merged = current;
            merged.extend(incoming);
            merged
        } else {
            let mut replaced = incoming;
            if kind == Kind::Locations && !replaced.contains_key("room_id") {
                replaced.insert("room_id".into(), current["room_id"].clone());
            }
            replaced
        };
        if let Err(errors) = self.validate(kind, &row) {
            return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
        }
        if kind == Kind::Items && !row.contains_key("quantity") {
            row.insert("quantity".into(), json!(1));
        }
        self.table_mut(kind).insert(id, row);
        Json(self.render(kind, id)).into_response()
    }

    fn delete(&mut self, kind: Kind, id: u64) -> Response {
        if self.fail_deletes {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Database unavailable"})),
            )
                .into_response();
        }
        if !self.table(kind).contains_key(&id) {
            return not_found();
        }
        match kind {
            Kind::Items => {
                self.items.remove(&id);
            }
            Kind::Locations => {
                let holds_items = self
                    .items
                    .values()
                    .any(|row| row.get("location").and_then(Value::as_u64) == Some(id));
                if holds_items && self.block_location_delete_with_items {
                    return (
                        StatusCode::CONFLICT,
                        Json(json!({"error": "Location still holds items"})),
                    )
                        .into_response();
                }
                self.locations.remove(&id);
                self.orphan_items(id);
            }
            Kind::Rooms => {
                self.rooms.remove(&id);
                let owned = self
                    .locations
                    .iter()
                    .filter(|(_, row)| row.get("room_id").and_then(Value::as_u64) == Some(id))
                    .map(|(lid, _)| *lid)
                    .collect::<Vec<_>>();
                for location in owned {
                    self.locations.remove(&location);
                    self.orphan_items(location);
                }
            }
        }
        StatusCode::NO_CONTENT.into_response()
    }

    fn orphan_items(&mut self, location: u64) {
        for row in self.items.values_mut() {
            if row.get("location").and_then(Value::as_u64) == Some(location) {
                row.insert("location".into(), Value::Null);
            }
        }
    }

    fn record(&mut self, method: &'static str, path: String, body: Option<Value>) {
        self.requests.push(Recorded { method, path, body });
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
}

fn resource_routes(router: Router<Shared>, kind: Kind) -> Router<Shared> {
    let collection = format!("/api/{}/", kind.segment());
    let member = format!("/api/{}/{{id}}/", kind.segment());

    router
        .route(
            &collection,
            get(move |State(catalog): State<Shared>| async move {
                let mut catalog = catalog.lock().unwrap();
                catalog.record("GET", format!("/api/{}/", kind.segment()), None);
                let ids = catalog.table(kind).keys().copied().collect::<Vec<_>>();
                let rows = ids
                    .into_iter()
                    .filter_map(|id| catalog.render(kind, id))
                    .collect::<Vec<_>>();
                Json(rows).into_response()
            })
            .post(
                move |State(catalog): State<Shared>, Json(body): Json<Row>| async move {
                    let mut catalog = catalog.lock().unwrap();
                    let path = format!("/api/{}/", kind.segment());
                    catalog.record("POST", path, Some(Value::Object(body.clone())));
                    catalog.create(kind, body)
                },
            ),
        )
        .route(
            &member,
            get(
                move |State(catalog): State<Shared>, Path(id): Path<u64>| async move {
                    let mut catalog = catalog.lock().unwrap();
                    catalog.record("GET", format!("/api/{}/{id}/", kind.segment()), None);
                    match catalog.render(kind, id) {
                        Some(value) => Json(value).into_response(),
                        None => not_found(),
                    }
                },
            )
            .put(
                move |State(catalog): State<Shared>,
                      Path(id): Path<u64>,
                      Json(body): Json<Row>| async move {
                    let mut catalog = catalog.lock().unwrap();
                    let path = format!("/api/{}/{id}/", kind.segment());
                    catalog.record("PUT", path, Some(Value::Object(body.clone())));
                    catalog.write(kind, id, body, false)
                },
            )
            .patch(
                move |State(catalog): State<Shared>,
                      Path(id): Path<u64>,
                      Json(body): Json<Row>| async move {
                    let mut catalog = catalog.lock().unwrap();
                    let path = format!("/api/{}/{id}/", kind.segment());
                    catalog.record("PATCH", path, Some(Value::Object(body.clone())));
                    catalog.write(kind, id, body, true)
                },
            )
            .delete(
                move |State(catalog): State<Shared>, Path(id): Path<u64>| async move {
                    let mut catalog = catalog.lock().unwrap();
                    catalog.record("DELETE", format!("/api/{}/{id}/", kind.segment()), None);
                    catalog.delete(kind, id)
                },
            ),
        )
}

async fn list_categories(State(catalog): State<Shared>) -> Response {
    let mut catalog = catalog.lock().unwrap();
    catalog.record("GET", "/api/categories/".to_string(), None);
    Json(catalog.categories.clone()).into_response()
}

async fn voice_add_item(State(catalog): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    let mut catalog = catalog.lock().unwrap();
    catalog.record("POST", "/api/voice-add-item/".to_string(), None);

    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));
    let has_audio = String::from_utf8_lossy(&body).contains("name=\"audio\"");
    if !is_multipart || !has_audio {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No audio file provided"})),
        )
            .into_response();
    }

    let id = catalog.allocate();
    let mut row = Row::new();
    row.insert("name".into(), json!("Transcribed item"));
    row.insert("quantity".into(), json!(2));
    catalog.items.insert(id, row);
    let created = catalog.render_item(id).into_iter().collect::<Vec<_>>();
    (StatusCode::CREATED, Json(created)).into_response()
}

pub struct StubServer {
    pub base_url: String,
    catalog: Shared,
}

impl StubServer {
    pub async fn start() -> Self {
        let catalog: Shared = Arc::default();
        let mut router = Router::new()
            .route("/api/categories/", get(list_categories))
            .route("/api/voice-add-item/", post(voice_add_item));
        for kind in [Kind::Rooms, Kind::Locations, Kind::Items] {
            router = resource_routes(router, kind);
        }
        let router = router.with_state(catalog.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/"),
            catalog,
        }
    }

    pub fn client(&self) -> Client {
        Client::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    pub fn with_catalog<T>(&self, f: impl FnOnce(&mut Catalog) -> T) -> T {
        f(&mut self.catalog.lock().unwrap())
    }

    pub fn seed_room(&self, name: &str) -> u64 {
        self.with_catalog(|catalog| {
            let id = catalog.allocate();
            let mut row = Row::new();
            row.insert("name".into(), json!(name));
            catalog.rooms.insert(id, row);
            id
        })
    }

    pub fn seed_location(&self, room: u64, name: &str) -> u64 {
        self.with_catalog(|catalog| {
            let id = catalog.allocate();
            let mut row = Row::new();
            row.insert("name".into(), json!(name));
            row.insert("room_id".into(), json!(room));
            catalog.locations.insert(id, row);
            id
        })
    }

    pub fn seed_item(&self, location: Option<u64>, name: &str) -> u64 {
        self.with_catalog(|catalog| {
            let id = catalog.allocate();
            let mut row = Row::new();
            row.insert("name".into(), json!(name));
            row.insert("quantity".into(), json!(1));
            row.insert("location".into(), json!(location));
            catalog.items.insert(id, row);
            id
        })
    }

    pub fn seed_category(&self, name: &str, parent: Option<u64>) -> u64 {
        self.with_catalog(|catalog| {
            let id = catalog.allocate();
            if let Some(parent) = parent {
                for category in &mut catalog.categories {
                    if category["id"] == json!(parent) {
                        if let Some(subs) = category["subcategories"].as_array_mut() {
                            subs.push(json!(id));
                        }
                    }
                }
            }
            catalog.categories.push(json!({
                "id": id,
                "name": name,
                "parent": parent,
                "subcategories": [],
            }));
            id
        })
    }

    /// Appends a category entry verbatim, bypassing the usual shape.
    pub fn seed_raw_category(&self, value: Value) {
        self.with_catalog(|catalog| catalog.categories.push(value));
    }

    /// Body of the most recent request matching `method` and `path`.
    pub fn last_body(&self, method: &str, path: &str) -> Option<Value> {
        self.with_catalog(|catalog| {
            catalog
                .requests
                .iter()
                .rev()
                .find(|r| r.method == method && r.path == path)
                .and_then(|r| r.body.clone())
        })
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.with_catalog(|catalog| {
            catalog
                .requests
                .iter()
                .filter(|r| r.method == method && r.path == path)
                .count()
        })
    }
}
