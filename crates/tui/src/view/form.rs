//! Form-value records and payload building.
//!
//! A [`Form`] holds one string per field, exactly as typed. Conversion to a
//! JSON payload happens only on submit: creates strip empty fields so server
//! defaults apply, edits send every field with empty ones as `null`.

use api_types::{Amount, item::Item, location::Location, room::Room};
use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::client::{Payload, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
    /// Identifier picked from a candidate set; never typed.
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Payload key, `None` for fields that only steer other fields.
    pub wire: Option<&'static str>,
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            wire: Some(key),
        }
    }

    const fn local(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            wire: None,
        }
    }

    const fn wired(mut self, wire: &'static str) -> Self {
        self.wire = Some(wire);
        self
    }
}

pub const ROOM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::Text),
    FieldSpec::new("floor_level", "Floor level", FieldKind::Text),
];

pub const LOCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::Text),
];

pub const ROOM_KEY: &str = "room";
pub const LOCATION_KEY: &str = "location";

pub const ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::Text),
    FieldSpec::new("serial_number", "Serial number", FieldKind::Text),
    FieldSpec::new("purchase_date", "Purchase date", FieldKind::Date),
    FieldSpec::new("purchase_price", "Purchase price", FieldKind::Decimal),
    FieldSpec::new("current_value", "Current value", FieldKind::Decimal),
    FieldSpec::new("quantity", "Quantity", FieldKind::Integer),
    FieldSpec::new("notes", "Notes", FieldKind::Text),
    FieldSpec::local(ROOM_KEY, "Room", FieldKind::Choice),
    FieldSpec::local(LOCATION_KEY, "Location", FieldKind::Choice).wired("location"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    specs: &'static [FieldSpec],
    values: Vec<String>,
    focus: usize,
}

impl Form {
    pub fn blank(specs: &'static [FieldSpec]) -> Self {
        Self {
            specs,
            values: vec![String::new(); specs.len()],
            focus: 0,
        }
    }

    pub fn with_values<I>(specs: &'static [FieldSpec], values: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let mut form = Self::blank(specs);
        for (key, value) in values {
            form.set(key, value);
        }
        form
    }

    fn index(&self, key: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.key == key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &str)> {
        self.specs
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn get(&self, key: &str) -> &str {
        self.index(key)
            .map(|idx| self.values[idx].as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        if let Some(idx) = self.index(key) {
            self.values[idx] = value.into();
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&FieldSpec> {
        self.specs.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.specs.is_empty() {
            self.focus = (self.focus + 1) % self.specs.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.specs.is_empty() {
            self.focus = (self.focus + self.specs.len() - 1) % self.specs.len();
        }
    }

    /// Types into the focused field. Choice fields ignore typing.
    pub fn input(&mut self, ch: char) {
        if let Some(spec) = self.focused() {
            if spec.kind != FieldKind::Choice {
                self.values[self.focus].push(ch);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(spec) = self.focused() {
            if spec.kind != FieldKind::Choice {
                self.values[self.focus].pop();
            }
        }
    }

    pub fn choice(&self, key: &str) -> Option<u64> {
        self.get(key).trim().parse().ok()
    }

    pub fn set_choice(&mut self, key: &str, id: Option<u64>) {
        self.set(key, id.map(|id| id.to_string()).unwrap_or_default());
    }

    /// Steps through `[none, candidates..]`, wrapping at both ends.
    pub fn cycle_choice(&mut self, key: &str, candidates: &[u64], forward: bool) {
        let slots = candidates.len() + 1;
        let current = self
            .choice(key)
            .and_then(|id| candidates.iter().position(|c| *c == id))
            .map_or(0, |pos| pos + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let picked = next.checked_sub(1).map(|idx| candidates[idx]);
        self.set_choice(key, picked);
    }

    /// Payload for creates: empty fields are left out entirely.
    pub fn payload_without_empty(&self) -> Payload {
        self.fields()
            .filter_map(|(spec, raw)| {
                let wire = spec.wire?;
                (!raw.trim().is_empty()).then(|| (wire.to_string(), encode(spec.kind, raw)))
            })
            .collect()
    }

    /// Payload for edits: every wired field, empty ones as `null`.
    pub fn payload(&self) -> Payload {
        self.fields()
            .filter_map(|(spec, raw)| {
                let wire = spec.wire?;
                let value = if raw.trim().is_empty() {
                    Value::Null
                } else {
                    encode(spec.kind, raw)
                };
                Some((wire.to_string(), value))
            })
            .collect()
    }
}

/// Typed JSON for a raw field value. Values that do not parse are sent
/// verbatim so the backend reports them.
fn encode(kind: FieldKind, raw: &str) -> Value {
    let trimmed = raw.trim();
    let verbatim = || Value::String(raw.to_string());
    match kind {
        FieldKind::Text => verbatim(),
        FieldKind::Integer | FieldKind::Choice => {
            trimmed.parse::<i64>().map(Value::from).unwrap_or_else(|_| verbatim())
        }
        FieldKind::Decimal => trimmed
            .parse::<Amount>()
            .map(|amount| Value::String(amount.to_string()))
            .unwrap_or_else(|_| verbatim()),
        FieldKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|date| Value::String(date.to_string()))
            .unwrap_or_else(|_| verbatim()),
    }
}

/// A backend record that can be edited through a [`Form`].
pub trait Record: Resource + Clone {
    const FIELDS: &'static [FieldSpec];

    fn to_form(&self) -> Form;

    /// Mutable fields as written back when a table row is committed.
    fn to_payload(&self) -> Payload;
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn shown<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Record for Room {
    const FIELDS: &'static [FieldSpec] = ROOM_FIELDS;

    fn to_form(&self) -> Form {
        Form::with_values(
            Self::FIELDS,
            [
                ("name", self.name.clone()),
                ("description", text(&self.description)),
                ("floor_level", text(&self.floor_level)),
            ],
        )
    }

    fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("name".into(), json!(self.name));
        payload.insert("description".into(), json!(self.description));
        payload.insert("floor_level".into(), json!(self.floor_level));
        payload
    }
}

impl Record for Location {
    const FIELDS: &'static [FieldSpec] = LOCATION_FIELDS;

    fn to_form(&self) -> Form {
        Form::with_values(
            Self::FIELDS,
            [
                ("name", self.name.clone()),
                ("description", text(&self.description)),
            ],
        )
    }

    fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("name".into(), json!(self.name));
        payload.insert("description".into(), json!(self.description));
        payload.insert("room_id".into(), json!(self.room_id));
        payload
    }
}

impl Record for Item {
    const FIELDS: &'static [FieldSpec] = ITEM_FIELDS;

    fn to_form(&self) -> Form {
        Form::with_values(
            Self::FIELDS,
            [
                ("name", self.name.clone()),
                ("description", text(&self.description)),
                ("serial_number", text(&self.serial_number)),
                ("purchase_date", shown(self.purchase_date)),
                ("purchase_price", shown(self.purchase_price)),
                ("current_value", shown(self.current_value)),
                ("quantity", self.quantity.to_string()),
                ("notes", text(&self.notes)),
                (ROOM_KEY, shown(self.room_id)),
                (LOCATION_KEY, shown(self.location_id)),
            ],
        )
    }

    fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("name".into(), json!(self.name));
        payload.insert("description".into(), json!(self.description));
        payload.insert("serial_number".into(), json!(self.serial_number));
        payload.insert("purchase_date".into(), json!(self.purchase_date));
        payload.insert("purchase_price".into(), json!(self.purchase_price));
        payload.insert("current_value".into(), json!(self.current_value));
        payload.insert("quantity".into(), json!(self.quantity));
        payload.insert("notes".into(), json!(self.notes));
        payload.insert("location".into(), json!(self.location_id));
        payload
    }
}
