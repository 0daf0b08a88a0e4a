use api_types::{location::Location, room::Room};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::client::Payload;
use crate::view::detail::DetailView;
use crate::view::form::{FieldKind, Form, LOCATION_KEY, ROOM_KEY, Record};
use crate::view::relations::{location_candidates, reconcile_location};

/// Candidate sets for the Room and Location selectors.
#[derive(Debug, Clone, Copy)]
pub struct Choices<'a> {
    pub rooms: &'a [Room],
    pub locations: &'a [Location],
}

impl<'a> Choices<'a> {
    /// Available once both candidate sets have loaded.
    pub fn from_loaded(rooms: Option<&'a [Room]>, locations: Option<&'a [Location]>) -> Option<Self> {
        Some(Self {
            rooms: rooms?,
            locations: locations?,
        })
    }

    pub fn room_name(&self, id: Option<u64>) -> Option<&'a str> {
        let id = id?;
        self.rooms
            .iter()
            .find(|room| room.id == id)
            .map(|room| room.name.as_str())
    }

    pub fn location_name(&self, id: Option<u64>) -> Option<&'a str> {
        let id = id?;
        self.locations
            .iter()
            .find(|location| location.id == id)
            .map(|location| location.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Submit,
    Cancel,
    Handled,
}

/// Shared key handling for every edit and create form.
pub fn form_key(form: &mut Form, key: KeyEvent, choices: Option<Choices<'_>>) -> FormKey {
    match key.code {
        KeyCode::Enter => return FormKey::Submit,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return FormKey::Submit;
        }
        KeyCode::Esc => return FormKey::Cancel,
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => cycle(form, choices, false),
        KeyCode::Right => cycle(form, choices, true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(ch) => form.input(ch),
        _ => {}
    }
    FormKey::Handled
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailKey {
    Save(Payload),
    Delete,
    Consumed,
    Ignored,
}

/// Keys shared by every detail page: the confirmation modal, the edit
/// form, `e` to edit and `d` to delete.
pub fn detail_key<R: Record>(
    view: &mut DetailView<R>,
    key: KeyEvent,
    choices: Option<Choices<'_>>,
) -> DetailKey {
    if view.confirm_pending() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if view.confirm_delete() {
                    return DetailKey::Delete;
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => view.dismiss_delete(),
            _ => {}
        }
        return DetailKey::Consumed;
    }
    if let Some(form) = view.form_mut() {
        match form_key(form, key, choices) {
            FormKey::Submit => {
                return view
                    .save_payload()
                    .map_or(DetailKey::Consumed, DetailKey::Save);
            }
            FormKey::Cancel => view.cancel_edit(),
            FormKey::Handled => {}
        }
        return DetailKey::Consumed;
    }
    match key.code {
        KeyCode::Char('e') => {
            view.begin_edit();
            DetailKey::Consumed
        }
        KeyCode::Char('d') => {
            view.request_delete();
            DetailKey::Consumed
        }
        _ => DetailKey::Ignored,
    }
}

fn cycle(form: &mut Form, choices: Option<Choices<'_>>, forward: bool) {
    let Some(spec) = form.focused().copied() else {
        return;
    };
    if spec.kind != FieldKind::Choice {
        return;
    }
    // Selectors stay inert until their candidates have loaded.
    let Some(choices) = choices else {
        return;
    };
    match spec.key {
        ROOM_KEY => {
            let ids: Vec<u64> = choices.rooms.iter().map(|room| room.id).collect();
            form.cycle_choice(ROOM_KEY, &ids, forward);
            if reconcile_location(form, choices.locations) {
                tracing::debug!("room changed, location cleared");
            }
        }
        LOCATION_KEY => {
            let ids: Vec<u64> = location_candidates(choices.locations, form.choice(ROOM_KEY))
                .iter()
                .map(|location| location.id)
                .collect();
            form.cycle_choice(LOCATION_KEY, &ids, forward);
        }
        _ => {}
    }
}
