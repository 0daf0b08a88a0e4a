//! Detail/edit state for one record: load, view, edit, save, delete.

use crate::client::{ClientError, ClientResult, Payload};

use super::capitalized;
use super::form::{Form, Record};
use super::toast::Toast;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<R> {
    Loading,
    NotFound,
    Failed(String),
    Ready(R),
}

impl<R> Phase<R> {
    /// `what` names the resource in the failure message, e.g. `"items"`.
    pub fn from_result(result: ClientResult<R>, what: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(ClientError::NotFound) => Self::NotFound,
            Err(err) => Self::Failed(format!("Failed to fetch {what}: {err}")),
        }
    }

    pub fn ready(&self) -> Option<&R> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut R> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailView<R> {
    id: u64,
    phase: Phase<R>,
    /// Present while editing.
    form: Option<Form>,
    confirm_delete: bool,
    saving: bool,
    deleting: bool,
}

impl<R: Record> DetailView<R> {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            phase: Phase::Loading,
            form: None,
            confirm_delete: false,
            saving: false,
            deleting: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> &Phase<R> {
        &self.phase
    }

    pub fn record(&self) -> Option<&R> {
        self.phase.ready()
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.form.as_mut()
    }

    pub fn is_busy(&self) -> bool {
        self.saving || self.deleting
    }

    pub fn confirm_pending(&self) -> bool {
        self.confirm_delete
    }

    pub fn loaded(&mut self, result: ClientResult<R>) {
        self.phase = Phase::from_result(result, &format!("{} details", R::NOUN));
    }

    /// Viewing -> Editing, with the form seeded from the current record.
    pub fn begin_edit(&mut self) -> bool {
        if self.is_editing() || self.confirm_delete {
            return false;
        }
        let Some(record) = self.record() else {
            return false;
        };
        self.form = Some(record.to_form());
        true
    }

    /// Editing -> Viewing; unsaved input is discarded.
    pub fn cancel_edit(&mut self) {
        if !self.saving {
            self.form = None;
        }
    }

    /// Update payload for the current form, or `None` if not editing or a
    /// save is already in flight.
    pub fn save_payload(&mut self) -> Option<Payload> {
        if self.saving {
            return None;
        }
        let payload = self.form.as_ref()?.payload();
        self.saving = true;
        Some(payload)
    }

    /// Reconciles a save. Success adopts the server's record and returns to
    /// viewing; failure stays in editing with the form untouched.
    pub fn saved(&mut self, result: ClientResult<R>) -> Toast {
        self.saving = false;
        match result {
            Ok(record) => {
                self.phase = Phase::Ready(record);
                self.form = None;
                Toast::success(format!("{} updated successfully.", capitalized(R::NOUN)))
            }
            Err(err) => Toast::failure(&format!("Failed to update {}", R::NOUN), &err),
        }
    }

    /// Opens the yes/no confirmation. Not available while editing.
    pub fn request_delete(&mut self) {
        if self.record().is_some() && !self.is_editing() && !self.deleting {
            self.confirm_delete = true;
        }
    }

    pub fn dismiss_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Answers "yes"; the caller issues the delete when this returns `true`.
    pub fn confirm_delete(&mut self) -> bool {
        if !self.confirm_delete {
            return false;
        }
        self.confirm_delete = false;
        self.deleting = true;
        true
    }

    /// `Ok` means the record is gone and the caller should navigate away.
    pub fn deleted(&mut self, result: ClientResult<()>) -> Result<Toast, Toast> {
        self.deleting = false;
        match result {
            Ok(()) => Ok(Toast::success(format!("{} deleted.", capitalized(R::NOUN)))),
            Err(err) => Err(Toast::failure(&format!("Failed to delete {}", R::NOUN), &err)),
        }
    }
}
