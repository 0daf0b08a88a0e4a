use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crate::client::{ClientResult, Payload};

use super::capitalized;
use super::form::{Form, Record};
use super::toast::Toast;

/// Blank form for a new record. After a successful create the view holds a
/// redirect that becomes due once the notification had time to be read.
#[derive(Debug, Clone)]
pub struct CreateView<R> {
    form: Form,
    submitting: bool,
    redirect: Option<(Instant, u64)>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Default for CreateView<R> {
    fn default() -> Self {
        Self {
            form: Form::blank(R::FIELDS),
            submitting: false,
            redirect: None,
            _record: PhantomData,
        }
    }
}

impl<R: Record> CreateView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Identifier of the created record while the redirect is pending.
    pub fn pending_redirect(&self) -> Option<u64> {
        self.redirect.map(|(_, id)| id)
    }

    /// Create payload with empty fields stripped. `None` while a submit or
    /// redirect is already underway.
    pub fn submit(&mut self) -> Option<Payload> {
        if self.submitting || self.redirect.is_some() {
            return None;
        }
        self.submitting = true;
        Some(self.form.payload_without_empty())
    }

    pub fn created(&mut self, result: ClientResult<R>, now: Instant, delay: Duration) -> Toast {
        self.submitting = false;
        match result {
            Ok(record) => {
                self.redirect = Some((now + delay, record.id()));
                Toast::success(format!("{} created successfully.", capitalized(R::NOUN)))
            }
            Err(err) => Toast::failure(&format!("Failed to create {}", R::NOUN), &err),
        }
    }

    /// Takes the redirect target once its delay has elapsed.
    pub fn due_redirect(&mut self, now: Instant) -> Option<u64> {
        match self.redirect {
            Some((at, id)) if now >= at => {
                self.redirect = None;
                Some(id)
            }
            _ => None,
        }
    }
}
