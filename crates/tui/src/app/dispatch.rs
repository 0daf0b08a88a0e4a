use std::future::Future;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::client::Client;
use crate::view::toast::Toast;

use super::pages::{Page, PageState};
use super::route::Route;

type Apply = Box<dyn FnOnce(&mut Page, &mut Effects) + Send>;

/// Completion of a spawned request, applied on the UI loop.
pub struct Reply {
    pub(super) ticket: u64,
    pub(super) apply: Apply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Push(Route),
    /// Leaves the current page out of the back stack, e.g. after a delete.
    Replace(Route),
    Back,
}

/// What a key press or reply asks of the shell besides page-local changes.
#[derive(Debug, Default)]
pub struct Effects {
    pub toast: Option<Toast>,
    pub nav: Option<Nav>,
}

impl Effects {
    pub fn toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    pub fn push(&mut self, route: Route) {
        self.nav = Some(Nav::Push(route));
    }

    pub fn replace(&mut self, route: Route) {
        self.nav = Some(Nav::Replace(route));
    }

    pub fn back(&mut self) {
        self.nav = Some(Nav::Back);
    }
}

/// Spawns requests and tags their replies with the ticket of the page that
/// issued them.
pub struct Net {
    client: Client,
    tx: UnboundedSender<Reply>,
    ticket: u64,
    in_flight: usize,
}

impl Net {
    pub fn new(client: Client) -> (Self, UnboundedReceiver<Reply>) {
        let (tx, rx) = unbounded_channel();
        let net = Self {
            client,
            tx,
            ticket: 0,
            in_flight: 0,
        };
        (net, rx)
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Invalidates every outstanding reply. Called on each navigation.
    pub(super) fn next_ticket(&mut self) -> u64 {
        self.ticket += 1;
        self.ticket
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(super) fn received(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Runs `future` off the UI loop; `apply` receives its output on the
    /// loop, but only if page `P` is still the mounted page.
    pub fn request<P, T, F, A>(&mut self, future: F, apply: A)
    where
        P: PageState,
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        A: FnOnce(&mut P, T, &mut Effects) + Send + 'static,
    {
        let tx = self.tx.clone();
        let ticket = self.ticket;
        self.in_flight += 1;
        tokio::spawn(async move {
            let output = future.await;
            let apply: Apply = Box::new(move |page, effects| {
                if let Some(page) = P::cast(page) {
                    apply(page, output, effects);
                }
            });
            if tx.send(Reply { ticket, apply }).is_err() {
                tracing::debug!(ticket, "ui loop gone, reply dropped");
            }
        });
    }
}
