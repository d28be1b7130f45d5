//! Application state store.
//!
//! Holds the state the views share (theme, notice banner, resolved PDS,
//! record validity). Readers take snapshots or subscribe to changes; view
//! writers must present the [`ViewTicket`] they were issued, so a view that
//! has been navigated away from cannot overwrite the state of its successor.

use crate::verify::Validity;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Point-in-time copy of the shared state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ViewSnapshot {
    /// Current theme.
    pub theme: Theme,
    /// Notice banner; empty when nothing to report.
    pub notice: String,
    /// Serving endpoint of the repository on screen.
    pub pds: Option<String>,
    /// Validity of the record on screen.
    pub validity: Validity,
}

/// Identifies one mounted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    generation: u64,
}

/// Shared state store with change notification.
pub struct AppState {
    tx: watch::Sender<ViewSnapshot>,
    active: AtomicU64,
}

impl AppState {
    /// Creates the store with an initial theme.
    pub fn new(theme: Theme) -> Self {
        let (tx, _rx) = watch::channel(ViewSnapshot {
            theme,
            ..Default::default()
        });
        Self {
            tx,
            active: AtomicU64::new(0),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.tx.subscribe()
    }

    /// Switches the theme and returns the new one.
    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::Light;
        self.tx.send_modify(|s| {
            s.theme = s.theme.toggled();
            theme = s.theme;
        });
        theme
    }

    /// Mounts a new view: invalidates earlier tickets, clears the notice and
    /// resets validity.
    pub fn begin_view(&self) -> ViewTicket {
        let generation = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_modify(|s| {
            s.notice.clear();
            s.validity = Validity::Unknown;
        });
        ViewTicket { generation }
    }

    /// True while `ticket` belongs to the mounted view.
    pub fn is_active(&self, ticket: ViewTicket) -> bool {
        self.active.load(Ordering::SeqCst) == ticket.generation
    }

    /// Sets the notice banner. Returns false if the ticket is stale.
    pub fn set_notice(&self, ticket: ViewTicket, notice: impl Into<String>) -> bool {
        let notice = notice.into();
        self.write(ticket, |s| s.notice = notice)
    }

    /// Sets the serving endpoint on screen. Returns false if the ticket is stale.
    pub fn set_pds(&self, ticket: ViewTicket, pds: Option<String>) -> bool {
        self.write(ticket, |s| s.pds = pds)
    }

    /// Sets the record validity. Returns false if the ticket is stale.
    pub fn set_validity(&self, ticket: ViewTicket, validity: Validity) -> bool {
        self.write(ticket, |s| s.validity = validity)
    }

    fn write(&self, ticket: ViewTicket, update: impl FnOnce(&mut ViewSnapshot)) -> bool {
        let mut accepted = false;
        self.tx.send_if_modified(|s| {
            if !self.is_active(ticket) {
                tracing::debug!(generation = ticket.generation, "dropping write from stale view");
                return false;
            }
            accepted = true;
            let before = s.clone();
            update(s);
            *s != before
        });
        accepted
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
