//! Stateful navigator that runs the guard on every move.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plays the part of the browser history stack. The request client holds it
//! behind the `Navigate` trait so a 401 can force `/login` through the same
//! guard as a user-initiated navigation.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::sync::Mutex;

use super::guard::{Decision, ROOT_PATH};
use super::table::{Page, RouteTable, absolute};
use crate::state::session::Session;

/// Upper bound on chained guard redirects for one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Something that can move the user to another page.
pub trait Navigate: Send + Sync {
    /// Navigate to `target` and return the location finally reached.
    fn navigate(&self, target: &str) -> String;
}

/// Current location plus the table and session the guard reads.
#[derive(Debug)]
pub struct History {
    table: RouteTable,
    session: Session,
    location: Mutex<String>,
}

impl History {
    pub fn new(table: RouteTable, session: Session) -> Self {
        Self { table, session, location: Mutex::new(ROOT_PATH.to_owned()) }
    }

    pub fn location(&self) -> String {
        self.location.lock().map_or_else(|_| ROOT_PATH.to_owned(), |loc| loc.clone())
    }

    pub fn current_page(&self) -> Page {
        self.table.page_for(&self.location())
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Run the guard from `target`, following redirects, without moving.
    pub fn resolve(&self, target: &str) -> String {
        let creds = self.session.credentials();
        let mut current = absolute(target).into_owned();
        for _ in 0..MAX_REDIRECTS {
            match self.table.check(&current, &creds) {
                Decision::Allow => return current,
                Decision::Redirect(next) => {
                    tracing::debug!(from = %current, to = %next, "navigation redirected");
                    current = next;
                }
            }
        }
        tracing::warn!(%target, stopped_at = %current, "redirect limit reached");
        current
    }
}

impl Navigate for History {
    fn navigate(&self, target: &str) -> String {
        let reached = self.resolve(target);
        if let Ok(mut location) = self.location.lock() {
            *location = reached.clone();
        }
        reached
    }
}
