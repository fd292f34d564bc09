//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The request client reads the token to attach bearer auth and clears the
//! record on 401; route guards read token + role before every navigation.
//! Both receive the same `Session` handle instead of reaching for globals.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::storage::{MemoryStorage, Storage};

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const ROLE_KEY: &str = "role";

/// Roles recognized by the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trainer,
    Member,
}

impl Role {
    /// Parse a stored role string. Anything else is an unrecognized role.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "trainer" => Some(Self::Trainer),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Trainer => "trainer",
            Self::Member => "member",
        }
    }

    /// Landing page for this role.
    pub fn home(self) -> &'static str {
        match self {
            Self::Admin => "/analytics",
            Self::Trainer => "/trainer-classes",
            Self::Member => "/my-classes",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-in-time read of the credential record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub token: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl Credentials {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The stored role, if it is one the router knows.
    pub fn known_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Shared handle over the stored credential record.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("authenticated", &self.is_authenticated()).finish()
    }
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn username(&self) -> Option<String> {
        self.storage.get_item(USERNAME_KEY)
    }

    pub fn role(&self) -> Option<String> {
        self.storage.get_item(ROLE_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials { token: self.token(), username: self.username(), role: self.role() }
    }

    /// Store only the token; used mid-login before the role is known.
    pub fn set_token(&self, token: &str) {
        self.storage.set_item(TOKEN_KEY, token);
    }

    /// Write the full credential record after a successful login.
    pub fn establish(&self, token: &str, username: &str, role: &str) {
        self.storage.set_item(TOKEN_KEY, token);
        self.storage.set_item(USERNAME_KEY, username);
        self.storage.set_item(ROLE_KEY, role);
    }

    /// Remove token, username, and role.
    pub fn clear(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(USERNAME_KEY);
        self.storage.remove_item(ROLE_KEY);
    }
}
