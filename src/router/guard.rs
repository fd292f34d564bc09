//! Pre-navigation access check.
//!
//! DESIGN
//! ======
//! Evaluation is a pure function of (route metadata, credentials) so it can be
//! tested without a history stack. Denials are redirects, never errors.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::table::RouteTable;
use crate::state::session::Credentials;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Outcome of a single guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

impl RouteTable {
    /// Decide whether `target` may be entered with `creds`.
    ///
    /// Order matters: guest-only pages bounce a signed-in user first, then
    /// the token requirement is checked, then the role set.
    pub fn check(&self, target: &str, creds: &Credentials) -> Decision {
        let Some(route) = self.resolve(target) else {
            return Decision::Allow;
        };
        let access = &route.access;
        let authenticated = creds.is_authenticated();

        if authenticated && access.guest_only() {
            let home = creds.known_role().map_or(ROOT_PATH, |role| role.home());
            return Decision::Redirect(home.to_owned());
        }

        if !access.requires_auth() {
            return Decision::Allow;
        }

        if !authenticated {
            return Decision::Redirect(LOGIN_PATH.to_owned());
        }

        let roles = access.roles();
        if roles.is_empty() {
            return Decision::Allow;
        }
        match creds.known_role() {
            Some(role) if roles.contains(&role) => Decision::Allow,
            Some(role) => Decision::Redirect(role.home().to_owned()),
            None => Decision::Redirect(LOGIN_PATH.to_owned()),
        }
    }
}
