//! Static route table: path → page + access metadata.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::borrow::Cow;
use std::fmt;

use crate::state::session::Role;

/// Pages the application can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Register,
    Classes,
    MyClasses,
    TrainerClasses,
    Trainers,
    Rooms,
    Attendances,
    Payments,
    Analytics,
    NotFound,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Classes => "Classes",
            Self::MyClasses => "MyClasses",
            Self::TrainerClasses => "TrainerClasses",
            Self::Trainers => "Trainers",
            Self::Rooms => "Rooms",
            Self::Attendances => "Attendances",
            Self::Payments => "Payments",
            Self::Analytics => "Analytics",
            Self::NotFound => "NotFound",
        };
        f.write_str(name)
    }
}

/// Who may open a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Anyone. `guest_only` pages (login, register) bounce signed-in users.
    Public { guest_only: bool },
    /// Gated on a token and, when `roles` is non-empty, on the stored role.
    Protected { requires_auth: bool, roles: Vec<Role> },
}

impl Access {
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Protected { requires_auth: true, .. })
    }

    pub fn guest_only(&self) -> bool {
        matches!(self, Self::Public { guest_only: true })
    }

    /// Allowed roles, empty when any authenticated user may enter.
    pub fn roles(&self) -> &[Role] {
        match self {
            Self::Protected { roles, .. } => roles.as_slice(),
            Self::Public { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub alias: Option<&'static str>,
    pub page: Page,
    pub access: Access,
}

impl RouteDescriptor {
    fn public(path: &'static str, page: Page) -> Self {
        Self { path, alias: None, page, access: Access::Public { guest_only: false } }
    }

    fn guest(path: &'static str, alias: &'static str, page: Page) -> Self {
        Self { path, alias: Some(alias), page, access: Access::Public { guest_only: true } }
    }

    fn protected(path: &'static str, alias: &'static str, page: Page, roles: &[Role]) -> Self {
        Self {
            path,
            alias: Some(alias),
            page,
            access: Access::Protected { requires_auth: true, roles: roles.to_vec() },
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.path == path || self.alias == Some(path)
    }
}

/// Anchor a navigation target at the root, so `payments` means `/payments`.
pub fn absolute(target: &str) -> Cow<'_, str> {
    if target.starts_with('/') { Cow::Borrowed(target) } else { Cow::Owned(format!("/{target}")) }
}

/// Strip `?query` and `#fragment` from a navigation target.
pub fn route_path(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

/// Immutable lookup table built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    /// The application's route table.
    pub fn standard() -> Self {
        use Role::{Admin, Member, Trainer};

        Self {
            routes: vec![
                RouteDescriptor::public("/", Page::Home),
                RouteDescriptor::guest("/login", "/login/", Page::Login),
                RouteDescriptor::guest("/register", "/register/", Page::Register),
                RouteDescriptor::protected("/classes", "/classes/", Page::Classes, &[]),
                RouteDescriptor::protected("/my-classes", "/my-classes/", Page::MyClasses, &[Member]),
                RouteDescriptor::protected("/trainer-classes", "/trainer-classes/", Page::TrainerClasses, &[Trainer]),
                RouteDescriptor::protected("/trainers", "/trainers/", Page::Trainers, &[Admin]),
                RouteDescriptor::protected("/rooms", "/rooms/", Page::Rooms, &[Admin]),
                RouteDescriptor::protected("/attendances", "/attendances/", Page::Attendances, &[Admin, Trainer]),
                RouteDescriptor::protected("/payments", "/payments/", Page::Payments, &[Admin]),
                RouteDescriptor::protected("/analytics", "/analytics/", Page::Analytics, &[Admin]),
            ],
        }
    }

    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Look up the descriptor for a navigation target. Query and fragment
    /// are ignored.
    pub fn resolve(&self, target: &str) -> Option<&RouteDescriptor> {
        let target = absolute(target);
        let path = route_path(&target);
        self.routes.iter().find(|route| route.matches(path))
    }

    pub fn page_for(&self, target: &str) -> Page {
        self.resolve(target).map_or(Page::NotFound, |route| route.page)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }
}
