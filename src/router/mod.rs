//! Client-side routing with role-based guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! `table` is the static path → page map, `guard` decides allow/redirect for
//! one target, and `history` tracks the current location and follows guard
//! redirects to a resting place.

pub mod guard;
pub mod history;
pub mod table;

pub use guard::Decision;
pub use history::{History, Navigate};
pub use table::{Access, Page, RouteDescriptor, RouteTable};
