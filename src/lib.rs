//! # gym-client
//!
//! Client-side core of the gym class-management app: a REST client that
//! normalizes collection paths and resets the session on 401, and a route
//! table with role-based navigation guards.
//!
//! The session (token, username, role) is an explicit `Session` handle shared
//! by `net::ApiClient` and `router::History`; nothing reads global state.

pub mod config;
pub mod net;
pub mod router;
pub mod state;
