//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `path` rewrites request paths, `api` owns the HTTP client and the
//! auth-failure reset, and `types` defines the wire schema and errors.

pub mod api;
pub mod path;
pub mod types;

pub use api::ApiClient;
pub use path::{NormalizeRules, normalize_path};
pub use types::ApiError;
