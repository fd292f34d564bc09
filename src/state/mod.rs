//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `storage` is the raw key/value surface; `session` layers the credential
//! record (token, username, role) on top of it.

pub mod session;
pub mod storage;
