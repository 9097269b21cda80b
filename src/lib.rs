//! Gallery - multi-user image gallery backed by SQLite
//!
//! This library crate exposes the repositories, configuration, and the
//! interactive shell for use by the binary and integration tests.

pub mod accounts;
pub mod config;
pub mod images;
pub mod shell;
