//! Gallery-DB: database schema, migrations, and query operations
//!
//! This crate provides database functionality for gallery using SQLite
//! with rusqlite. By default every caller gets a freshly opened connection;
//! an r2d2 pool is available for deployments with concurrent callers.
//!
//! # Modules
//!
//! - `gateway` - Connection acquisition and release
//! - `migrations` - Database schema migrations
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```no_run
//! use gallery_db::gateway::Gateway;
//! use gallery_db::queries::users;
//!
//! let gateway = Gateway::direct("/var/lib/gallery/gallery.db").unwrap();
//! let conn = gateway.acquire().unwrap();
//!
//! let user = users::create_user(&conn, "alice", "pw1").unwrap();
//! println!("Created user {} with id {}", user.username, user.id);
//! ```

pub mod gateway;
pub mod migrations;
pub mod models;
pub mod queries;
