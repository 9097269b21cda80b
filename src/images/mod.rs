//! Image upload, listing, and download.
//!
//! Payloads are stored in the database next to their metadata; this module
//! moves bytes between local files and the `images` table without touching
//! their content.

mod repository;

pub use repository::{Download, ImageRepository, NewImage};
