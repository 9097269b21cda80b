//! Gallery-Common: shared identifiers and error handling.
//!
//! This crate provides the small set of types used by every gallery crate:
//!
//! - **Typed IDs**: newtype wrappers over the store-generated integer keys
//! - **Error Handling**: the common error taxonomy and result alias
//!
//! # Examples
//!
//! ```
//! use gallery_common::{Error, ImageId, Result};
//!
//! let id = ImageId::from(7);
//! assert_eq!(id.get(), 7);
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::not_found("image 7"))
//! }
//! assert!(lookup().unwrap_err().is_not_found());
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
