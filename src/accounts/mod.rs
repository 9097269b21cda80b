//! User account registration and credential checks.
//!
//! [`AccountRepository`] is the only entry point; how a supplied password is
//! compared with the stored one is delegated to a [`CredentialVerifier`].

mod repository;
mod verifier;

pub use repository::AccountRepository;
pub use verifier::{CredentialVerifier, PlaintextVerifier};
