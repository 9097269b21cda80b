use std::sync::Arc;

use gallery_common::{Error, Result};
use gallery_db::gateway::Gateway;
use gallery_db::models::User;
use gallery_db::queries::users;

use super::verifier::{CredentialVerifier, PlaintextVerifier};

/// Registers users and checks their credentials.
///
/// Holds no state between calls beyond the gateway; every method acquires
/// its own connection and releases it before returning.
#[derive(Clone)]
pub struct AccountRepository {
    gateway: Gateway,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AccountRepository {
    /// Create a repository using plaintext credential comparison.
    pub fn new(gateway: Gateway) -> Self {
        Self::with_verifier(gateway, PlaintextVerifier)
    }

    /// Create a repository with a custom credential verifier.
    pub fn with_verifier<V: CredentialVerifier + 'static>(gateway: Gateway, verifier: V) -> Self {
        Self {
            gateway,
            verifier: Arc::new(verifier),
        }
    }

    /// Register a new user.
    ///
    /// Duplicate usernames are accepted and produce a separate record.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The new record with its store-assigned id
    /// * `Err(Error::Connection)` - If the store cannot be reached
    /// * `Err(Error::Database)` - If the insert fails
    pub fn register(&self, username: &str, password: &str) -> Result<User> {
        let conn = self.gateway.acquire()?;
        let user = users::create_user(&conn, username, password)?;

        tracing::info!(user_id = %user.id, username, "Registered user");
        Ok(user)
    }

    /// Check credentials and return the matching user record.
    ///
    /// When several records share the username, the oldest one whose
    /// password verifies is returned.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - Credentials match
    /// * `Ok(None)` - No record matches
    /// * `Err(Error)` - If the store cannot be queried
    pub fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let conn = self.gateway.acquire()?;
        let candidates = users::find_users_by_username(&conn, username)?;

        let user = candidates
            .into_iter()
            .find(|user| self.verifier.verify(password, &user.password));

        match &user {
            Some(user) => tracing::debug!(user_id = %user.id, username, "Credentials accepted"),
            None => tracing::warn!(username, "Credentials rejected"),
        }

        Ok(user)
    }

    /// Returns `true` iff a record with exactly these credentials exists.
    ///
    /// A store failure is reported as an error, never as `false`.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        Ok(self.login(username, password)?.is_some())
    }

    /// Look up the first user registered under `username`.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The oldest record with this username
    /// * `Err(Error::NotFound)` - If no user has this name
    pub fn find_user(&self, username: &str) -> Result<User> {
        let conn = self.gateway.acquire()?;
        users::find_users_by_username(&conn, username)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("user '{}'", username)))
    }
}
