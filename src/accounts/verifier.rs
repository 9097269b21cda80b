//! Credential verification strategies.

/// Decides whether a supplied password matches the stored credential.
///
/// Swapping the implementation (e.g. for a hashing scheme) leaves the
/// repository contract unchanged.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `true` if `supplied` matches the `stored` credential.
    fn verify(&self, supplied: &str, stored: &str) -> bool;
}

/// Exact, case-sensitive, byte-for-byte comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, supplied: &str, stored: &str) -> bool {
        supplied.as_bytes() == stored.as_bytes()
    }
}
