//! Common error types used throughout gallery.
//!
//! The variants follow the failure classes a caller has to tell apart:
//! the store could not be reached, a query failed, an upload source could
//! not be read, a download target could not be written, or a lookup found
//! nothing.

use std::path::PathBuf;

/// Common error type for gallery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store could not be opened (unreachable, bad path, no permission).
    #[error("Connection error: {0}")]
    Connection(String),

    /// A query or insert failed after the connection was established.
    #[error("Database error: {0}")]
    Database(String),

    /// The file to upload does not exist or cannot be read.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed, e.g. writing a downloaded image.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested record was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new Connection error.
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new FileNotFound error for the given source path.
    pub fn file_not_found<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::FileNotFound {
            path: path.into(),
            source,
        }
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this is the expected "no such record" outcome rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::connection("unable to open database file");
        assert_eq!(err.to_string(), "Connection error: unable to open database file");

        let err = Error::database("no such table: images");
        assert_eq!(err.to_string(), "Database error: no such table: images");

        let err = Error::not_found("image 9");
        assert_eq!(err.to_string(), "Not found: image 9");

        let err = Error::invalid_input("pool_size must be at least 1");
        assert_eq!(err.to_string(), "Invalid input: pool_size must be at least 1");
    }

    #[test]
    fn test_file_not_found_keeps_path_and_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::file_not_found("/tmp/nope.png", io_err);
        assert_eq!(err.to_string(), "File not found: /tmp/nope.png");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    // Exhaustive on purpose: a new variant must be placed in the taxonomy here.
    fn taxonomy(err: &Error) -> &'static str {
        match err {
            Error::Connection(_) => "ConnectionError",
            Error::Database(_) => "StoreError",
            Error::FileNotFound { .. } => "FileNotFoundError",
            Error::Io(_) => "IOError",
            Error::NotFound(_) => "NotFoundError",
            Error::InvalidInput(_) => "InvalidInput",
        }
    }

    #[test]
    fn test_every_variant_has_a_taxonomy_kind() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "x");
        let kinds: Vec<_> = [
            Error::connection("x"),
            Error::database("x"),
            Error::file_not_found("x", io()),
            Error::from(io()),
            Error::not_found("x"),
            Error::invalid_input("x"),
        ]
        .iter()
        .map(taxonomy)
        .collect();
        assert_eq!(
            kinds,
            [
                "ConnectionError",
                "StoreError",
                "FileNotFoundError",
                "IOError",
                "NotFoundError",
                "InvalidInput"
            ]
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("user").is_not_found());
        assert!(!Error::database("boom").is_not_found());
        assert!(!Error::connection("down").is_not_found());
    }
}
