//! Database connection gateway.
//!
//! Every repository operation acquires one connection, uses it, and lets the
//! returned [`Lease`] drop before returning. By default a brand new SQLite
//! connection is opened per acquisition and closed on release; nothing is
//! kept open between calls.
//!
//! Deployments with concurrent callers opt into an r2d2 pool explicitly via
//! [`Gateway::pooled`] (or `pool_size` in the configuration). The direct mode
//! does no locking of its own and must not be shared across threads that
//! expect pool semantics.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gallery_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Default time SQLite waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tuning for how connections are opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOptions {
    /// Busy timeout applied to every connection.
    pub busy_timeout: Duration,
    /// Pool size. `None` opens a fresh connection per acquisition.
    pub pool_size: Option<u32>,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            pool_size: None,
        }
    }
}

#[derive(Clone)]
enum Backend {
    Direct { path: PathBuf, busy_timeout: Duration },
    Pooled { path: PathBuf, pool: DbPool },
}

/// Hands out database connections, one per operation.
///
/// Cloning is cheap: a direct gateway only holds the file path, a pooled one
/// shares the underlying pool.
#[derive(Clone)]
pub struct Gateway {
    backend: Backend,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("path", &self.path())
            .field("pooled", &self.is_pooled())
            .finish()
    }
}

impl Gateway {
    /// Open a gateway for the database file at `path`.
    ///
    /// This function will:
    /// - Create the SQLite database file if it doesn't exist
    /// - Choose direct or pooled acquisition from `options.pool_size`
    /// - Run pending database migrations on a bootstrap connection
    ///
    /// # Returns
    ///
    /// * `Ok(Gateway)` - Ready to hand out connections
    /// * `Err(Error::Connection)` - If the file cannot be opened
    /// * `Err(Error::Database)` - If a migration fails
    pub fn open<P: AsRef<Path>>(path: P, options: GatewayOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if options.pool_size == Some(0) {
            return Err(Error::invalid_input("pool size must be at least 1"));
        }

        // Only the bootstrap connection may create the file. Later
        // acquisitions fail instead of silently starting an empty store.
        {
            let conn = Connection::open(&path).map_err(|e| open_error(&path, e))?;
            configure(&conn, options.busy_timeout)
                .map_err(|e| Error::connection(format!("Failed to configure connection: {}", e)))?;
            migrations::run_migrations(&conn)?;
        }

        let backend = match options.pool_size {
            None => Backend::Direct {
                path,
                busy_timeout: options.busy_timeout,
            },
            Some(size) => {
                let busy_timeout = options.busy_timeout;
                let manager = SqliteConnectionManager::file(&path)
                    .with_flags(existing_file_flags())
                    .with_init(move |conn| configure(conn, busy_timeout));
                let pool = Pool::builder()
                    .max_size(size)
                    .connection_timeout(busy_timeout.max(Duration::from_secs(1)))
                    .build(manager)
                    .map_err(|e| {
                        Error::connection(format!("Failed to create connection pool: {}", e))
                    })?;
                Backend::Pooled { path, pool }
            }
        };

        let gateway = Self { backend };

        tracing::debug!(
            path = %gateway.path().display(),
            pooled = gateway.is_pooled(),
            "Database ready"
        );

        Ok(gateway)
    }

    /// Open a gateway that creates a new connection for every acquisition.
    pub fn direct<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, GatewayOptions::default())
    }

    /// Open a gateway backed by an r2d2 pool of `size` connections.
    pub fn pooled<P: AsRef<Path>>(path: P, size: u32) -> Result<Self> {
        Self::open(
            path,
            GatewayOptions {
                pool_size: Some(size),
                ..GatewayOptions::default()
            },
        )
    }

    /// Acquire a connection.
    ///
    /// The connection is released when the returned [`Lease`] is dropped.
    ///
    /// # Returns
    ///
    /// * `Ok(Lease)` - A usable connection
    /// * `Err(Error::Connection)` - If the database cannot be opened
    pub fn acquire(&self) -> Result<Lease> {
        let lease = match &self.backend {
            Backend::Direct { path, busy_timeout } => {
                let conn = Connection::open_with_flags(path, existing_file_flags())
                    .map_err(|e| open_error(path, e))?;
                configure(&conn, *busy_timeout).map_err(|e| {
                    Error::connection(format!("Failed to configure connection: {}", e))
                })?;
                Lease::Direct(conn)
            }
            Backend::Pooled { pool, .. } => {
                let conn = pool.get().map_err(|e| {
                    Error::connection(format!("Failed to get connection from pool: {}", e))
                })?;
                Lease::Pooled(conn)
            }
        };

        tracing::trace!("Connection acquired");
        Ok(lease)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        match &self.backend {
            Backend::Direct { path, .. } | Backend::Pooled { path, .. } => path,
        }
    }

    /// Whether connections come from a pool.
    pub fn is_pooled(&self) -> bool {
        matches!(self.backend, Backend::Pooled { .. })
    }
}

/// Open flags for a database file that must already exist.
fn existing_file_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

fn open_error(path: &Path, e: rusqlite::Error) -> Error {
    Error::connection(format!("Failed to open database {}: {}", path.display(), e))
}

fn configure(conn: &Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

/// A connection held for the duration of one operation.
pub enum Lease {
    /// Owned connection, closed on drop.
    Direct(Connection),
    /// Pooled connection, returned to the pool on drop.
    Pooled(PooledConnection),
}

impl Deref for Lease {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match self {
            Lease::Direct(conn) => conn,
            Lease::Pooled(conn) => &**conn,
        }
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        tracing::trace!("Connection released");
    }
}
