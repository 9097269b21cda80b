//! Schema migrations.
//!
//! The schema version lives in SQLite's `user_version` header field. Each
//! entry of [`MIGRATIONS`] moves the schema up by one version and is applied
//! in its own transaction together with the version bump.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration to version {0} failed: {1}")]
    Failed(u32, rusqlite::Error),
}

impl From<MigrationError> for gallery_common::Error {
    fn from(err: MigrationError) -> Self {
        gallery_common::Error::database(err.to_string())
    }
}

/// Migration `i` brings the schema to version `i + 1`.
const MIGRATIONS: &[&str] = &[include_str!("001_initial.sql")];

/// Apply every migration newer than the database's `user_version`.
///
/// Returns the number of migrations applied; zero when already current.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    let mut applied = 0;
    for (version, sql) in (1u32..).zip(MIGRATIONS).skip(current as usize) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .and_then(|_| tx.pragma_update(None, "user_version", version))
            .and_then(|_| tx.commit())
            .map_err(|e| MigrationError::Failed(version, e))?;

        tracing::info!("Migrated schema to version {}", version);
        applied += 1;
    }

    Ok(applied)
}
