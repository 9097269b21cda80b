//! User database queries.
//!
//! This module provides creation and lookup of user accounts. Usernames are
//! not unique, so lookups by name return every matching record.

use gallery_common::{Error, Result, UserId};
use rusqlite::Connection;

use crate::models::User;

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId::from(row.get::<_, i64>(0)?),
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

/// Create a new user.
///
/// No duplicate check is made: registering an existing username inserts
/// another record with its own id.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `username` - Username
/// * `password` - Password, stored as given
///
/// # Returns
///
/// * `Ok(User)` - The created user with its store-assigned id
/// * `Err(Error)` - If a database error occurs
pub fn create_user(conn: &Connection, username: &str, password: &str) -> Result<User> {
    conn.execute(
        "INSERT INTO users (username, password) VALUES (:username, :password)",
        rusqlite::named_params! {
            ":username": username,
            ":password": password,
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(User {
        id: UserId::from(conn.last_insert_rowid()),
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Get a user by ID.
///
/// # Returns
///
/// * `Ok(Some(User))` - The user if found
/// * `Ok(None)` - If the user does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, username, password FROM users WHERE id = :id",
        rusqlite::named_params! { ":id": id.get() },
        parse_user_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Find every user registered under `username`, oldest first.
///
/// Matching is exact and case-sensitive.
pub fn find_users_by_username(conn: &Connection, username: &str) -> Result<Vec<User>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, username, password FROM users
             WHERE username = :username
             ORDER BY id",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let users = stmt
        .query_map(
            rusqlite::named_params! { ":username": username },
            parse_user_row,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(users)
}

/// Count all user records.
pub fn count_users(conn: &Connection) -> Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get::<_, i64>(0))
        .map(|n| n as u64)
        .map_err(|e| Error::database(e.to_string()))
}
