//! Image database queries.
//!
//! Images carry their binary payload in the `image_data` column. Listing
//! queries never select that column.

use gallery_common::{Error, ImageId, Result, UserId};
use rusqlite::Connection;

use super::parse_timestamp;
use crate::models::{Image, ImageSummary};

/// Parse image metadata from a row.
///
/// Expects columns in order: image_id, user_id, image_name, description, upload_date.
fn parse_summary_row(row: &rusqlite::Row) -> rusqlite::Result<ImageSummary> {
    Ok(ImageSummary {
        id: ImageId::from(row.get::<_, i64>(0)?),
        user_id: UserId::from(row.get::<_, i64>(1)?),
        name: row.get(2)?,
        description: row.get(3)?,
        upload_date: parse_timestamp(4, &row.get::<_, String>(4)?)?,
    })
}

/// Insert a new image record.
///
/// `upload_date` is assigned by the database.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `user_id` - Owner, recorded as given
/// * `name` - Display name (the source path at upload time)
/// * `data` - Binary payload
/// * `description` - Free text
///
/// # Returns
///
/// * `Ok(ImageId)` - The store-assigned id of the new image
/// * `Err(Error)` - If a database error occurs
pub fn insert_image(
    conn: &Connection,
    user_id: UserId,
    name: &str,
    data: &[u8],
    description: &str,
) -> Result<ImageId> {
    conn.execute(
        "INSERT INTO images (user_id, image_name, image_data, description)
         VALUES (:user_id, :image_name, :image_data, :description)",
        rusqlite::named_params! {
            ":user_id": user_id.get(),
            ":image_name": name,
            ":image_data": data,
            ":description": description,
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(ImageId::from(conn.last_insert_rowid()))
}

/// List metadata for every image, in the store's scan order.
pub fn list_images(conn: &Connection) -> Result<Vec<ImageSummary>> {
    let mut stmt = conn
        .prepare(
            "SELECT image_id, user_id, image_name, description, upload_date
             FROM images",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let images = stmt
        .query_map([], parse_summary_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(images)
}

/// Get a full image row, payload included.
///
/// # Returns
///
/// * `Ok(Some(Image))` - The image if found
/// * `Ok(None)` - If no image has this id
/// * `Err(Error)` - If a database error occurs
pub fn get_image(conn: &Connection, id: ImageId) -> Result<Option<Image>> {
    let result = conn.query_row(
        "SELECT image_id, user_id, image_name, image_data, description, upload_date
         FROM images WHERE image_id = :id",
        rusqlite::named_params! { ":id": id.get() },
        |row| {
            Ok(Image {
                id: ImageId::from(row.get::<_, i64>(0)?),
                user_id: UserId::from(row.get::<_, i64>(1)?),
                name: row.get(2)?,
                data: row.get(3)?,
                description: row.get(4)?,
                upload_date: parse_timestamp(5, &row.get::<_, String>(5)?)?,
            })
        },
    );

    match result {
        Ok(image) => Ok(Some(image)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Get only the binary payload of an image.
pub fn get_image_data(conn: &Connection, id: ImageId) -> Result<Option<Vec<u8>>> {
    let result = conn.query_row(
        "SELECT image_data FROM images WHERE image_id = :id",
        rusqlite::named_params! { ":id": id.get() },
        |row| row.get::<_, Vec<u8>>(0),
    );

    match result {
        Ok(data) => Ok(Some(data)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Count all image records.
pub fn count_images(conn: &Connection) -> Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get::<_, i64>(0))
        .map(|n| n as u64)
        .map_err(|e| Error::database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_get_image() {
        let conn = test_conn();
        let data: Vec<u8> = (0u8..10).collect();

        let id = insert_image(&conn, UserId::from(1), "/tmp/a.png", &data, "test").unwrap();

        let found = get_image(&conn, id).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.user_id, UserId::from(1));
        assert_eq!(found.name, "/tmp/a.png");
        assert_eq!(found.data, data);
        assert_eq!(found.description, "test");
    }

    #[test]
    fn test_insert_accepts_unknown_user() {
        let conn = test_conn();

        let id = insert_image(&conn, UserId::from(404), "x.jpg", b"jpg", "").unwrap();
        assert_eq!(get_image(&conn, id).unwrap().unwrap().user_id, UserId::from(404));
    }

    #[test]
    fn test_get_image_not_found() {
        let conn = test_conn();

        assert!(get_image(&conn, ImageId::from(1)).unwrap().is_none());
        assert!(get_image_data(&conn, ImageId::from(1)).unwrap().is_none());
    }

    #[test]
    fn test_get_image_data_keeps_every_byte() {
        let conn = test_conn();
        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

        let id = insert_image(&conn, UserId::from(1), "all.bin", &data, "").unwrap();
        assert_eq!(get_image_data(&conn, id).unwrap().unwrap(), data);
    }

    #[test]
    fn test_empty_payload() {
        let conn = test_conn();

        let id = insert_image(&conn, UserId::from(1), "empty.png", &[], "").unwrap();
        assert_eq!(get_image_data(&conn, id).unwrap().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_list_images() {
        let conn = test_conn();
        assert!(list_images(&conn).unwrap().is_empty());

        insert_image(&conn, UserId::from(1), "a.png", b"a", "first").unwrap();
        insert_image(&conn, UserId::from(2), "b.png", b"b", "second").unwrap();

        let mut images = list_images(&conn).unwrap();
        images.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].description, "first");
        assert_eq!(images[1].user_id, UserId::from(2));
        assert_eq!(count_images(&conn).unwrap(), 2);
    }
}
