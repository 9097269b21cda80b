//! Rust models matching the database schema.

use chrono::{DateTime, Utc};
use gallery_common::{ImageId, UserId};
use serde::{Deserialize, Serialize};

/// User account model.
///
/// The password is stored exactly as registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Full image row, including the binary payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: ImageId,
    pub user_id: UserId,
    /// Source path at upload time, reused as the display name.
    pub name: String,
    pub data: Vec<u8>,
    pub description: String,
    pub upload_date: DateTime<Utc>,
}

/// Image metadata without the payload, as shown in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageSummary {
    pub id: ImageId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub upload_date: DateTime<Utc>,
}

impl From<Image> for ImageSummary {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            user_id: image.user_id,
            name: image.name,
            description: image.description,
            upload_date: image.upload_date,
        }
    }
}
