use std::path::{Path, PathBuf};

use gallery_common::{Error, ImageId, Result, UserId};
use gallery_db::gateway::Gateway;
use gallery_db::models::{Image, ImageSummary};
use gallery_db::queries::images;

/// An image about to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// Owner. Recorded as given, not checked against the user table.
    pub user_id: UserId,
    /// File to read the payload from; its path also becomes the image name.
    pub path: PathBuf,
    pub description: String,
}

impl NewImage {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(user_id: UserId, path: P, description: S) -> Self {
        Self {
            user_id,
            path: path.into(),
            description: description.into(),
        }
    }
}

/// Outcome of [`ImageRepository::download`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Download {
    /// The payload was written to the output path.
    Saved { bytes: u64 },
    /// No image has the requested id; nothing was written.
    Missing,
}

/// Stores and retrieves images.
///
/// Each method acquires its own connection from the gateway and releases it
/// before returning.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    gateway: Gateway,
}

impl ImageRepository {
    /// Create a new `ImageRepository`.
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Read the file at `image.path` and store it with its metadata.
    ///
    /// # Returns
    ///
    /// * `Ok(ImageId)` - The id assigned by the store
    /// * `Err(Error::FileNotFound)` - If the source file cannot be read
    /// * `Err(Error::InvalidInput)` - If the path is not valid UTF-8 and so
    ///   cannot be stored verbatim as the image name
    /// * `Err(Error::Connection | Error::Database)` - If the insert fails
    pub fn upload(&self, image: &NewImage) -> Result<ImageId> {
        let data = std::fs::read(&image.path)
            .map_err(|e| Error::file_not_found(&image.path, e))?;
        let name = image.path.to_str().ok_or_else(|| {
            Error::invalid_input(format!(
                "image path is not valid UTF-8: {}",
                image.path.display()
            ))
        })?;

        let conn = self.gateway.acquire()?;
        let id = images::insert_image(&conn, image.user_id, name, &data, &image.description)?;

        tracing::info!(
            image_id = %id,
            user_id = %image.user_id,
            bytes = data.len(),
            "Uploaded {}",
            name
        );
        Ok(id)
    }

    /// Metadata of every stored image, payloads excluded.
    ///
    /// Order is whatever the store returns.
    pub fn list_all(&self) -> Result<Vec<ImageSummary>> {
        let conn = self.gateway.acquire()?;
        images::list_images(&conn)
    }

    /// Write the payload of image `id` to `output`, replacing any existing file.
    ///
    /// # Returns
    ///
    /// * `Ok(Download::Saved)` - The file now holds exactly the uploaded bytes
    /// * `Ok(Download::Missing)` - No such image; `output` is left untouched
    /// * `Err(Error::Io)` - If `output` cannot be written
    /// * `Err(Error::Connection | Error::Database)` - If the lookup fails
    pub fn download(&self, id: ImageId, output: &Path) -> Result<Download> {
        let data = {
            let conn = self.gateway.acquire()?;
            images::get_image_data(&conn, id)?
        };

        let Some(data) = data else {
            tracing::warn!(image_id = %id, "No image found");
            return Ok(Download::Missing);
        };

        std::fs::write(output, &data)?;

        tracing::info!(image_id = %id, bytes = data.len(), "Downloaded to {}", output.display());
        Ok(Download::Saved {
            bytes: data.len() as u64,
        })
    }

    /// Get a full image record, payload included.
    ///
    /// # Returns
    ///
    /// * `Ok(Image)` - The stored image
    /// * `Err(Error::NotFound)` - If no image has this id
    pub fn fetch(&self, id: ImageId) -> Result<Image> {
        let conn = self.gateway.acquire()?;
        images::get_image(&conn, id)?.ok_or_else(|| Error::not_found(format!("image {}", id)))
    }
}
