//! Image uploads
//!
//! Images are stored under a folder of the uploads directory and served from
//! `{base_url}/{folder}/{file}`. Only the returned URL is recorded anywhere.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use mockall::automock;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Folder holding proof-of-payment images.
pub const ORDERS_FOLDER: &str = "orders";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image is not valid base64")]
    InvalidEncoding(#[source] base64::DecodeError),

    #[error("image must be a PNG, JPEG, or WebP")]
    UnsupportedFormat,

    #[error("invalid upload folder")]
    InvalidFolder,

    #[error("image url is not served by this store")]
    UnknownUrl,

    #[error("failed to store image")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP".as_slice()) {
            Some(Self::Webp)
        } else {
            None
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
        }
    }
}

/// Decode a base64 image, with or without a `data:image/...;base64,` prefix.
///
/// # Errors
///
/// Returns [`UploadError::InvalidEncoding`] when the payload is not base64.
pub fn decode_base64_image(encoded: &str) -> Result<Vec<u8>, UploadError> {
    let payload = encoded
        .split_once(";base64,")
        .map_or(encoded, |(_, payload)| payload)
        .trim();

    STANDARD.decode(payload).map_err(UploadError::InvalidEncoding)
}

fn validate_folder(folder: &str) -> Result<(), UploadError> {
    let valid = !folder.is_empty()
        && folder
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(UploadError::InvalidFolder)
    }
}

/// Filesystem-backed image store.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageUploader for LocalImageStore {
    #[tracing::instrument(
        name = "uploads.store",
        skip(self, bytes),
        fields(size = bytes.len()),
        err
    )]
    async fn upload(&self, folder: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
        validate_folder(folder)?;

        let format = ImageFormat::sniff(&bytes).ok_or(UploadError::UnsupportedFormat)?;
        let file = format!("{}.{}", Uuid::now_v7(), format.extension());

        let dir = self.root.join(folder);

        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file), &bytes).await?;

        info!(folder, file = %file, "stored image");

        Ok(format!("{}/{folder}/{file}", self.base_url))
    }

    #[tracing::instrument(name = "uploads.remove", skip(self), err)]
    async fn remove(&self, url: &str) -> Result<(), UploadError> {
        let (folder, file) = url
            .strip_prefix(&self.base_url)
            .and_then(|path| path.strip_prefix('/'))
            .and_then(|path| path.split_once('/'))
            .ok_or(UploadError::UnknownUrl)?;

        validate_folder(folder)?;

        if file.is_empty() || file.contains(['/', '\\']) || file.starts_with('.') {
            return Err(UploadError::UnknownUrl);
        }

        match tokio::fs::remove_file(self.root.join(folder).join(file)).await {
            Ok(()) => {
                info!(folder, file, "removed image");

                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[automock]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Store an image in `folder`, returning its public URL.
    async fn upload(&self, folder: &str, bytes: Vec<u8>) -> Result<String, UploadError>;

    /// Delete an image previously returned by [`ImageUploader::upload`].
    /// Removing an image that is already gone succeeds.
    async fn remove(&self, url: &str) -> Result<(), UploadError>;
}
