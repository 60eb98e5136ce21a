use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use common_services::api::image::error::ImageError;
use common_services::api::image::interfaces::PhotoUpload;
use common_services::api::matching::error::MatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoUploadError {
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Missing multipart field 'file'")]
    MissingFile,
}

/// Reads the `file` field of a multipart body. Other fields are skipped.
pub async fn read_photo(mut multipart: Multipart) -> Result<PhotoUpload, PhotoUploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;
        return Ok(PhotoUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }
    Err(PhotoUploadError::MissingFile)
}

impl From<PhotoUploadError> for ImageError {
    fn from(err: PhotoUploadError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<PhotoUploadError> for MatchError {
    fn from(err: PhotoUploadError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
