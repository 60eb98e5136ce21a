use crate::database::embedding::EmbeddingSummary;
use crate::database::image::Image;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart body of photo uploads.
#[derive(ToSchema)]
pub struct PhotoUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// A photo received in an upload request.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: i64,
    pub path: String,
    pub event_id: i64,
    /// Faces detected in the photo.
    pub embeddings: Vec<EmbeddingSummary>,
}

impl ImageResponse {
    #[must_use]
    pub fn new(image: Image, embeddings: Vec<EmbeddingSummary>) -> Self {
        Self {
            id: image.id,
            path: image.path,
            event_id: image.event_id,
            embeddings,
        }
    }
}
