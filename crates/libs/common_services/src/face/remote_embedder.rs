use crate::database::embedding::BoundingBox;
use crate::face::{DetectedFace, FaceEmbedder, FaceProviderError};
use app_state::FaceSettings;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Deserialize)]
struct RepresentResponse {
    faces: Vec<RepresentedFace>,
}

#[derive(Debug, Deserialize)]
struct RepresentedFace {
    facial_area: FacialArea,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct FacialArea {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// Calls an HTTP face embedding service.
///
/// The image is posted as multipart field `file`, together with the `model_name`,
/// `detector_backend`, `align` and `enforce_detection` text fields.
#[derive(Debug, Clone)]
pub struct RemoteFaceEmbedder {
    client: Client,
    endpoint: Url,
    model: String,
    detector_backend: String,
    align: bool,
    enforce_detection: bool,
    dimension: usize,
}

impl RemoteFaceEmbedder {
    pub fn from_settings(settings: &FaceSettings) -> color_eyre::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout))
            .build()?;
        Ok(Self {
            client,
            endpoint: Url::parse(&settings.provider_url)?,
            model: settings.model.clone(),
            detector_backend: settings.detector_backend.clone(),
            align: settings.align,
            enforce_detection: settings.enforce_detection,
            dimension: settings.dimension,
        })
    }

    fn form(&self, image: &[u8]) -> Form {
        Form::new()
            .part("file", Part::bytes(image.to_vec()).file_name("image"))
            .text("model_name", self.model.clone())
            .text("detector_backend", self.detector_backend.clone())
            .text("align", self.align.to_string())
            .text("enforce_detection", self.enforce_detection.to_string())
    }
}

#[async_trait]
impl FaceEmbedder for RemoteFaceEmbedder {
    #[instrument(skip(self, image), fields(bytes = image.len()), err(Debug))]
    async fn embed_faces(&self, image: &[u8]) -> Result<Vec<DetectedFace>, FaceProviderError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(self.form(image))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY && self.enforce_detection {
            return Err(FaceProviderError::NoFaceDetected);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FaceProviderError::Api { status, body });
        }

        let body = response.bytes().await?;
        let faces = parse_faces(&body, self.dimension)?;
        debug!("Face provider found {} faces", faces.len());
        Ok(faces)
    }
}

/// Parses a `{"faces": [{"facial_area": {..}, "embedding": [..]}]}` response body.
fn parse_faces(body: &[u8], dimension: usize) -> Result<Vec<DetectedFace>, FaceProviderError> {
    let response: RepresentResponse = serde_json::from_slice(body)
        .map_err(|e| FaceProviderError::InvalidResponse(e.to_string()))?;

    response
        .faces
        .into_iter()
        .map(|face| {
            if face.embedding.len() != dimension {
                return Err(FaceProviderError::DimensionMismatch {
                    expected: dimension,
                    actual: face.embedding.len(),
                });
            }
            let area = face.facial_area;
            Ok(DetectedFace {
                bbox: BoundingBox::new(area.x, area.y, area.w, area.h)?,
                vector: face.embedding,
            })
        })
        .collect()
}
