use serde::Deserialize;
use std::path::PathBuf;

/// Settings as they appear in `config/settings.yaml`, before paths are resolved.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub database: DatabaseSettings,
    pub api: ApiSettings,
    pub face: FaceSettings,
    pub storage: RawStorageSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

/// Database pool configuration. Durations are in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
    /// Number of inverted lists (partitions) of the embedding vector index.
    pub ivf_lists: u32,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
    /// Largest accepted request body, in bytes. Photo uploads are the only large bodies.
    pub max_upload_bytes: usize,
}

/// Face detection and matching configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct FaceSettings {
    /// Endpoint of the face embedding service.
    pub provider_url: String,
    /// Embedding model identifier, e.g. "ArcFace" or "Facenet512".
    pub model: String,
    /// Distance metric: "cosine", "euclidean" or "euclidean_l2".
    pub metric: String,
    pub detector_backend: String,
    pub align: bool,
    /// Fail extraction instead of returning an empty face list when nothing is detected.
    pub enforce_detection: bool,
    /// Length of every embedding vector. Must match the `vector(n)` column.
    pub dimension: usize,
    /// How many matches a match request returns at most.
    pub match_limit: i64,
    /// Timeout for a single call to the embedding service, in seconds.
    pub request_timeout: u64,
    #[serde(default)]
    pub threshold_overrides: Vec<ThresholdOverride>,
}

/// Replaces (or adds) the calibrated threshold of one model/metric pair.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ThresholdOverride {
    pub model: String,
    pub metric: String,
    pub threshold: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawStorageSettings {
    /// Folder uploaded photos are written to.
    pub media_folder: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
}
