use crate::{
    ApiSettings, DatabaseSettings, FaceSettings, LoggingSettings, RawSettings, SecretSettings,
};
use color_eyre::Result;
use serde::Deserialize;
use std::path::{PathBuf, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub database: DatabaseSettings,
    pub api: ApiSettings,
    pub face: FaceSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Absolute path of the folder uploaded photos are written to.
    pub media_folder: PathBuf,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        let media_folder = absolute(&raw.storage.media_folder)?;

        Ok(Self {
            database: raw.database,
            api: raw.api,
            face: raw.face,
            storage: StorageSettings { media_folder },
            logging: raw.logging,
            secrets: raw.secrets,
        })
    }
}

impl AppSettings {
    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
