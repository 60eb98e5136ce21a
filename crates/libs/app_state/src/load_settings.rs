use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use std::fs;
use std::path::Path;
use tracing::info;

const SETTINGS_PATH: &str = "config/settings.yaml";

fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    )
}

/// Loads `config/settings.yaml`, applies `APP__*` environment overrides and resolves paths.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    let config_path = Path::new(SETTINGS_PATH).canonicalize()?;
    info!("Loading settings from {}", config_path.display());

    let builder = with_environment(Config::builder().add_source(File::from(config_path)));
    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    let settings = AppSettings::try_from(raw_settings)?;

    fs::create_dir_all(&settings.storage.media_folder)?;

    Ok(settings)
}

/// Parses settings from a YAML document, without environment overrides.
pub fn parse_app_settings(yaml: &str) -> Result<AppSettings> {
    let raw_settings = Config::builder()
        .add_source(File::from_str(yaml, FileFormat::Yaml))
        .build()?
        .try_deserialize::<RawSettings>()?;
    AppSettings::try_from(raw_settings)
}
