use crate::error::{ConfigError, RegistryError, Result};
use crate::store::Store;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

fn default_bind() -> String {
    "[::]:8000".into()
}

fn default_workers() -> usize {
    4
}

fn default_connection_rate() -> usize {
    256
}

fn default_enable_compression() -> bool {
    false
}

fn default_database_path() -> PathBuf {
    PathBuf::from("swift_codes.db")
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_connection_rate")]
    pub max_connection_rate: usize,

    #[serde(default = "default_enable_compression")]
    pub enable_compression: bool,

    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(skip)]
    pub store: Store,
}

impl Config {
    pub fn load(settings_file: &Path) -> Result<Config> {
        let contents = read_to_string(settings_file).map_err(|e| ConfigError::ReadFile {
            path: settings_file.display().to_string(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Config> {
        toml::from_str(contents).map_err(|e| RegistryError::from(ConfigError::from(e)))
    }

    /// A configuration serving the given store, with all other settings at
    /// their defaults.
    pub fn with_store(store: Store) -> Config {
        Config {
            bind: default_bind(),
            workers: default_workers(),
            max_connection_rate: default_connection_rate(),
            enable_compression: default_enable_compression(),
            database_path: store.database_path().to_owned(),
            store,
        }
    }
}

pub fn load() -> Result<Config> {
    let settings = match std::env::var("CONFIG_FILE") {
        Err(_) => {
            if Path::new("settings.toml").exists() {
                Config::load(Path::new("settings.toml"))?
            } else {
                Config::parse("")?
            }
        }
        Ok(settings_file) => Config::load(Path::new(&settings_file))?,
    };
    finalize(settings, std::env::var_os("DATABASE_PATH").map(PathBuf::from))
}

/// Validate the settings and attach the store.
fn finalize(mut settings: Config, database_override: Option<PathBuf>) -> Result<Config> {
    if settings.workers == 0 {
        return Err(ConfigError::Invalid {
            reason: "workers must be greater than 0".to_string(),
        }
        .into());
    }

    if let Some(database_path) = database_override {
        settings.database_path = database_path;
    }
    if settings.database_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid {
            reason: "database_path must not be empty".to_string(),
        }
        .into());
    }

    settings.store = Store::new(settings.database_path.clone());
    Ok(settings)
}
