use crate::paths;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine default config directory")]
    NoConfigDir,
    #[error("Failed to access config file '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurtainConfig {
    /// The path the config file was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Duration of the fade-in when an overlay appears, in milliseconds
    pub fade_in_ms: u32,
    /// Duration of the fade-out when a visible overlay is disposed, in milliseconds
    pub fade_out_ms: u32,
    /// The number of frames per second for fades driven by the headless view
    pub animation_fps: u32,
    /// Text a freshly created surface displays before its first message
    pub default_message: String,
}

impl Default for CurtainConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            fade_in_ms: 300,
            fade_out_ms: 100,
            animation_fps: 60,
            default_message: "Loading...".to_string(),
        }
    }
}

impl CurtainConfig {
    /// Loads the config at `config_path`, or the default location when `None`.
    ///
    /// A missing file is created with default values. With `save`, the parsed
    /// config is written back so that any missing fields appear in the file.
    pub fn load(config_path: Option<&Path>, save: bool) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => paths::default_config_path().ok_or(ConfigError::NoConfigDir)?,
        };

        if !path.exists() {
            Self::create_default_config_file(&path)?;
            trace!("Created default config file at: {}", path.display());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let mut config: CurtainConfig =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        config.config_path = Some(path.clone());

        if save {
            if let Err(e) = config.save_to_file(&path) {
                warn!("Failed to update config file with missing fields: {e}");
            }
        }

        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_yaml::to_string(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn create_default_config_file(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        CurtainConfig::default().save_to_file(path)
    }
}
