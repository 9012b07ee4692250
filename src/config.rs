use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::TracksideError;
use crate::diagnostics::AnalysisTier;
use crate::diagnostics::profile::TrackCategory;

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "trackside";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Tier used when a command does not ask for one
    pub default_tier: AnalysisTier,
    /// Track category assumed when a command does not give one
    pub default_track: TrackCategory,
    pub output_format: OutputFormat,
    /// Where saved setups live; the platform data directory when unset
    pub setup_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_tier: AnalysisTier::Basic,
            default_track: TrackCategory::RoadCourse,
            output_format: OutputFormat::Text,
            setup_dir: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, TracksideError> {
        Ok(dirs::config_dir()
            .ok_or(TracksideError::NoConfigDir)?
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Load the user's config, falling back to defaults when there is none
    /// or it cannot be read.
    pub fn from_local_file() -> Self {
        match Self::default_path().and_then(|path| Self::load(&path)) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Ignoring unreadable config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Option<Self>, TracksideError> {
        if !path.exists() {
            return Ok(None);
        }
        let file =
            std::fs::File::open(path).map_err(|e| TracksideError::ConfigIOError { source: e })?;
        serde_json::from_reader(file)
            .map(Some)
            .map_err(|e| TracksideError::ConfigSerializeError { source: e })
    }

    pub fn save(&self) -> Result<PathBuf, TracksideError> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), TracksideError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TracksideError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| TracksideError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| TracksideError::ConfigSerializeError { source: e })
    }

    /// Directory for saved setups.
    pub fn setup_dir(&self) -> Result<PathBuf, TracksideError> {
        match &self.setup_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .ok_or(TracksideError::NoConfigDir)?
                .join(APP_DIR_NAME)
                .join("setups")),
        }
    }
}
