// Storage for saved vehicle setups

use crate::diagnostics::{ConfigurationProfile, SymptomProfile, TrackContext};
use crate::errors::TracksideError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_EXTENSION: &str = "json.backup";

/// A setup as the user saved it, with the last reported symptoms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedSetup {
    pub name: String,
    pub vehicle: Option<String>,
    pub track_name: Option<String>,
    pub track: TrackContext,
    pub config: ConfigurationProfile,
    pub symptoms: SymptomProfile,
}

impl SavedSetup {
    pub fn new(name: impl Into<String>, config: ConfigurationProfile) -> Self {
        Self {
            name: name.into(),
            config,
            ..Default::default()
        }
    }
}

/// Trait defining the interface for setup storage operations
pub trait SetupStorage {
    /// Save a setup, replacing any setup with the same name.
    ///
    /// Fails when the name maps to a stored setup with a different name.
    fn save_setup(&mut self, setup: &SavedSetup) -> Result<(), TracksideError>;

    /// Load a setup by name
    fn load_setup(&self, name: &str) -> Result<Option<SavedSetup>, TracksideError>;

    /// List the names of all saved setups
    fn list_setups(&self) -> Result<Vec<String>, TracksideError>;

    /// Delete a setup and its backup
    fn delete_setup(&mut self, name: &str) -> Result<(), TracksideError>;

    /// Check if a setup exists
    fn setup_exists(&self, name: &str) -> Result<bool, TracksideError>;
}

/// Stores each setup as a pretty-printed JSON file in one directory.
///
/// Overwriting a setup keeps the previous file as a backup, which is used
/// when the primary file is unreadable.
pub struct FileBasedStorage {
    storage_path: PathBuf,
}

impl FileBasedStorage {
    /// Create a new file-based storage instance
    pub fn new(storage_path: PathBuf) -> Result<Self, TracksideError> {
        if !storage_path.exists() {
            fs::create_dir_all(&storage_path).map_err(|e| TracksideError::FileOperationError {
                operation: "create_storage_dir".to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(Self { storage_path })
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Normalize a setup name for consistent file naming
    fn normalize_name(name: &str) -> String {
        name.trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }

    fn file_path_for(&self, name: &str) -> PathBuf {
        self.storage_path
            .join(format!("{}.json", Self::normalize_name(name)))
    }

    fn backup_path_for(&self, name: &str) -> PathBuf {
        self.storage_path
            .join(format!("{}.{}", Self::normalize_name(name), BACKUP_EXTENSION))
    }

    fn validate(setup: &SavedSetup) -> Result<(), TracksideError> {
        if setup.name.trim().is_empty() {
            return Err(TracksideError::InvalidUserInput {
                field: "name".to_string(),
                reason: "Setup name cannot be empty".to_string(),
            });
        }
        if Self::normalize_name(&setup.name).chars().all(|c| c == '_') {
            return Err(TracksideError::InvalidUserInput {
                field: "name".to_string(),
                reason: "Setup name must contain at least one letter or digit".to_string(),
            });
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<SavedSetup, TracksideError> {
        let content = fs::read_to_string(path).map_err(|e| TracksideError::FileOperationError {
            operation: "read_setup_file".to_string(),
            reason: format!("Failed to read {:?}: {}", path, e),
        })?;

        if content.trim().is_empty() {
            return Err(TracksideError::SetupStorageError {
                reason: format!("Setup file {:?} is empty", path),
            });
        }

        serde_json::from_str(&content).map_err(|e| TracksideError::SetupStorageError {
            reason: format!("Failed to parse {:?}: {}", path, e),
        })
    }
}

impl SetupStorage for FileBasedStorage {
    fn save_setup(&mut self, setup: &SavedSetup) -> Result<(), TracksideError> {
        Self::validate(setup)?;

        let file_path = self.file_path_for(&setup.name);
        if file_path.exists() {
            // An unreadable file is replaced
            if let Ok(existing) = Self::read_file(&file_path) {
                if existing.name != setup.name {
                    return Err(TracksideError::InvalidUserInput {
                        field: "name".to_string(),
                        reason: format!(
                            "'{}' would overwrite saved setup '{}'",
                            setup.name, existing.name
                        ),
                    });
                }
            }
            let backup_path = self.backup_path_for(&setup.name);
            if let Err(e) = fs::copy(&file_path, &backup_path) {
                warn!("Failed to back up {:?}: {}", file_path, e);
            }
        }

        let content =
            serde_json::to_string_pretty(setup).map_err(|e| TracksideError::SetupSerializeError {
                name: setup.name.clone(),
                source: e,
            })?;
        fs::write(&file_path, content).map_err(|e| TracksideError::FileOperationError {
            operation: "write_setup_file".to_string(),
            reason: e.to_string(),
        })?;

        info!("Saved setup '{}' to {:?}", setup.name, file_path);
        Ok(())
    }

    fn load_setup(&self, name: &str) -> Result<Option<SavedSetup>, TracksideError> {
        let file_path = self.file_path_for(name);
        if !file_path.exists() {
            debug!("Setup file does not exist: {:?}", file_path);
            return Ok(None);
        }

        match Self::read_file(&file_path) {
            Ok(setup) => Ok(Some(setup)),
            Err(e) => {
                warn!("Failed to load setup '{}': {}", name, e);
                let backup_path = self.backup_path_for(name);
                if backup_path.exists() {
                    if let Ok(setup) = Self::read_file(&backup_path) {
                        warn!("Loaded setup '{}' from backup", name);
                        return Ok(Some(setup));
                    }
                }
                Err(TracksideError::SetupStorageError {
                    reason: format!(
                        "Failed to load setup '{}' after recovery attempts: {}",
                        name, e
                    ),
                })
            }
        }
    }

    fn list_setups(&self) -> Result<Vec<String>, TracksideError> {
        let entries =
            fs::read_dir(&self.storage_path).map_err(|e| TracksideError::FileOperationError {
                operation: "list_setups".to_string(),
                reason: e.to_string(),
            })?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_file(&path) {
                Ok(setup) => names.push(setup.name),
                Err(e) => warn!("Skipping unreadable setup file {:?}: {}", path, e),
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_setup(&mut self, name: &str) -> Result<(), TracksideError> {
        let file_path = self.file_path_for(name);
        if !file_path.exists() {
            return Err(TracksideError::SetupNotFound {
                name: name.to_string(),
            });
        }

        fs::remove_file(&file_path).map_err(|e| TracksideError::FileOperationError {
            operation: "delete_setup".to_string(),
            reason: e.to_string(),
        })?;

        let backup_path = self.backup_path_for(name);
        if backup_path.exists() {
            if let Err(e) = fs::remove_file(&backup_path) {
                warn!("Failed to remove backup {:?}: {}", backup_path, e);
            }
        }
        Ok(())
    }

    fn setup_exists(&self, name: &str) -> Result<bool, TracksideError> {
        Ok(self.file_path_for(name).exists())
    }
}
