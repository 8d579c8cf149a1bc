//! Editor configuration
//!
//! Loaded from a TOML file; every field is optional and falls back to the
//! defaults in `constants`.

use crate::constants;
use crate::error::{EditorError, EditorResult};
use crate::persistence::PersistenceError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Prop ceiling enforced by the capacity governor
    pub max_props: usize,
    /// Host spawn attempts for vehicles
    pub spawn_attempts: u32,
    /// Frames to wait for a model to load
    pub model_load_attempts: u32,
    /// Minutes between autosaves; 0 disables autosaving
    pub autosave_interval_minutes: u32,
    pub autosave_path: PathBuf,
    pub object_list_path: PathBuf,
    pub vehicle_list_path: PathBuf,
    pub ped_list_path: PathBuf,
    pub invalid_hash_path: PathBuf,
    /// Maps in this directory are loaded when the session opens
    pub autoload_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_props: constants::registry::MAX_OBJECTS,
            spawn_attempts: constants::registry::SPAWN_ATTEMPTS,
            model_load_attempts: constants::models::MODEL_LOAD_ATTEMPTS,
            autosave_interval_minutes: constants::autosave::DEFAULT_INTERVAL_MINUTES,
            autosave_path: PathBuf::from(constants::files::AUTOSAVE_FILE),
            object_list_path: PathBuf::from(constants::files::OBJECT_LIST_FILE),
            vehicle_list_path: PathBuf::from(constants::files::VEHICLE_LIST_FILE),
            ped_list_path: PathBuf::from(constants::files::PED_LIST_FILE),
            invalid_hash_path: PathBuf::from(constants::files::INVALID_HASH_FILE),
            autoload_dir: PathBuf::from(constants::files::AUTOLOAD_DIR),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> EditorResult<Self> {
        let config: EditorConfig = toml::from_str(text).map_err(|e| {
            EditorError::Persistence(PersistenceError::Deserialization(format!(
                "editor config: {}",
                e
            )))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> EditorResult<Self> {
        if !path.exists() {
            log::info!(
                "[EditorConfig] {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("[EditorConfig] Loaded {}", path.display());
        Ok(config)
    }

    /// Render as TOML, e.g. to write out a template config
    pub fn to_toml_string(&self) -> EditorResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            EditorError::Persistence(PersistenceError::Serialization(format!(
                "editor config: {}",
                e
            )))
        })
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> EditorResult<()> {
        if self.max_props == 0 {
            return Err(EditorError::InvalidConfig {
                field: "max_props".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.spawn_attempts == 0 {
            return Err(EditorError::InvalidConfig {
                field: "spawn_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Autosave interval, `None` when autosaving is disabled
    pub fn autosave_interval(&self) -> Option<chrono::Duration> {
        match self.autosave_interval_minutes {
            0 => None,
            minutes => Some(chrono::Duration::minutes(minutes as i64)),
        }
    }

    /// Resolve every relative path against a base directory
    pub fn rooted_at(mut self, base: &Path) -> Self {
        for path in [
            &mut self.autosave_path,
            &mut self.object_list_path,
            &mut self.vehicle_list_path,
            &mut self.ped_list_path,
            &mut self.invalid_hash_path,
            &mut self.autoload_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}
