//! Session Data - state of one editing session

use crate::catalog::{InvalidHashList, ModelCatalog};
use crate::config::EditorConfig;
use crate::entity::{EntityDescriptor, MapMetadata, Marker};
use crate::host::{ModelLoader, WorldHost};
use crate::registry::RegistryData;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// Everything the editor owns while a map is open
pub struct EditorSession<H: WorldHost + ModelLoader> {
    pub(crate) host: H,
    pub(crate) registry: RegistryData,
    pub(crate) markers: Vec<Marker>,
    /// World objects the user deleted, restored by `new_map`
    pub(crate) removed_from_world: Vec<EntityDescriptor>,
    pub(crate) metadata: MapMetadata,
    pub(crate) catalog: ModelCatalog,
    pub(crate) invalid_hashes: InvalidHashList,
    pub(crate) config: EditorConfig,

    pub(crate) marker_counter: i32,
    /// Objects read from the last loaded map
    pub(crate) loaded_entities: usize,
    /// Edits since the last save
    pub(crate) changes_made: u32,
    pub(crate) last_autosave: DateTime<Utc>,
}

impl<H: WorldHost + ModelLoader> EditorSession<H> {
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn registry(&self) -> &RegistryData {
        &self.registry
    }

    /// Registry and host together, for registry operations the session does not wrap.
    /// Call [`EditorSession::mark_changed`] after editing through them.
    pub fn parts_mut(&mut self) -> (&mut RegistryData, &mut H) {
        (&mut self.registry, &mut self.host)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn removed_from_world(&self) -> &[EntityDescriptor] {
        &self.removed_from_world
    }

    pub fn metadata(&self) -> &MapMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MapMetadata {
        &mut self.metadata
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn invalid_hashes(&self) -> &InvalidHashList {
        &self.invalid_hashes
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn changes_made(&self) -> u32 {
        self.changes_made
    }

    pub fn mark_changed(&mut self) {
        self.changes_made += 1;
    }
}

/// Outcome of loading a map into the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub path: PathBuf,
    /// Objects that now exist in the world
    pub spawned: usize,
    /// Objects whose model does not exist
    pub invalid_models: usize,
    /// Objects the host or the prop ceiling refused
    pub failed: usize,
    /// Identifications dropped because they were taken or invalid
    pub rejected_identifiers: usize,
    /// World objects found and deleted
    pub removed_world_objects: usize,
    pub markers: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.invalid_models + self.failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message for the user at the end of a save or load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
