//! Map Data - the aggregate root handed to and from the codecs

use super::entity_data::EntityDescriptor;
use super::marker_data::Marker;
use glam::Vec3;
use std::path::PathBuf;

/// Descriptive information about a map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapMetadata {
    pub creator: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub loading_point: Option<Vec3>,
    pub teleport_point: Option<Vec3>,
    /// Where the map was loaded from or saved to. Never written into the file.
    pub filename: Option<PathBuf>,
}

/// Everything a map file can hold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub objects: Vec<EntityDescriptor>,
    /// World objects the user deleted; kept so they can be restored
    pub removed_from_world: Vec<EntityDescriptor>,
    pub markers: Vec<Marker>,
    pub metadata: MapMetadata,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects that will survive saving (origin-placed ones are dropped)
    pub fn placed_objects(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.objects.iter().filter(|o| o.is_placed())
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.removed_from_world.is_empty() && self.markers.is_empty()
    }
}
