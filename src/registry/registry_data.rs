//! Registry Data - every live entity the editor placed
//!
//! One arena keyed by host handle. A record's payload variant is its category,
//! so a handle can only ever belong to one category and its side metadata
//! disappears together with the record.

use super::capacity::CapacityGovernor;
use crate::config::EditorConfig;
use crate::constants;
use crate::entity::{EntityCategory, EntityPayload, Handle};
use rustc_hash::FxHashMap;

/// Bookkeeping for one live entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub payload: EntityPayload,
    pub model_hash: i32,
    /// `false` = frozen in place
    pub dynamic: bool,
    pub identifier: Option<String>,
    /// Creation order, used to keep snapshots stable
    pub sequence: u64,
}

impl EntityRecord {
    pub fn category(&self) -> EntityCategory {
        self.payload.category()
    }
}

/// Registry state owned by the editing session
#[derive(Debug, Clone)]
pub struct RegistryData {
    pub(crate) records: FxHashMap<Handle, EntityRecord>,
    /// Live count per category, indexed by `EntityCategory::snapshot_rank`
    pub(crate) counts: [usize; 5],
    pub(crate) next_sequence: u64,
    pub capacity: CapacityGovernor,
    /// Host spawn attempts for vehicles
    pub spawn_attempts: u32,
}

impl Default for RegistryData {
    fn default() -> Self {
        Self {
            records: FxHashMap::default(),
            counts: [0; 5],
            next_sequence: 0,
            capacity: CapacityGovernor::default(),
            spawn_attempts: constants::registry::SPAWN_ATTEMPTS,
        }
    }
}

impl RegistryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            capacity: CapacityGovernor::new(config.max_props),
            spawn_attempts: config.spawn_attempts,
            ..Default::default()
        }
    }

    pub fn record(&self, handle: Handle) -> Option<&EntityRecord> {
        self.records.get(&handle)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.records.contains_key(&handle)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// How many side-table entries are populated. Used for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetadataCensus {
    pub statics: usize,
    pub identifiers: usize,
    pub doors: usize,
    pub textures: usize,
    pub sirens: usize,
    pub ped_actions: usize,
    pub ped_relationships: usize,
    pub ped_weapons: usize,
}

impl MetadataCensus {
    /// Total ped side-table entries
    pub fn ped_entries(&self) -> usize {
        self.ped_actions + self.ped_relationships + self.ped_weapons
    }
}
