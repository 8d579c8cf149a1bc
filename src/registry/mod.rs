//! Registry Module - live entity bookkeeping
//!
//! Tracks which host objects belong to the editor, their category,
//! dynamic state and side metadata, and enforces the prop ceiling.

pub mod capacity;
pub mod registry_data;
pub mod registry_operations;

pub use capacity::CapacityGovernor;
pub use registry_data::{EntityRecord, MetadataCensus, RegistryData};
pub use registry_operations::{
    category_of, clear_all, count_of, create_ped, create_pickup, create_prop, create_vehicle,
    describe_entity, entity_count, find_by_identifier, get_all_entities, get_all_handles,
    is_static, metadata_census, ordered_handles, populate_ped_defaults, prop_count,
    remove_entity, set_door, set_dynamic, set_identifier, set_ped_action, set_ped_relationship,
    set_ped_weapon, set_siren, set_texture_variant, set_vehicle_colors, validate_identifier,
};
