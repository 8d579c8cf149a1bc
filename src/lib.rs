// Map Editor Core - Data-Oriented Programming (DOP) Architecture
//
// State lives in plain data structs (*_data modules); behavior lives in free
// functions over that data (*_operations modules). The host engine is reached
// only through the `WorldHost` and `ModelLoader` traits.
//
// For new code, prefer:
// - registry_operations for entity bookkeeping
// - persistence::save_map / load_map for files
// - session::EditorSession when a host is attached

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;
pub mod transform;

// Data model
pub mod entity;

// Host seam
pub mod host;

// Editor systems
pub mod catalog;
pub mod persistence;
pub mod registry;
pub mod session;

pub use config::EditorConfig;
pub use error::{EditorError, EditorResult, OptionExt};

// === Core Entity Types ===
pub use entity::{
    EntityCategory, EntityDescriptor, EntityPayload, Handle, IdleAction, Map, MapMetadata,
    Marker, MarkerColor, MarkerType, PedData, PickupData, PropData, Relationship, VehicleData,
};

// === Host ===
pub use host::{HeadlessHost, ModelLoader, ModelRef, WorldHost};

// === Files ===
pub use catalog::{InvalidHashList, ModelCatalog, NameTable};
pub use persistence::{load_map, save_map, Format, PersistenceError, PersistenceResult};

pub use registry::{CapacityGovernor, RegistryData};
pub use session::{EditorSession, LoadReport, Notice, NoticeLevel};
