//! Editor-wide constants

/// Registry limits
pub mod registry {
    /// Hard ceiling on live props
    pub const MAX_OBJECTS: usize = 2048;

    /// Host spawn attempts before a vehicle placement is reported as failed
    pub const SPAWN_ATTEMPTS: u32 = 3;

    /// Identifications are capped at this many characters
    pub const MAX_IDENTIFIER_LEN: usize = 20;
}

/// Model streaming
pub mod models {
    /// Frames to yield while waiting for a model to become resident
    pub const MODEL_LOAD_ATTEMPTS: u32 = 200;

    /// Search radius used to find a world object recorded as removed
    pub const REMOVED_OBJECT_SEARCH_RADIUS: f32 = 1.0;
}

/// Default file locations, relative to the scripts directory
pub mod files {
    pub const AUTOSAVE_FILE: &str = "Autosave.xml";
    pub const OBJECT_LIST_FILE: &str = "ObjectList.ini";
    pub const VEHICLE_LIST_FILE: &str = "VehicleList.ini";
    pub const PED_LIST_FILE: &str = "PedList.ini";
    pub const INVALID_HASH_FILE: &str = "InvalidObjects.ini";
    pub const CONFIG_FILE: &str = "MapEditor.toml";
    pub const AUTOLOAD_DIR: &str = "AutoloadMaps";
}

/// Autosave
pub mod autosave {
    /// Minutes between autosaves when the config does not say otherwise
    pub const DEFAULT_INTERVAL_MINUTES: u32 = 5;
}
