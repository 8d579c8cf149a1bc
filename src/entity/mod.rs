//! Entity Module - serializable descriptions of placed objects
//!
//! Descriptors, markers and the `Map` aggregate. These are values: they carry no
//! live handles and can be freely cloned, compared and handed to the codecs.

pub mod entity_data;
pub mod map_data;
pub mod marker_data;

pub use entity_data::{
    EntityCategory, EntityDescriptor, EntityPayload, Handle, IdleAction, PedData, PickupData,
    PropData, Relationship, VehicleData, UNARMED,
};
pub use map_data::{Map, MapMetadata};
pub use marker_data::{Marker, MarkerColor, MarkerType};
