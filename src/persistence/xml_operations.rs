//! XML Operations - full-fidelity map files
//!
//! The orientation quaternion is authoritative. `<Rotation>` is written for
//! readers that want Euler angles and only consulted when the stored
//! quaternion is all zeros.

use super::map_document_data::{
    MapDocument, MapObjectDocument, MarkerDocument, MarkerListDocument, MetadataDocument,
    ObjectListDocument, VectorDocument,
};
use super::{PersistenceError, PersistenceResult};
use crate::entity::{
    EntityCategory, EntityDescriptor, EntityPayload, IdleAction, Map, MapMetadata, Marker,
    MarkerColor, PedData, PickupData, PropData, VehicleData,
};
use crate::transform;
use glam::{Quat, Vec3};
use serde::Serialize;

const XML_DECLARATION: &str = "<?xml version=\"1.0\"?>\n";

// ============================================================================
// MAP -> DOCUMENT
// ============================================================================

fn object_document(descriptor: &EntityDescriptor) -> MapObjectDocument {
    let mut doc = MapObjectDocument {
        kind: descriptor.category().name().to_string(),
        position: descriptor.position.into(),
        rotation: descriptor.rotation().into(),
        hash: descriptor.model_hash,
        dynamic: descriptor.dynamic,
        quaternion: descriptor.orientation.into(),
        id: descriptor.identifier.clone(),
        ..Default::default()
    };

    match &descriptor.payload {
        EntityPayload::Prop(prop) => {
            doc.door = Some(prop.door);
            doc.texture = prop.texture;
        }
        EntityPayload::Vehicle(vehicle) => {
            doc.sirens_active = Some(vehicle.sirens_active);
            doc.primary_color = Some(vehicle.primary_color);
            doc.secondary_color = Some(vehicle.secondary_color);
        }
        EntityPayload::Ped(ped) => {
            doc.action = ped.action.map(|a| a.name().to_string());
            doc.relationship = ped.relationship.map(|r| r.name().to_string());
            doc.weapon = ped.weapon.clone();
        }
        EntityPayload::Pickup(pickup) => {
            doc.amount = Some(pickup.amount);
            doc.respawn_timer = Some(pickup.respawn_timer);
        }
    }

    doc
}

fn marker_document(marker: &Marker) -> MarkerDocument {
    MarkerDocument {
        kind: marker.kind.name().to_string(),
        position: marker.position.into(),
        rotation: marker.rotation.into(),
        scale: marker.scale.into(),
        teleport_target: marker.teleport_target.map(VectorDocument::from),
        red: marker.color.red,
        green: marker.color.green,
        blue: marker.color.blue,
        alpha: marker.color.alpha,
        bob_up_and_down: marker.bob_up_and_down,
        rotate_to_camera: marker.rotate_to_camera,
        only_visible_in_editor: marker.only_visible_in_editor,
        id: marker.id,
    }
}

fn metadata_document(metadata: &MapMetadata) -> Option<MetadataDocument> {
    let doc = MetadataDocument {
        creator: metadata.creator.clone(),
        name: metadata.name.clone(),
        description: metadata.description.clone(),
        loading_point: metadata.loading_point.map(VectorDocument::from),
        teleport_point: metadata.teleport_point.map(VectorDocument::from),
    };
    (doc != MetadataDocument::default()).then_some(doc)
}

/// Build the document for a map. Origin-placed objects are dropped here.
pub fn to_document(map: &Map) -> MapDocument {
    MapDocument {
        objects: ObjectListDocument {
            items: map.placed_objects().map(object_document).collect(),
        },
        remove_from_world: ObjectListDocument {
            items: map.removed_from_world.iter().map(object_document).collect(),
        },
        markers: MarkerListDocument {
            items: map.markers.iter().map(marker_document).collect(),
        },
        metadata: metadata_document(&map.metadata),
    }
}

// ============================================================================
// DOCUMENT -> MAP
// ============================================================================

fn invalid(reason: String) -> PersistenceError {
    PersistenceError::Deserialization(reason)
}

fn parse_field<T: std::str::FromStr<Err = String>>(
    value: &Option<String>,
) -> PersistenceResult<Option<T>> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<T>().map_err(invalid))
        .transpose()
}

/// Unknown actions fall back to the default instead of failing the whole map
fn parse_action(value: &Option<String>) -> Option<IdleAction> {
    let name = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
    match name.parse::<IdleAction>() {
        Ok(action) => Some(action),
        Err(e) => {
            log::warn!("[Xml] {}, using the default action", e);
            Some(IdleAction::default())
        }
    }
}

fn descriptor_from_document(doc: &MapObjectDocument) -> PersistenceResult<EntityDescriptor> {
    let category: EntityCategory = doc.kind.parse().map_err(invalid)?;

    let payload = match category {
        EntityCategory::Prop => EntityPayload::Prop(PropData {
            door: doc.door.unwrap_or(false),
            texture: doc.texture,
        }),
        EntityCategory::Vehicle => EntityPayload::Vehicle(VehicleData {
            sirens_active: doc.sirens_active.unwrap_or(false),
            primary_color: doc.primary_color.unwrap_or(0),
            secondary_color: doc.secondary_color.unwrap_or(0),
        }),
        EntityCategory::Ped => EntityPayload::Ped(PedData {
            action: parse_action(&doc.action),
            relationship: parse_field(&doc.relationship)?,
            weapon: doc.weapon.clone().filter(|w| !w.trim().is_empty()),
        }),
        EntityCategory::Pickup => EntityPayload::Pickup(PickupData {
            amount: doc.amount.unwrap_or(0),
            respawn_timer: doc.respawn_timer.unwrap_or(0),
        }),
        EntityCategory::Marker => {
            return Err(invalid("markers belong in <Markers>, not in an object list".to_string()))
        }
    };

    let stored: Quat = doc.quaternion.into();
    let orientation = if transform::is_unset_orientation(stored) {
        transform::euler_to_orientation(doc.rotation.into())
    } else {
        stored
    };

    Ok(EntityDescriptor {
        position: doc.position.into(),
        orientation,
        model_hash: doc.hash,
        dynamic: doc.dynamic,
        identifier: doc.id.clone().filter(|id| !id.is_empty()),
        payload,
    })
}

fn marker_from_document(doc: &MarkerDocument) -> PersistenceResult<Marker> {
    Ok(Marker {
        kind: doc.kind.parse().map_err(invalid)?,
        position: doc.position.into(),
        rotation: doc.rotation.into(),
        scale: doc.scale.into(),
        color: MarkerColor {
            red: doc.red,
            green: doc.green,
            blue: doc.blue,
            alpha: doc.alpha,
        },
        bob_up_and_down: doc.bob_up_and_down,
        rotate_to_camera: doc.rotate_to_camera,
        only_visible_in_editor: doc.only_visible_in_editor,
        // A nil target comes back as an empty element
        teleport_target: doc
            .teleport_target
            .map(Vec3::from)
            .filter(|target| !transform::is_origin(*target)),
        id: doc.id,
    })
}

/// Convert a parsed document into a map
pub fn from_document(doc: &MapDocument) -> PersistenceResult<Map> {
    let metadata = doc
        .metadata
        .as_ref()
        .map(|m| MapMetadata {
            creator: m.creator.clone(),
            name: m.name.clone(),
            description: m.description.clone(),
            loading_point: m.loading_point.map(Vec3::from),
            teleport_point: m.teleport_point.map(Vec3::from),
            filename: None,
        })
        .unwrap_or_default();

    Ok(Map {
        objects: doc
            .objects
            .items
            .iter()
            .map(descriptor_from_document)
            .collect::<PersistenceResult<_>>()?,
        removed_from_world: doc
            .remove_from_world
            .items
            .iter()
            .map(descriptor_from_document)
            .collect::<PersistenceResult<_>>()?,
        markers: doc
            .markers
            .items
            .iter()
            .map(marker_from_document)
            .collect::<PersistenceResult<_>>()?,
        metadata,
    })
}

// ============================================================================
// TEXT
// ============================================================================

/// Render a map as an indented XML document
pub fn render_xml(map: &Map) -> PersistenceResult<String> {
    let document = to_document(map);

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document
        .serialize(serializer)
        .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

    Ok(format!("{}{}\n", XML_DECLARATION, body))
}

pub fn parse_xml(text: &str) -> PersistenceResult<Map> {
    let document: MapDocument = quick_xml::de::from_str(text)
        .map_err(|e| PersistenceError::Deserialization(e.to_string()))?;
    from_document(&document)
}
