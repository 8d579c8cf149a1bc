//! Map Document Data - the XML layout of a map file
//!
//! Element names are part of the file format and must not change.
//! Optional elements are skipped when empty and default when absent.

use crate::transform;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorDocument {
    #[serde(rename = "X")]
    pub x: f32,
    #[serde(rename = "Y")]
    pub y: f32,
    #[serde(rename = "Z")]
    pub z: f32,
}

impl From<Vec3> for VectorDocument {
    fn from(v: Vec3) -> Self {
        let v = transform::unsigned_zero_vec(v);
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<VectorDocument> for Vec3 {
    fn from(v: VectorDocument) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuaternionDocument {
    #[serde(rename = "X")]
    pub x: f32,
    #[serde(rename = "Y")]
    pub y: f32,
    #[serde(rename = "Z")]
    pub z: f32,
    #[serde(rename = "W")]
    pub w: f32,
}

impl From<Quat> for QuaternionDocument {
    fn from(q: Quat) -> Self {
        let q = transform::unsigned_zero_quat(q);
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<QuaternionDocument> for Quat {
    fn from(q: QuaternionDocument) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

/// `<MapObject>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapObjectDocument {
    #[serde(rename = "Type", default = "default_object_type")]
    pub kind: String,
    #[serde(rename = "Position", default)]
    pub position: VectorDocument,
    #[serde(rename = "Rotation", default)]
    pub rotation: VectorDocument,
    #[serde(rename = "Hash", default)]
    pub hash: i32,
    #[serde(rename = "Dynamic", default)]
    pub dynamic: bool,
    #[serde(rename = "Quaternion", default)]
    pub quaternion: QuaternionDocument,

    #[serde(rename = "Door", default, skip_serializing_if = "Option::is_none")]
    pub door: Option<bool>,
    #[serde(rename = "Texture", default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<i32>,
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "Action", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(rename = "Relationship", default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(rename = "Weapon", default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,

    #[serde(rename = "SirensActive", default, skip_serializing_if = "Option::is_none")]
    pub sirens_active: Option<bool>,
    #[serde(rename = "PrimaryColor", default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<i32>,
    #[serde(rename = "SecondaryColor", default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<i32>,

    #[serde(rename = "Amount", default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i32>,
    #[serde(rename = "RespawnTimer", default, skip_serializing_if = "Option::is_none")]
    pub respawn_timer: Option<i32>,
}

fn default_object_type() -> String {
    "Prop".to_string()
}

/// `<Marker>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerDocument {
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Position", default)]
    pub position: VectorDocument,
    #[serde(rename = "Rotation", default)]
    pub rotation: VectorDocument,
    #[serde(rename = "Scale", default)]
    pub scale: VectorDocument,
    #[serde(rename = "TeleportTarget", default, skip_serializing_if = "Option::is_none")]
    pub teleport_target: Option<VectorDocument>,
    #[serde(rename = "Red", default)]
    pub red: i32,
    #[serde(rename = "Green", default)]
    pub green: i32,
    #[serde(rename = "Blue", default)]
    pub blue: i32,
    #[serde(rename = "Alpha", default)]
    pub alpha: i32,
    #[serde(rename = "BobUpAndDown", default)]
    pub bob_up_and_down: bool,
    #[serde(rename = "RotateToCamera", default)]
    pub rotate_to_camera: bool,
    #[serde(rename = "OnlyVisibleInEditor", default)]
    pub only_visible_in_editor: bool,
    #[serde(rename = "Id", default)]
    pub id: i32,
}

/// `<Metadata>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(rename = "Creator", default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "LoadingPoint", default, skip_serializing_if = "Option::is_none")]
    pub loading_point: Option<VectorDocument>,
    #[serde(rename = "TeleportPoint", default, skip_serializing_if = "Option::is_none")]
    pub teleport_point: Option<VectorDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectListDocument {
    #[serde(rename = "MapObject", default)]
    pub items: Vec<MapObjectDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerListDocument {
    #[serde(rename = "Marker", default)]
    pub items: Vec<MarkerDocument>,
}

/// `<Map>` root element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Map")]
pub struct MapDocument {
    #[serde(rename = "Objects", default)]
    pub objects: ObjectListDocument,
    #[serde(rename = "RemoveFromWorld", default)]
    pub remove_from_world: ObjectListDocument,
    #[serde(rename = "Markers", default)]
    pub markers: MarkerListDocument,
    #[serde(rename = "Metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataDocument>,
}
