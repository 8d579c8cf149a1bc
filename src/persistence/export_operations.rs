//! Export Operations - one-way renderings of a map
//!
//! Neither output can be loaded back. Origin-placed objects are skipped.

use crate::catalog::ModelCatalog;
use crate::entity::{EntityCategory, EntityDescriptor, Map};
use crate::transform;

/// One spawn statement per object in the host's scripting API
pub fn render_csharp(map: &Map) -> String {
    map.placed_objects()
        .filter_map(spawn_statement)
        .map(|statement| statement + "\r\n")
        .collect()
}

fn spawn_statement(object: &EntityDescriptor) -> Option<String> {
    let p = transform::unsigned_zero_vec(object.position);
    let r = object.rotation();
    match object.category() {
        EntityCategory::Prop => Some(format!(
            "GTA.World.CreateProp(new Model({}), new GTA.Math.Vector3({}f, {}f, {}f), new GTA.Math.Vector3({}f, {}f, {}f), false, false);",
            object.model_hash, p.x, p.y, p.z, r.x, r.y, r.z
        )),
        EntityCategory::Vehicle => Some(format!(
            "GTA.World.CreateVehicle(new Model({}), new GTA.Math.Vector3({}f, {}f, {}f), {}f);",
            object.model_hash, p.x, p.y, p.z, r.z
        )),
        EntityCategory::Ped => Some(format!(
            "GTA.World.CreatePed(new Model({}), new GTA.Math.Vector3({}f, {}f, {}f), {}f);",
            object.model_hash, p.x, p.y, p.z, r.z
        )),
        // The scripting API has no plain pickup constructor
        EntityCategory::Pickup | EntityCategory::Marker => None,
    }
}

/// Model name for a hash, looked up in the table for its category.
/// Unknown models fall back to the hex hash.
fn model_name(catalog: &ModelCatalog, object: &EntityDescriptor) -> String {
    let table = match object.category() {
        EntityCategory::Prop => Some(&catalog.props),
        EntityCategory::Vehicle => Some(&catalog.vehicles),
        EntityCategory::Ped => Some(&catalog.peds),
        EntityCategory::Pickup | EntityCategory::Marker => None,
    };

    table
        .and_then(|t| t.name_of(object.model_hash))
        .or_else(|| catalog.name_of(object.model_hash))
        .map(str::to_string)
        .unwrap_or_else(|| format!("0x{:08X}", object.model_hash as u32))
}

/// Human-readable coordinate dump
pub fn render_raw(map: &Map, catalog: &ModelCatalog) -> String {
    map.placed_objects()
        .map(|object| {
            let p = transform::unsigned_zero_vec(object.position);
            let r = object.rotation();
            format!(
                "{} name = {}, hash = {}, x = {}, y = {}, z = {}, rotationx = {}, rotationy = {}, rotationz = {}\r\n",
                object.category(),
                model_name(catalog, object),
                object.model_hash,
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z
            )
        })
        .collect()
}
