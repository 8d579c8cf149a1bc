//! Registry Operations - creating, mutating and removing live entities
//!
//! Free functions over `RegistryData`. Every function that touches a live
//! object takes the host explicitly; the registry never holds on to it.

use super::registry_data::{EntityRecord, MetadataCensus, RegistryData};
use crate::constants;
use crate::entity::{
    EntityCategory, EntityDescriptor, EntityPayload, Handle, IdleAction, PedData, PickupData,
    PropData, Relationship, VehicleData,
};
use crate::error::{EditorError, EditorResult, OptionExt};
use crate::host::{ModelRef, WorldHost};
use glam::{Quat, Vec3};
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;

lazy_static! {
    /// Identifications may not start with a digit or with `.`, `,` or `\`
    static ref FORBIDDEN_IDENTIFIER_START: Regex = Regex::new(r"^[\d.,\\]").expect("valid regex");
}

fn insert_record(
    data: &mut RegistryData,
    handle: Handle,
    payload: EntityPayload,
    model: ModelRef,
    dynamic: bool,
) {
    let category = payload.category();
    let record = EntityRecord {
        payload,
        model_hash: model.hash(),
        dynamic,
        identifier: None,
        sequence: data.next_sequence,
    };
    data.next_sequence += 1;

    if let Some(previous) = data.records.insert(handle, record) {
        // Host reused a handle we still tracked; the old object is gone
        log::warn!("[Registry] Handle {} reused by host, dropping stale record", handle);
        data.counts[previous.category().snapshot_rank()] -= 1;
    }
    data.counts[category.snapshot_rank()] += 1;
    log::debug!("[Registry] Created {} {} (model {})", category, handle, model.hash());
}

// ============================================================================
// CREATION
// ============================================================================

/// Create a prop
///
/// # Arguments
/// * `data` - Registry to record the prop in
/// * `host` - Host that spawns the object
/// * `model` - Resolved model
/// * `position` - World position
/// * `rotation` - Euler rotation in degrees
/// * `dynamic` - `false` freezes the prop in place
/// * `orientation` - Applied after the rotation and wins over it
///
/// # Returns
/// The host handle, `CapacityExceeded` at the prop ceiling or `SpawnFailed`
pub fn create_prop(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    model: ModelRef,
    position: Vec3,
    rotation: Vec3,
    dynamic: bool,
    orientation: Option<Quat>,
) -> EditorResult<Handle> {
    if let Err(e) = data.capacity.check_prop_capacity(prop_count(data)) {
        log::warn!("[Registry] {}", e);
        return Err(e);
    }

    let handle = host
        .spawn_prop(model, position, rotation, dynamic)
        .ok_or_editor(|| EditorError::SpawnFailed {
            model: model.hash(),
            attempts: 1,
        })?;

    insert_record(data, handle, EntityPayload::Prop(PropData::default()), model, dynamic);

    if !dynamic {
        host.set_frozen(handle, true);
    }
    host.set_position(handle, position);
    host.set_rotation(handle, rotation);
    if let Some(orientation) = orientation {
        host.set_orientation(handle, orientation);
    }

    Ok(handle)
}

/// Create a vehicle, retrying the host spawn up to `data.spawn_attempts` times.
/// Sirens start inactive.
pub fn create_vehicle(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    model: ModelRef,
    position: Vec3,
    heading: f32,
    dynamic: bool,
    orientation: Option<Quat>,
) -> EditorResult<Handle> {
    let attempts = data.spawn_attempts.max(1);
    let handle = (0..attempts)
        .find_map(|attempt| {
            let spawned = host.spawn_vehicle(model, position, heading);
            if spawned.is_none() {
                log::debug!(
                    "[Registry] Vehicle spawn attempt {}/{} failed",
                    attempt + 1,
                    attempts
                );
            }
            spawned
        })
        .ok_or_editor(|| EditorError::SpawnFailed {
            model: model.hash(),
            attempts,
        })?;

    insert_record(
        data,
        handle,
        EntityPayload::Vehicle(VehicleData::default()),
        model,
        dynamic,
    );

    if !dynamic {
        host.set_frozen(handle, true);
    }
    if let Some(orientation) = orientation {
        host.set_orientation(handle, orientation);
    }
    host.set_siren(handle, false);

    Ok(handle)
}

/// Create a ped. Its action, relationship and weapon start unpopulated;
/// call [`populate_ped_defaults`] or the `set_ped_*` functions afterwards.
pub fn create_ped(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    model: ModelRef,
    position: Vec3,
    heading: f32,
    dynamic: bool,
    orientation: Option<Quat>,
) -> EditorResult<Handle> {
    let handle = host
        .spawn_ped(model, position, heading)
        .ok_or_editor(|| EditorError::SpawnFailed {
            model: model.hash(),
            attempts: 1,
        })?;

    insert_record(data, handle, EntityPayload::Ped(PedData::default()), model, dynamic);

    if !dynamic {
        host.set_frozen(handle, true);
    }
    if let Some(orientation) = orientation {
        host.set_orientation(handle, orientation);
    }

    Ok(handle)
}

/// Create a pickup
pub fn create_pickup(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    model: ModelRef,
    position: Vec3,
    heading: f32,
    amount: i32,
    respawn_timer: i32,
    dynamic: bool,
) -> EditorResult<Handle> {
    let handle = host
        .spawn_pickup(model, position, heading, amount)
        .ok_or_editor(|| EditorError::SpawnFailed {
            model: model.hash(),
            attempts: 1,
        })?;

    insert_record(
        data,
        handle,
        EntityPayload::Pickup(PickupData {
            amount,
            respawn_timer,
        }),
        model,
        dynamic,
    );

    if !dynamic {
        host.set_frozen(handle, true);
    }

    Ok(handle)
}

// ============================================================================
// REMOVAL
// ============================================================================

/// Delete an entity and every piece of metadata attached to it.
/// Returns `false` when the handle was not ours; that is not an error.
pub fn remove_entity(data: &mut RegistryData, host: &mut dyn WorldHost, handle: Handle) -> bool {
    let Some(record) = data.records.remove(&handle) else {
        return false;
    };

    host.delete(handle);
    data.counts[record.category().snapshot_rank()] -= 1;
    log::debug!("[Registry] Removed {} {}", record.category(), handle);
    true
}

/// Delete every entity. Returns how many were removed.
pub fn clear_all(data: &mut RegistryData, host: &mut dyn WorldHost) -> usize {
    let handles: Vec<Handle> = data.records.keys().copied().collect();
    for handle in &handles {
        host.delete(*handle);
    }
    data.records.clear();
    data.counts = [0; 5];
    log::debug!("[Registry] Cleared {} entities", handles.len());
    handles.len()
}

// ============================================================================
// QUERIES
// ============================================================================

pub fn prop_count(data: &RegistryData) -> usize {
    count_of(data, EntityCategory::Prop)
}

pub fn count_of(data: &RegistryData, category: EntityCategory) -> usize {
    data.counts[category.snapshot_rank()]
}

/// Live entities of every category
pub fn entity_count(data: &RegistryData) -> usize {
    data.records.len()
}

pub fn category_of(data: &RegistryData, handle: Handle) -> Option<EntityCategory> {
    data.records.get(&handle).map(EntityRecord::category)
}

/// Whether the entity was created (or later set) non-dynamic
pub fn is_static(data: &RegistryData, handle: Handle) -> bool {
    data.records
        .get(&handle)
        .map(|record| !record.dynamic)
        .unwrap_or(false)
}

/// Every handle the editor owns
pub fn get_all_handles(data: &RegistryData) -> FxHashSet<Handle> {
    data.records.keys().copied().collect()
}

/// Handles in snapshot order: props, vehicles, peds, pickups; creation order within
pub fn ordered_handles(data: &RegistryData) -> Vec<Handle> {
    let mut handles: Vec<(&Handle, &EntityRecord)> = data.records.iter().collect();
    handles.sort_by_key(|(_, record)| (record.category().snapshot_rank(), record.sequence));
    handles.into_iter().map(|(handle, _)| *handle).collect()
}

/// Describe one entity as it should be serialized, reading its transform
/// from the host. Unpopulated ped fields come out as their defaults.
pub fn describe_entity(
    data: &RegistryData,
    host: &dyn WorldHost,
    handle: Handle,
) -> Option<EntityDescriptor> {
    let record = data.records.get(&handle)?;
    let position = host.position(handle)?;
    let orientation = host.orientation(handle)?;

    let payload = match &record.payload {
        EntityPayload::Ped(ped) => EntityPayload::Ped(PedData {
            action: Some(ped.action_or_default()),
            relationship: Some(ped.relationship_or_default()),
            weapon: Some(ped.weapon_or_default().to_string()),
        }),
        other => other.clone(),
    };

    Some(EntityDescriptor {
        position,
        orientation,
        model_hash: record.model_hash,
        dynamic: record.dynamic,
        identifier: record.identifier.clone(),
        payload,
    })
}

/// Snapshot of every live entity, in snapshot order
pub fn get_all_entities(data: &RegistryData, host: &dyn WorldHost) -> Vec<EntityDescriptor> {
    ordered_handles(data)
        .into_iter()
        .filter_map(|handle| {
            let descriptor = describe_entity(data, host, handle);
            if descriptor.is_none() {
                log::warn!("[Registry] Host lost track of {}, skipping it", handle);
            }
            descriptor
        })
        .collect()
}

/// Count populated side-table entries
pub fn metadata_census(data: &RegistryData) -> MetadataCensus {
    let mut census = MetadataCensus::default();
    for record in data.records.values() {
        if !record.dynamic {
            census.statics += 1;
        }
        if record.identifier.is_some() {
            census.identifiers += 1;
        }
        match &record.payload {
            EntityPayload::Prop(prop) => {
                census.doors += prop.door as usize;
                census.textures += prop.texture.is_some() as usize;
            }
            EntityPayload::Vehicle(_) => census.sirens += 1,
            EntityPayload::Ped(ped) => {
                census.ped_actions += ped.action.is_some() as usize;
                census.ped_relationships += ped.relationship.is_some() as usize;
                census.ped_weapons += ped.weapon.is_some() as usize;
            }
            EntityPayload::Pickup(_) => {}
        }
    }
    census
}

// ============================================================================
// MUTATION
// ============================================================================

fn record_mut(data: &mut RegistryData, handle: Handle) -> EditorResult<&mut EntityRecord> {
    data.records
        .get_mut(&handle)
        .ok_or_editor(|| EditorError::UnknownHandle(handle))
}

fn wrong_category(category: EntityCategory, operation: &'static str) -> EditorError {
    EditorError::WrongCategory {
        category: category.name(),
        operation,
    }
}

/// Freeze or unfreeze an entity
pub fn set_dynamic(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    dynamic: bool,
) -> EditorResult<()> {
    let record = record_mut(data, handle)?;
    record.dynamic = dynamic;
    let door = matches!(&record.payload, EntityPayload::Prop(PropData { door: true, .. }));
    // Doors swing freely whatever the flag says
    host.set_frozen(handle, !dynamic && !door);
    Ok(())
}

/// Check an identification for characters the scripting side cannot address
pub fn validate_identifier(identifier: &str) -> EditorResult<()> {
    if identifier.chars().count() > constants::registry::MAX_IDENTIFIER_LEN
        || FORBIDDEN_IDENTIFIER_START.is_match(identifier)
    {
        return Err(EditorError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(())
}

/// Set or clear (empty string) an entity's identification.
/// Identifications are unique among live entities.
pub fn set_identifier(data: &mut RegistryData, handle: Handle, identifier: &str) -> EditorResult<()> {
    if !data.contains(handle) {
        return Err(EditorError::UnknownHandle(handle));
    }

    if identifier.is_empty() {
        record_mut(data, handle)?.identifier = None;
        return Ok(());
    }

    validate_identifier(identifier)?;
    if let Some(owner) = find_by_identifier(data, identifier) {
        if owner != handle {
            return Err(EditorError::DuplicateIdentifier(identifier.to_string()));
        }
    }

    record_mut(data, handle)?.identifier = Some(identifier.to_string());
    Ok(())
}

pub fn find_by_identifier(data: &RegistryData, identifier: &str) -> Option<Handle> {
    data.records
        .iter()
        .find(|(_, record)| record.identifier.as_deref() == Some(identifier))
        .map(|(handle, _)| *handle)
}

/// Mark a prop as a door. Doors are never frozen.
pub fn set_door(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    door: bool,
) -> EditorResult<()> {
    let record = record_mut(data, handle)?;
    let category = record.category();
    let EntityPayload::Prop(prop) = &mut record.payload else {
        return Err(wrong_category(category, "set_door"));
    };
    prop.door = door;
    host.set_frozen(handle, !door && !record.dynamic);
    Ok(())
}

pub fn set_texture_variant(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    texture: i32,
) -> EditorResult<()> {
    let record = record_mut(data, handle)?;
    let category = record.category();
    let EntityPayload::Prop(prop) = &mut record.payload else {
        return Err(wrong_category(category, "set_texture_variant"));
    };
    prop.texture = Some(texture);
    host.set_texture_variant(handle, texture);
    Ok(())
}

pub fn set_siren(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    active: bool,
) -> EditorResult<()> {
    let record = record_mut(data, handle)?;
    let category = record.category();
    let EntityPayload::Vehicle(vehicle) = &mut record.payload else {
        return Err(wrong_category(category, "set_siren"));
    };
    vehicle.sirens_active = active;
    host.set_siren(handle, active);
    Ok(())
}

pub fn set_vehicle_colors(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    primary: i32,
    secondary: i32,
) -> EditorResult<()> {
    let record = record_mut(data, handle)?;
    let category = record.category();
    let EntityPayload::Vehicle(vehicle) = &mut record.payload else {
        return Err(wrong_category(category, "set_vehicle_colors"));
    };
    vehicle.primary_color = primary;
    vehicle.secondary_color = secondary;
    host.set_vehicle_colors(handle, primary, secondary);
    Ok(())
}

fn ped_mut<'a>(
    data: &'a mut RegistryData,
    handle: Handle,
    operation: &'static str,
) -> EditorResult<&'a mut PedData> {
    let record = record_mut(data, handle)?;
    let category = record.category();
    match &mut record.payload {
        EntityPayload::Ped(ped) => Ok(ped),
        _ => Err(wrong_category(category, operation)),
    }
}

pub fn set_ped_action(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    action: IdleAction,
) -> EditorResult<()> {
    ped_mut(data, handle, "set_ped_action")?.action = Some(action);
    host.set_ped_action(handle, action);
    Ok(())
}

pub fn set_ped_relationship(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    relationship: Relationship,
) -> EditorResult<()> {
    ped_mut(data, handle, "set_ped_relationship")?.relationship = Some(relationship);
    host.set_ped_relationship(handle, relationship);
    Ok(())
}

pub fn set_ped_weapon(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
    weapon: &str,
) -> EditorResult<()> {
    ped_mut(data, handle, "set_ped_weapon")?.weapon = Some(weapon.to_string());
    host.set_ped_weapon(handle, weapon);
    Ok(())
}

/// Fill whichever ped fields are still unpopulated with their defaults
pub fn populate_ped_defaults(
    data: &mut RegistryData,
    host: &mut dyn WorldHost,
    handle: Handle,
) -> EditorResult<()> {
    let ped = ped_mut(data, handle, "populate_ped_defaults")?;
    let defaults = PedData::with_defaults();

    if ped.action.is_none() {
        ped.action = defaults.action;
    }
    if ped.relationship.is_none() {
        ped.relationship = defaults.relationship;
    }
    if ped.weapon.is_none() {
        ped.weapon = defaults.weapon;
    }

    let (action, relationship, weapon) = (
        ped.action_or_default(),
        ped.relationship_or_default(),
        ped.weapon_or_default().to_string(),
    );
    host.set_ped_action(handle, action);
    host.set_ped_relationship(handle, relationship);
    host.set_ped_weapon(handle, &weapon);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, HostCall};
    use crate::registry::CapacityGovernor;

    fn model(hash: i32) -> ModelRef {
        ModelRef::resolved(hash)
    }

    fn place_prop(data: &mut RegistryData, host: &mut HeadlessHost, x: f32) -> Handle {
        create_prop(data, host, model(1), Vec3::new(x, 1.0, 1.0), Vec3::ZERO, true, None)
            .expect("prop placed")
    }

    #[test]
    fn test_prop_ceiling() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();

        let mut handles = FxHashSet::default();
        for i in 0..2048 {
            handles.insert(place_prop(&mut data, &mut host, i as f32));
        }
        assert_eq!(handles.len(), 2048);

        let refused = create_prop(
            &mut data,
            &mut host,
            model(1),
            Vec3::ONE,
            Vec3::ZERO,
            true,
            None,
        );
        assert!(matches!(
            refused,
            Err(EditorError::CapacityExceeded { limit: 2048 })
        ));
        assert_eq!(prop_count(&data), 2048);
        assert_eq!(host.object_count(), 2048);
    }

    #[test]
    fn test_ceiling_ignores_other_categories() {
        let mut data = RegistryData::new();
        data.capacity = CapacityGovernor::new(1);
        let mut host = HeadlessHost::new();

        place_prop(&mut data, &mut host, 1.0);
        assert!(create_vehicle(&mut data, &mut host, model(2), Vec3::ONE, 0.0, true, None).is_ok());
        assert!(create_ped(&mut data, &mut host, model(3), Vec3::ONE, 0.0, true, None).is_ok());
    }

    #[test]
    fn test_prop_transform_order() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        let orientation = Quat::from_rotation_z(1.0);

        let handle = create_prop(
            &mut data,
            &mut host,
            model(1),
            Vec3::ONE,
            Vec3::new(0.0, 0.0, 45.0),
            false,
            Some(orientation),
        )
        .expect("placed");

        assert_eq!(
            host.calls_for(handle),
            vec![
                HostCall::Spawn(handle),
                HostCall::SetFrozen(handle, true),
                HostCall::SetPosition(handle),
                HostCall::SetRotation(handle),
                HostCall::SetOrientation(handle),
            ]
        );
        // Orientation wins over the Euler rotation
        assert_eq!(host.orientation(handle), Some(orientation));
        assert!(is_static(&data, handle));
    }

    #[test]
    fn test_vehicle_spawn_retries() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();

        host.failing_spawns = 2;
        let handle = create_vehicle(&mut data, &mut host, model(2), Vec3::ONE, 0.0, true, None)
            .expect("third attempt succeeds");
        assert_eq!(category_of(&data, handle), Some(EntityCategory::Vehicle));
        assert_eq!(host.sirens.get(&handle), Some(&false));

        host.failing_spawns = 3;
        let failed = create_vehicle(&mut data, &mut host, model(2), Vec3::ONE, 0.0, true, None);
        assert!(matches!(
            failed,
            Err(EditorError::SpawnFailed { model: 2, attempts: 3 })
        ));
        assert_eq!(entity_count(&data), 1);
    }

    #[test]
    fn test_failed_spawns_leave_registry_unchanged() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        let kept = place_prop(&mut data, &mut host, 1.0);

        host.failing_spawns = 1;
        let prop = create_prop(&mut data, &mut host, model(4), Vec3::ONE, Vec3::ZERO, false, None);
        assert!(matches!(
            prop,
            Err(EditorError::SpawnFailed { model: 4, attempts: 1 })
        ));

        host.failing_spawns = 1;
        let ped = create_ped(&mut data, &mut host, model(5), Vec3::ONE, 0.0, true, None);
        assert!(matches!(
            ped,
            Err(EditorError::SpawnFailed { model: 5, attempts: 1 })
        ));

        host.failing_spawns = 1;
        let pickup = create_pickup(&mut data, &mut host, model(6), Vec3::ONE, 0.0, 10, 5, true);
        assert!(matches!(
            pickup,
            Err(EditorError::SpawnFailed { model: 6, attempts: 1 })
        ));

        assert_eq!(entity_count(&data), 1);
        assert_eq!(prop_count(&data), 1);
        assert_eq!(count_of(&data, EntityCategory::Ped), 0);
        assert_eq!(count_of(&data, EntityCategory::Pickup), 0);
        assert_eq!(ordered_handles(&data), vec![kept]);
        assert_eq!(host.object_count(), 1);
        let census = metadata_census(&data);
        assert_eq!(census.ped_entries(), 0);
        assert_eq!(census.statics, 0);
    }

    #[test]
    fn test_ped_removal_clears_ped_metadata() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();

        let ped = create_ped(&mut data, &mut host, model(3), Vec3::ONE, 0.0, true, None)
            .expect("ped");
        populate_ped_defaults(&mut data, &mut host, ped).expect("populated");
        let vehicle = create_vehicle(&mut data, &mut host, model(2), Vec3::ONE, 0.0, true, None)
            .expect("vehicle");

        // Removing the vehicle leaves the ped's metadata alone
        assert!(remove_entity(&mut data, &mut host, vehicle));
        let census = metadata_census(&data);
        assert_eq!(census.ped_entries(), 3);
        assert_eq!(census.sirens, 0);

        assert!(remove_entity(&mut data, &mut host, ped));
        assert_eq!(metadata_census(&data), MetadataCensus::default());
        assert!(!host.exists(ped));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        let handle = place_prop(&mut data, &mut host, 1.0);

        assert!(remove_entity(&mut data, &mut host, handle));
        assert!(!remove_entity(&mut data, &mut host, handle));
        assert!(!remove_entity(&mut data, &mut host, Handle(-1)));
        assert_eq!(prop_count(&data), 0);
    }

    #[test]
    fn test_snapshot_order() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();

        let ped = create_ped(&mut data, &mut host, model(3), Vec3::ONE, 0.0, true, None)
            .expect("ped");
        let vehicle = create_vehicle(&mut data, &mut host, model(2), Vec3::ONE, 0.0, true, None)
            .expect("vehicle");
        let first = place_prop(&mut data, &mut host, 1.0);
        let second = place_prop(&mut data, &mut host, 2.0);

        assert_eq!(ordered_handles(&data), vec![first, second, vehicle, ped]);

        let snapshot = get_all_entities(&data, &host);
        let categories: Vec<EntityCategory> = snapshot.iter().map(|d| d.category()).collect();
        assert_eq!(
            categories,
            vec![
                EntityCategory::Prop,
                EntityCategory::Prop,
                EntityCategory::Vehicle,
                EntityCategory::Ped
            ]
        );
        assert_eq!(snapshot[1].position, Vec3::new(2.0, 1.0, 1.0));

        // Unpopulated ped fields are written as their defaults
        let EntityPayload::Ped(ped_data) = &snapshot[3].payload else {
            panic!("expected ped payload");
        };
        assert_eq!(ped_data, &PedData::with_defaults());
    }

    #[test]
    fn test_handles_union() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        let prop = place_prop(&mut data, &mut host, 1.0);
        let pickup = create_pickup(&mut data, &mut host, model(4), Vec3::ONE, 0.0, 10, 60, true)
            .expect("pickup");
        let world = host.place_world_object(9, Vec3::ONE);

        let handles = get_all_handles(&data);
        assert!(handles.contains(&prop));
        assert!(handles.contains(&pickup));
        assert!(!handles.contains(&world));
    }

    #[test]
    fn test_identifiers() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        let a = place_prop(&mut data, &mut host, 1.0);
        let b = place_prop(&mut data, &mut host, 2.0);

        set_identifier(&mut data, a, "gate").expect("valid");
        assert_eq!(find_by_identifier(&data, "gate"), Some(a));
        assert!(set_identifier(&mut data, a, "gate").is_ok());
        assert!(matches!(
            set_identifier(&mut data, b, "gate"),
            Err(EditorError::DuplicateIdentifier(_))
        ));

        for bad in ["1gate", ".gate", ",gate", "\\gate", "an_identifier_far_too_long"] {
            assert!(
                matches!(
                    set_identifier(&mut data, b, bad),
                    Err(EditorError::InvalidIdentifier(_))
                ),
                "{} should be rejected",
                bad
            );
        }

        set_identifier(&mut data, a, "").expect("cleared");
        assert_eq!(find_by_identifier(&data, "gate"), None);
        assert!(matches!(
            set_identifier(&mut data, Handle(5), "x"),
            Err(EditorError::UnknownHandle(_))
        ));
    }

    #[test]
    fn test_category_checked_metadata() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        let prop = place_prop(&mut data, &mut host, 1.0);

        assert!(matches!(
            set_siren(&mut data, &mut host, prop, true),
            Err(EditorError::WrongCategory { category: "Prop", .. })
        ));
        assert!(set_ped_weapon(&mut data, &mut host, prop, "Pistol").is_err());

        set_texture_variant(&mut data, &mut host, prop, 3).expect("prop texture");
        assert_eq!(host.textures.get(&prop), Some(&3));
    }

    #[test]
    fn test_doors_stay_unfrozen() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        let door = create_prop(&mut data, &mut host, model(1), Vec3::ONE, Vec3::ZERO, false, None)
            .expect("placed");
        assert_eq!(host.is_frozen(door), Some(true));

        set_door(&mut data, &mut host, door, true).expect("door");
        assert_eq!(host.is_frozen(door), Some(false));
        set_dynamic(&mut data, &mut host, door, false).expect("still a door");
        assert_eq!(host.is_frozen(door), Some(false));
        assert!(is_static(&data, door));
    }

    #[test]
    fn test_clear_all() {
        let mut data = RegistryData::new();
        let mut host = HeadlessHost::new();
        place_prop(&mut data, &mut host, 1.0);
        create_ped(&mut data, &mut host, model(3), Vec3::ONE, 0.0, true, None).expect("ped");

        assert_eq!(clear_all(&mut data, &mut host), 2);
        assert!(data.is_empty());
        assert_eq!(host.object_count(), 0);
        assert_eq!(count_of(&data, EntityCategory::Ped), 0);
    }
}
