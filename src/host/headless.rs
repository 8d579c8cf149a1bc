//! Headless host - an in-memory world used when no engine is attached
//!
//! Backs the test suite and the conversion demo. Objects get sequential handles,
//! transforms are stored verbatim and every mutating call is recorded so callers
//! can check the order in which the editor touched an object.

use super::{ModelLoader, ModelRef, WorldHost};
use crate::entity::{Handle, IdleAction, Relationship};
use crate::transform;
use glam::{Quat, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

/// First handle handed out; real engines never use small integers either
const FIRST_HANDLE: i32 = 1000;

/// A recorded host call
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Spawn(Handle),
    Delete(Handle),
    SetPosition(Handle),
    SetRotation(Handle),
    SetOrientation(Handle),
    SetFrozen(Handle, bool),
}

#[derive(Debug, Clone)]
struct HostObject {
    model: i32,
    position: Vec3,
    orientation: Quat,
    frozen: bool,
}

/// In-memory host engine
#[derive(Debug, Default)]
pub struct HeadlessHost {
    objects: FxHashMap<Handle, HostObject>,
    next_handle: i32,
    calls: Vec<HostCall>,

    /// Spawns that will fail before spawning works again
    pub failing_spawns: u32,
    /// Hashes the model loader reports as nonexistent
    pub invalid_models: FxHashSet<i32>,
    /// Frames a model needs before it reports as loaded
    pub load_frames: u32,
    requested: FxHashMap<i32, u32>,
    pub frames_yielded: u32,

    pub sirens: FxHashMap<Handle, bool>,
    pub vehicle_colors: FxHashMap<Handle, (i32, i32)>,
    pub textures: FxHashMap<Handle, i32>,
    pub ped_actions: FxHashMap<Handle, IdleAction>,
    pub ped_relationships: FxHashMap<Handle, Relationship>,
    pub ped_weapons: FxHashMap<Handle, String>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            next_handle: FIRST_HANDLE,
            ..Default::default()
        }
    }

    /// Place an object that belongs to the world rather than to the editor
    pub fn place_world_object(&mut self, model: i32, position: Vec3) -> Handle {
        self.insert(model, position, Quat::IDENTITY)
    }

    pub fn exists(&self, handle: Handle) -> bool {
        self.objects.contains_key(&handle)
    }

    pub fn is_frozen(&self, handle: Handle) -> Option<bool> {
        self.objects.get(&handle).map(|o| o.frozen)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Calls made against one handle, in order
    pub fn calls_for(&self, handle: Handle) -> Vec<HostCall> {
        self.calls
            .iter()
            .filter(|call| match call {
                HostCall::Spawn(h)
                | HostCall::Delete(h)
                | HostCall::SetPosition(h)
                | HostCall::SetRotation(h)
                | HostCall::SetOrientation(h)
                | HostCall::SetFrozen(h, _) => *h == handle,
            })
            .cloned()
            .collect()
    }

    /// Take the recorded calls, leaving the log empty
    pub fn drain_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    fn insert(&mut self, model: i32, position: Vec3, orientation: Quat) -> Handle {
        if self.next_handle == 0 {
            self.next_handle = FIRST_HANDLE;
        }
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(
            handle,
            HostObject {
                model,
                position,
                orientation,
                frozen: false,
            },
        );
        self.calls.push(HostCall::Spawn(handle));
        handle
    }

    fn spawn(&mut self, model: ModelRef, position: Vec3, orientation: Quat) -> Option<Handle> {
        if self.failing_spawns > 0 {
            self.failing_spawns -= 1;
            return None;
        }
        Some(self.insert(model.hash(), position, orientation))
    }
}

impl WorldHost for HeadlessHost {
    fn spawn_prop(
        &mut self,
        model: ModelRef,
        position: Vec3,
        rotation: Vec3,
        _dynamic: bool,
    ) -> Option<Handle> {
        self.spawn(model, position, transform::euler_to_orientation(rotation))
    }

    fn spawn_vehicle(&mut self, model: ModelRef, position: Vec3, heading: f32) -> Option<Handle> {
        self.spawn(model, position, transform::heading_to_orientation(heading))
    }

    fn spawn_ped(&mut self, model: ModelRef, position: Vec3, heading: f32) -> Option<Handle> {
        self.spawn(model, position, transform::heading_to_orientation(heading))
    }

    fn spawn_pickup(
        &mut self,
        model: ModelRef,
        position: Vec3,
        heading: f32,
        _amount: i32,
    ) -> Option<Handle> {
        self.spawn(model, position, transform::heading_to_orientation(heading))
    }

    fn delete(&mut self, handle: Handle) {
        self.objects.remove(&handle);
        self.sirens.remove(&handle);
        self.vehicle_colors.remove(&handle);
        self.textures.remove(&handle);
        self.ped_actions.remove(&handle);
        self.ped_relationships.remove(&handle);
        self.ped_weapons.remove(&handle);
        self.calls.push(HostCall::Delete(handle));
    }

    fn set_position(&mut self, handle: Handle, position: Vec3) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.position = position;
        }
        self.calls.push(HostCall::SetPosition(handle));
    }

    fn set_rotation(&mut self, handle: Handle, rotation: Vec3) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.orientation = transform::euler_to_orientation(rotation);
        }
        self.calls.push(HostCall::SetRotation(handle));
    }

    fn set_orientation(&mut self, handle: Handle, orientation: Quat) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.orientation = orientation;
        }
        self.calls.push(HostCall::SetOrientation(handle));
    }

    fn set_frozen(&mut self, handle: Handle, frozen: bool) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.frozen = frozen;
        }
        self.calls.push(HostCall::SetFrozen(handle, frozen));
    }

    fn position(&self, handle: Handle) -> Option<Vec3> {
        self.objects.get(&handle).map(|o| o.position)
    }

    fn orientation(&self, handle: Handle) -> Option<Quat> {
        self.objects.get(&handle).map(|o| o.orientation)
    }

    fn model_of(&self, handle: Handle) -> Option<i32> {
        self.objects.get(&handle).map(|o| o.model)
    }

    fn closest_object(&self, position: Vec3, radius: f32, model: i32) -> Option<Handle> {
        self.objects
            .iter()
            .filter(|(_, o)| o.model == model)
            .map(|(h, o)| (*h, o.position.distance(position)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h)
    }

    fn set_siren(&mut self, handle: Handle, active: bool) {
        self.sirens.insert(handle, active);
    }

    fn set_vehicle_colors(&mut self, handle: Handle, primary: i32, secondary: i32) {
        self.vehicle_colors.insert(handle, (primary, secondary));
    }

    fn set_texture_variant(&mut self, handle: Handle, texture: i32) {
        self.textures.insert(handle, texture);
    }

    fn set_ped_action(&mut self, handle: Handle, action: IdleAction) {
        self.ped_actions.insert(handle, action);
    }

    fn set_ped_relationship(&mut self, handle: Handle, relationship: Relationship) {
        self.ped_relationships.insert(handle, relationship);
    }

    fn set_ped_weapon(&mut self, handle: Handle, weapon: &str) {
        self.ped_weapons.insert(handle, weapon.to_string());
    }
}

impl ModelLoader for HeadlessHost {
    fn is_valid(&self, hash: i32) -> bool {
        !self.invalid_models.contains(&hash)
    }

    fn request(&mut self, hash: i32) {
        self.requested.entry(hash).or_insert(0);
    }

    fn is_loaded(&self, hash: i32) -> bool {
        self.requested
            .get(&hash)
            .map(|frames| *frames >= self.load_frames)
            .unwrap_or(false)
    }

    fn yield_frame(&mut self) {
        self.frames_yielded += 1;
        for frames in self.requested.values_mut() {
            *frames += 1;
        }
    }

    fn hash_of_name(&self, name: &str) -> i32 {
        joaat(name)
    }
}

/// Jenkins one-at-a-time hash over the lowercased name, as engines hash model names
pub fn joaat(name: &str) -> i32 {
    let mut hash: u32 = 0;
    for byte in name.bytes().map(|b| b.to_ascii_lowercase()) {
        hash = hash.wrapping_add(byte as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joaat_known_value() {
        // "adder" is 0xB779A091
        assert_eq!(joaat("adder"), 0xB779A091u32 as i32);
        assert_eq!(joaat("ADDER"), joaat("adder"));
    }

    #[test]
    fn test_transient_spawn_failures() {
        let mut host = HeadlessHost::new();
        host.failing_spawns = 1;
        let model = ModelRef::resolved(5);
        assert!(host.spawn_vehicle(model, Vec3::ONE, 0.0).is_none());
        assert!(host.spawn_vehicle(model, Vec3::ONE, 0.0).is_some());
    }

    #[test]
    fn test_closest_object() {
        let mut host = HeadlessHost::new();
        let near = host.place_world_object(9, Vec3::new(1.0, 0.0, 0.0));
        host.place_world_object(9, Vec3::new(50.0, 0.0, 0.0));
        host.place_world_object(8, Vec3::new(1.0, 0.1, 0.0));
        assert_eq!(host.closest_object(Vec3::new(1.2, 0.0, 0.0), 1.0, 9), Some(near));
        assert_eq!(host.closest_object(Vec3::new(20.0, 0.0, 0.0), 1.0, 9), None);
    }

    #[test]
    fn test_drain_calls_empties_the_log() {
        let mut host = HeadlessHost::new();
        let handle = host.place_world_object(3, Vec3::ONE);
        host.set_frozen(handle, true);

        assert_eq!(
            host.drain_calls(),
            vec![HostCall::Spawn(handle), HostCall::SetFrozen(handle, true)]
        );
        assert!(host.calls_for(handle).is_empty());
        assert!(host.drain_calls().is_empty());

        host.delete(handle);
        assert_eq!(host.calls_for(handle), vec![HostCall::Delete(handle)]);
    }

    #[test]
    fn test_model_streaming() {
        let mut host = HeadlessHost::new();
        host.load_frames = 2;
        host.request(7);
        assert!(!host.is_loaded(7));
        host.yield_frame();
        host.yield_frame();
        assert!(host.is_loaded(7));
    }
}
