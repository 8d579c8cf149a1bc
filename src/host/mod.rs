//! Host collaborator interfaces
//!
//! The editor never simulates anything itself. Spawning, deleting and moving
//! objects, as well as model streaming, are delegated to the host engine through
//! the two traits below. `HeadlessHost` implements both in memory.

mod headless;

pub use headless::{joaat, HeadlessHost, HostCall};

use crate::entity::{Handle, IdleAction, Relationship};
use glam::{Quat, Vec3};

/// A model hash that passed validation by the model loader.
/// Only `catalog::resolve_model` hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelRef {
    hash: i32,
}

impl ModelRef {
    pub(crate) fn resolved(hash: i32) -> Self {
        Self { hash }
    }

    pub fn hash(self) -> i32 {
        self.hash
    }
}

/// Model streaming side of the host engine
pub trait ModelLoader {
    /// Whether the hash names an asset that exists at all
    fn is_valid(&self, hash: i32) -> bool;

    /// Ask the engine to stream the model in
    fn request(&mut self, hash: i32);

    fn is_loaded(&self, hash: i32) -> bool;

    /// Give the engine one frame to make progress
    fn yield_frame(&mut self);

    /// Hash the engine derives from a model name
    fn hash_of_name(&self, name: &str) -> i32;
}

/// World side of the host engine
pub trait WorldHost {
    fn spawn_prop(&mut self, model: ModelRef, position: Vec3, rotation: Vec3, dynamic: bool)
        -> Option<Handle>;

    fn spawn_vehicle(&mut self, model: ModelRef, position: Vec3, heading: f32) -> Option<Handle>;

    fn spawn_ped(&mut self, model: ModelRef, position: Vec3, heading: f32) -> Option<Handle>;

    fn spawn_pickup(
        &mut self,
        model: ModelRef,
        position: Vec3,
        heading: f32,
        amount: i32,
    ) -> Option<Handle>;

    fn delete(&mut self, handle: Handle);

    fn set_position(&mut self, handle: Handle, position: Vec3);

    /// Setting a rotation also changes the orientation
    fn set_rotation(&mut self, handle: Handle, rotation: Vec3);

    /// Setting an orientation also changes the rotation
    fn set_orientation(&mut self, handle: Handle, orientation: Quat);

    fn set_frozen(&mut self, handle: Handle, frozen: bool);

    fn position(&self, handle: Handle) -> Option<Vec3>;

    fn orientation(&self, handle: Handle) -> Option<Quat>;

    fn model_of(&self, handle: Handle) -> Option<i32>;

    /// Nearest world object of a model within `radius` of `position`
    fn closest_object(&self, position: Vec3, radius: f32, model: i32) -> Option<Handle>;

    // Cosmetic hooks. Hosts that cannot express them may ignore them.

    fn set_siren(&mut self, _handle: Handle, _active: bool) {}

    fn set_vehicle_colors(&mut self, _handle: Handle, _primary: i32, _secondary: i32) {}

    fn set_texture_variant(&mut self, _handle: Handle, _texture: i32) {}

    fn set_ped_action(&mut self, _handle: Handle, _action: IdleAction) {}

    fn set_ped_relationship(&mut self, _handle: Handle, _relationship: Relationship) {}

    fn set_ped_weapon(&mut self, _handle: Handle, _weapon: &str) {}
}
