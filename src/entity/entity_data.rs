//! Entity Data - placed world objects as they are persisted
//!
//! Plain value types. Live bookkeeping happens in `registry`,
//! file layouts in `persistence`.

use crate::transform;
use glam::{Quat, Vec3};
use std::fmt;
use std::str::FromStr;

/// Opaque host-assigned handle of a live world object.
/// Handles are only meaningful for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub i32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Prop,
    Vehicle,
    Ped,
    Marker,
    /// Legacy category: spawnable and persisted, no side metadata
    Pickup,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        EntityCategory::Prop,
        EntityCategory::Vehicle,
        EntityCategory::Ped,
        EntityCategory::Marker,
        EntityCategory::Pickup,
    ];

    /// Stable name used by every file format
    pub fn name(self) -> &'static str {
        match self {
            EntityCategory::Prop => "Prop",
            EntityCategory::Vehicle => "Vehicle",
            EntityCategory::Ped => "Ped",
            EntityCategory::Marker => "Marker",
            EntityCategory::Pickup => "Pickup",
        }
    }

    /// Position in snapshots: props, vehicles, peds, then pickups
    pub fn snapshot_rank(self) -> usize {
        match self {
            EntityCategory::Prop => 0,
            EntityCategory::Vehicle => 1,
            EntityCategory::Ped => 2,
            EntityCategory::Pickup => 3,
            EntityCategory::Marker => 4,
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityCategory::ALL
            .into_iter()
            .find(|c| c.name() == s.trim())
            .ok_or_else(|| format!("unknown entity type '{}'", s))
    }
}

/// What a ped does while idle.
/// `None` stands still, the `Any*` variants pick the nearest scenario point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdleAction {
    #[default]
    None,
    AnyWalk,
    AnyWarp,
    DrinkCoffee,
    Smoke,
    Smoke2,
    Binoculars,
    Bum,
    Cheering,
    Clipboard,
    Drilling,
    Drinking,
    DrugDealer,
    DrugDealerHard,
    TrafficSignaling,
    Filming,
    LeafBlower,
    GolfPlayer,
    GuardPatrol,
    Hammering,
    Janitor,
    Musician,
    Paparazzi,
    Party,
    Picnic,
    PushUps,
    ShineTorch,
    Sunbathe,
    SunbatheBack,
    Tourist,
    Mechanic,
    Welding,
    Yoga,
}

/// (action, display name, host scenario code)
const IDLE_ACTIONS: &[(IdleAction, &str, Option<&str>)] = &[
    (IdleAction::None, "None", None),
    (IdleAction::AnyWalk, "Any - Walk", None),
    (IdleAction::AnyWarp, "Any - Warp", None),
    (IdleAction::DrinkCoffee, "Drink Coffee", Some("WORLD_HUMAN_AA_COFFEE")),
    (IdleAction::Smoke, "Smoke", Some("WORLD_HUMAN_AA_SMOKE")),
    (IdleAction::Smoke2, "Smoke 2", Some("WORLD_HUMAN_SMOKING")),
    (IdleAction::Binoculars, "Binoculars", Some("WORLD_HUMAN_BINOCULARS")),
    (IdleAction::Bum, "Bum", Some("WORLD_HUMAN_BUM_FREEWAY")),
    (IdleAction::Cheering, "Cheering", Some("WORLD_HUMAN_CHEERING")),
    (IdleAction::Clipboard, "Clipboard", Some("WORLD_HUMAN_CLIPBOARD")),
    (IdleAction::Drilling, "Drilling", Some("WORLD_HUMAN_CONST_DRILL")),
    (IdleAction::Drinking, "Drinking", Some("WORLD_HUMAN_DRINKING")),
    (IdleAction::DrugDealer, "Drug Dealer", Some("WORLD_HUMAN_DRUG_DEALER")),
    (IdleAction::DrugDealerHard, "Drug Dealer Hard", Some("WORLD_HUMAN_DRUG_DEALER_HARD")),
    (IdleAction::TrafficSignaling, "Traffic Signaling", Some("WORLD_HUMAN_CAR_PARK_ATTENDANT")),
    (IdleAction::Filming, "Filming", Some("WORLD_HUMAN_MOBILE_FILM_SHOCKING")),
    (IdleAction::LeafBlower, "Leaf Blower", Some("WORLD_HUMAN_GARDENER_LEAF_BLOWER")),
    (IdleAction::GolfPlayer, "Golf Player", Some("WORLD_HUMAN_GOLF_PLAYER")),
    (IdleAction::GuardPatrol, "Guard Patrol", Some("WORLD_HUMAN_GUARD_PATROL")),
    (IdleAction::Hammering, "Hammering", Some("WORLD_HUMAN_HAMMERING")),
    (IdleAction::Janitor, "Janitor", Some("WORLD_HUMAN_JANITOR")),
    (IdleAction::Musician, "Musician", Some("WORLD_HUMAN_MUSICIAN")),
    (IdleAction::Paparazzi, "Paparazzi", Some("WORLD_HUMAN_PAPARAZZI")),
    (IdleAction::Party, "Party", Some("WORLD_HUMAN_PARTYING")),
    (IdleAction::Picnic, "Picnic", Some("WORLD_HUMAN_PICNIC")),
    (IdleAction::PushUps, "Push Ups", Some("WORLD_HUMAN_PUSH_UPS")),
    (IdleAction::ShineTorch, "Shine Torch", Some("WORLD_HUMAN_SECURITY_SHINE_TORCH")),
    (IdleAction::Sunbathe, "Sunbathe", Some("WORLD_HUMAN_SUNBATHE")),
    (IdleAction::SunbatheBack, "Sunbathe Back", Some("WORLD_HUMAN_SUNBATHE_BACK")),
    (IdleAction::Tourist, "Tourist", Some("WORLD_HUMAN_TOURIST_MAP")),
    (IdleAction::Mechanic, "Mechanic", Some("WORLD_HUMAN_VEHICLE_MECHANIC")),
    (IdleAction::Welding, "Welding", Some("WORLD_HUMAN_WELDING")),
    (IdleAction::Yoga, "Yoga", Some("WORLD_HUMAN_YOGA")),
];

impl IdleAction {
    /// Every selectable action, in menu order
    pub fn all() -> impl Iterator<Item = IdleAction> {
        IDLE_ACTIONS.iter().map(|(action, _, _)| *action)
    }

    /// Name written to map files
    pub fn name(self) -> &'static str {
        IDLE_ACTIONS
            .iter()
            .find(|(action, _, _)| *action == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("None")
    }

    /// Host scenario started for this action, if it is a fixed scenario
    pub fn scenario_code(self) -> Option<&'static str> {
        IDLE_ACTIONS
            .iter()
            .find(|(action, _, _)| *action == self)
            .and_then(|(_, _, code)| *code)
    }
}

/// Names older map files use for actions that have since been renamed
const LEGACY_ACTION_NAMES: &[(&str, IdleAction)] = &[("Any", IdleAction::AnyWalk)];

impl FromStr for IdleAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        IDLE_ACTIONS
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(action, _, _)| *action)
            .or_else(|| {
                LEGACY_ACTION_NAMES
                    .iter()
                    .find(|(name, _)| *name == s)
                    .map(|(_, action)| *action)
            })
            .ok_or_else(|| format!("unknown idle action '{}'", s))
    }
}

impl fmt::Display for IdleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ped relationship towards the player, plus the two rival gang groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relationship {
    Hate,
    Dislike,
    Neutral,
    Like,
    Respect,
    #[default]
    Companion,
    Pedestrians,
    Ballas,
    Grove,
}

impl Relationship {
    pub const ALL: [Relationship; 9] = [
        Relationship::Hate,
        Relationship::Dislike,
        Relationship::Neutral,
        Relationship::Like,
        Relationship::Respect,
        Relationship::Companion,
        Relationship::Pedestrians,
        Relationship::Ballas,
        Relationship::Grove,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Relationship::Hate => "Hate",
            Relationship::Dislike => "Dislike",
            Relationship::Neutral => "Neutral",
            Relationship::Like => "Like",
            Relationship::Respect => "Respect",
            Relationship::Companion => "Companion",
            Relationship::Pedestrians => "Pedestrians",
            Relationship::Ballas => "Ballas",
            Relationship::Grove => "Grove",
        }
    }
}

impl FromStr for Relationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relationship::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| format!("unknown relationship '{}'", s))
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weapon given to peds that were never armed
pub const UNARMED: &str = "Unarmed";

/// Prop side data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropData {
    /// Doors stay unfrozen regardless of the dynamic flag
    pub door: bool,
    pub texture: Option<i32>,
}

/// Vehicle side data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleData {
    pub sirens_active: bool,
    pub primary_color: i32,
    pub secondary_color: i32,
}

/// Ped side data. `None` means "not populated yet".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PedData {
    pub action: Option<IdleAction>,
    pub relationship: Option<Relationship>,
    pub weapon: Option<String>,
}

impl PedData {
    /// The values a freshly placed ped receives
    pub fn with_defaults() -> Self {
        Self {
            action: Some(IdleAction::None),
            relationship: Some(Relationship::default()),
            weapon: Some(UNARMED.to_string()),
        }
    }

    pub fn action_or_default(&self) -> IdleAction {
        self.action.unwrap_or_default()
    }

    pub fn relationship_or_default(&self) -> Relationship {
        self.relationship.unwrap_or_default()
    }

    pub fn weapon_or_default(&self) -> &str {
        self.weapon.as_deref().unwrap_or(UNARMED)
    }
}

/// Pickup side data (legacy)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickupData {
    pub amount: i32,
    pub respawn_timer: i32,
}

/// Category-specific payload. The variant *is* the category.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityPayload {
    Prop(PropData),
    Vehicle(VehicleData),
    Ped(PedData),
    Pickup(PickupData),
}

impl EntityPayload {
    pub fn category(&self) -> EntityCategory {
        match self {
            EntityPayload::Prop(_) => EntityCategory::Prop,
            EntityPayload::Vehicle(_) => EntityCategory::Vehicle,
            EntityPayload::Ped(_) => EntityCategory::Ped,
            EntityPayload::Pickup(_) => EntityCategory::Pickup,
        }
    }
}

/// One placed object as serialized
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescriptor {
    pub position: Vec3,
    /// Canonical orientation; Euler rotation is derived from it
    pub orientation: Quat,
    pub model_hash: i32,
    /// `false` = frozen in place
    pub dynamic: bool,
    pub identifier: Option<String>,
    pub payload: EntityPayload,
}

impl EntityDescriptor {
    /// Descriptor with default payload for the category
    pub fn new(payload: EntityPayload, model_hash: i32, position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            orientation: transform::euler_to_orientation(rotation),
            model_hash,
            dynamic: true,
            identifier: None,
            payload,
        }
    }

    pub fn prop(model_hash: i32, position: Vec3, rotation: Vec3) -> Self {
        Self::new(EntityPayload::Prop(PropData::default()), model_hash, position, rotation)
    }

    pub fn vehicle(model_hash: i32, position: Vec3, heading: f32) -> Self {
        Self::new(
            EntityPayload::Vehicle(VehicleData::default()),
            model_hash,
            position,
            Vec3::new(0.0, 0.0, heading),
        )
    }

    pub fn ped(model_hash: i32, position: Vec3, heading: f32) -> Self {
        Self::new(
            EntityPayload::Ped(PedData::default()),
            model_hash,
            position,
            Vec3::new(0.0, 0.0, heading),
        )
    }

    pub fn pickup(model_hash: i32, position: Vec3, heading: f32) -> Self {
        Self::new(
            EntityPayload::Pickup(PickupData::default()),
            model_hash,
            position,
            Vec3::new(0.0, 0.0, heading),
        )
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn category(&self) -> EntityCategory {
        self.payload.category()
    }

    /// Euler rotation in degrees, derived from the orientation
    pub fn rotation(&self) -> Vec3 {
        transform::orientation_to_euler(self.orientation)
    }

    pub fn heading(&self) -> f32 {
        transform::heading_of(self.orientation)
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.orientation = transform::euler_to_orientation(rotation);
    }

    /// Origin-placed descriptors are dropped by every position-writing format
    pub fn is_placed(&self) -> bool {
        !transform::is_origin(self.position)
    }
}
