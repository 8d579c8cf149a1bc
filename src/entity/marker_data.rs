//! Marker Data - non-physical visual waypoints

use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// Marker shape, as named by the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkerType {
    #[default]
    UpsideDownCone,
    VerticalCylinder,
    ThickChevronUp,
    ThinChevronUp,
    CheckeredFlagRect,
    CheckeredFlagCircle,
    VerticleCircle,
    PlaneModel,
    LostMCDark,
    LostMCLight,
    Number0,
    Number1,
    Number2,
    Number3,
    Number4,
    Number5,
    Number6,
    Number7,
    Number8,
    Number9,
    ChevronUpx1,
    ChevronUpx2,
    ChevronUpx3,
    HorizontalCircleFat,
    ReplayIcon,
    HorizontalCircleSkinny,
    HorizontalCircleSkinnyArrow,
    HorizontalSplitArrowCircle,
    DebugSphere,
}

const MARKER_TYPE_NAMES: &[(MarkerType, &str)] = &[
    (MarkerType::UpsideDownCone, "UpsideDownCone"),
    (MarkerType::VerticalCylinder, "VerticalCylinder"),
    (MarkerType::ThickChevronUp, "ThickChevronUp"),
    (MarkerType::ThinChevronUp, "ThinChevronUp"),
    (MarkerType::CheckeredFlagRect, "CheckeredFlagRect"),
    (MarkerType::CheckeredFlagCircle, "CheckeredFlagCircle"),
    (MarkerType::VerticleCircle, "VerticleCircle"),
    (MarkerType::PlaneModel, "PlaneModel"),
    (MarkerType::LostMCDark, "LostMCDark"),
    (MarkerType::LostMCLight, "LostMCLight"),
    (MarkerType::Number0, "Number0"),
    (MarkerType::Number1, "Number1"),
    (MarkerType::Number2, "Number2"),
    (MarkerType::Number3, "Number3"),
    (MarkerType::Number4, "Number4"),
    (MarkerType::Number5, "Number5"),
    (MarkerType::Number6, "Number6"),
    (MarkerType::Number7, "Number7"),
    (MarkerType::Number8, "Number8"),
    (MarkerType::Number9, "Number9"),
    (MarkerType::ChevronUpx1, "ChevronUpx1"),
    (MarkerType::ChevronUpx2, "ChevronUpx2"),
    (MarkerType::ChevronUpx3, "ChevronUpx3"),
    (MarkerType::HorizontalCircleFat, "HorizontalCircleFat"),
    (MarkerType::ReplayIcon, "ReplayIcon"),
    (MarkerType::HorizontalCircleSkinny, "HorizontalCircleSkinny"),
    (MarkerType::HorizontalCircleSkinnyArrow, "HorizontalCircleSkinny_Arrow"),
    (MarkerType::HorizontalSplitArrowCircle, "HorizontalSplitArrowCircle"),
    (MarkerType::DebugSphere, "DebugSphere"),
];

impl MarkerType {
    pub fn name(self) -> &'static str {
        MARKER_TYPE_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("UpsideDownCone")
    }
}

impl FromStr for MarkerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MARKER_TYPE_NAMES
            .iter()
            .find(|(_, name)| *name == s.trim())
            .map(|(kind, _)| *kind)
            .ok_or_else(|| format!("unknown marker type '{}'", s))
    }
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 8-bit RGBA color stored as ints in map files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerColor {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
}

impl Default for MarkerColor {
    fn default() -> Self {
        Self {
            red: 255,
            green: 255,
            blue: 255,
            alpha: 200,
        }
    }
}

/// Visual waypoint placed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerType,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: MarkerColor,
    pub bob_up_and_down: bool,
    pub rotate_to_camera: bool,
    pub only_visible_in_editor: bool,
    /// Where the player is sent when walking into the marker
    pub teleport_target: Option<Vec3>,
    /// Unique among markers for the session; assigned by the session
    pub id: i32,
}

impl Marker {
    pub fn new(kind: MarkerType, position: Vec3) -> Self {
        Self {
            kind,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            color: MarkerColor::default(),
            bob_up_and_down: false,
            rotate_to_camera: false,
            only_visible_in_editor: false,
            teleport_target: None,
            id: 0,
        }
    }
}
