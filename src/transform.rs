//! Transform and orientation math
//!
//! Pure functions converting between the editor's Euler rotation (degrees,
//! `x` = pitch, `y` = roll, `z` = yaw/heading) and the host's orientation
//! quaternion. Rotations are applied yaw first, then pitch, then roll.
//!
//! The quaternion is the canonical representation everywhere in the crate;
//! Euler angles are derived on demand.

use glam::{DQuat, EulerRot, Quat, Vec3};

/// Rotation order shared with the host engine
const HOST_EULER_ORDER: EulerRot = EulerRot::ZXY;

/// Convert an Euler rotation in degrees to an orientation quaternion
pub fn euler_to_orientation(rotation_degrees: Vec3) -> Quat {
    let pitch = (rotation_degrees.x as f64).to_radians();
    let roll = (rotation_degrees.y as f64).to_radians();
    let yaw = (rotation_degrees.z as f64).to_radians();

    let q = DQuat::from_euler(HOST_EULER_ORDER, yaw, pitch, roll);
    Quat::from_xyzw(
        positive_zero(q.x),
        positive_zero(q.y),
        positive_zero(q.z),
        positive_zero(q.w),
    )
}

/// Convert an orientation quaternion to an Euler rotation in degrees.
/// Each component lies in `(-180, 180]`.
pub fn orientation_to_euler(orientation: Quat) -> Vec3 {
    let q = DQuat::from_xyzw(
        orientation.x as f64,
        orientation.y as f64,
        orientation.z as f64,
        orientation.w as f64,
    )
    .normalize();

    let (yaw, pitch, roll) = q.to_euler(HOST_EULER_ORDER);
    Vec3::new(
        positive_zero(pitch.to_degrees()),
        positive_zero(roll.to_degrees()),
        positive_zero(yaw.to_degrees()),
    )
}

/// Narrow to f32, turning `-0.0` into `0.0` so files never show "-0"
fn positive_zero(value: f64) -> f32 {
    (value + 0.0) as f32
}

/// `-0.0` becomes `0.0`; every other value passes through unchanged
pub fn unsigned_zero(value: f32) -> f32 {
    value + 0.0
}

/// Component-wise [`unsigned_zero`], applied to every vector a writer emits
pub fn unsigned_zero_vec(v: Vec3) -> Vec3 {
    Vec3::new(unsigned_zero(v.x), unsigned_zero(v.y), unsigned_zero(v.z))
}

/// Component-wise [`unsigned_zero`] for orientations read back from the host
pub fn unsigned_zero_quat(q: Quat) -> Quat {
    Quat::from_xyzw(
        unsigned_zero(q.x),
        unsigned_zero(q.y),
        unsigned_zero(q.z),
        unsigned_zero(q.w),
    )
}

/// Orientation for an object that only has a heading (vehicles, peds)
pub fn heading_to_orientation(heading_degrees: f32) -> Quat {
    euler_to_orientation(Vec3::new(0.0, 0.0, heading_degrees))
}

/// Heading (yaw, degrees) of an orientation
pub fn heading_of(orientation: Quat) -> f32 {
    orientation_to_euler(orientation).z
}

/// Map a negative angle into `[0, 360)`; positive angles pass through
pub fn denormalize_angle(angle: f32) -> f32 {
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Component-wise [`denormalize_angle`]
pub fn denormalize(rotation: Vec3) -> Vec3 {
    Vec3::new(
        denormalize_angle(rotation.x),
        denormalize_angle(rotation.y),
        denormalize_angle(rotation.z),
    )
}

/// Signed shortest difference between two angles, in degrees
pub fn angle_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// True when two Euler rotations describe the same angles within `tolerance` degrees
pub fn rotations_approx_eq(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    angle_difference(a.x, b.x).abs() <= tolerance
        && angle_difference(a.y, b.y).abs() <= tolerance
        && angle_difference(a.z, b.z).abs() <= tolerance
}

/// Exact origin test. Objects sitting at the origin count as "not placed".
pub fn is_origin(position: Vec3) -> bool {
    position == Vec3::ZERO
}

/// An all-zero quaternion is how map files spell "no orientation recorded"
pub fn is_unset_orientation(orientation: Quat) -> bool {
    orientation.x == 0.0 && orientation.y == 0.0 && orientation.z == 0.0 && orientation.w == 0.0
}
