//! Basic vector math helpers for steering target velocities.
//! Sign handling, rotation about the view axis and magnitude-preserving
//! alignment.
use glam::{Quat, Vec3};

/// Returns the direction of travel encoded by `value`.
///
/// Zero counts as positive, matching the convention that a character at rest
/// ramps along the rightward axis. Non-finite input is treated the same way so
/// a corrupted velocity never propagates into a direction vector.
///
/// # Examples
/// ```
/// use locomotion::vector_math::movement_sign;
/// assert_eq!(movement_sign(-3.5), -1.0);
/// assert_eq!(movement_sign(0.0), 1.0);
/// assert_eq!(movement_sign(f32::NAN), 1.0);
/// ```
#[must_use]
pub fn movement_sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Rotates `vector` about the Z axis by `degrees`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use locomotion::vector_math::rotate_about_z;
/// let rotated = rotate_about_z(Vec3::X, 90.0);
/// assert!((rotated - Vec3::Y).length() < 1e-6);
/// ```
#[must_use]
pub fn rotate_about_z(vector: Vec3, degrees: f32) -> Vec3 {
    Quat::from_rotation_z(degrees.to_radians()) * vector
}

/// Returns `vector` with its magnitude preserved but pointing along `direction`.
///
/// A zero or non-finite `direction` cannot be normalised, so `vector` is
/// returned unchanged.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use locomotion::vector_math::align_with;
/// let aligned = align_with(Vec3::new(3.0, 4.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
/// assert!((aligned - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-6);
///
/// let untouched = align_with(Vec3::X, Vec3::ZERO);
/// assert_eq!(untouched, Vec3::X);
/// ```
#[must_use]
pub fn align_with(vector: Vec3, direction: Vec3) -> Vec3 {
    match direction.try_normalize() {
        Some(unit) => unit * vector.length(),
        None => vector,
    }
}
