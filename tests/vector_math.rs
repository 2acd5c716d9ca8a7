//! Edge cases of the public vector helpers.

use glam::Vec3;
use locomotion::{align_with, movement_sign, rotate_about_z};

#[test]
fn sign_of_nan_points_right() {
    assert_eq!(movement_sign(f32::NAN), 1.0);
}

#[test]
fn align_keeps_magnitude() {
    let result = align_with(Vec3::new(0.0, -6.0, 0.0), Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(result, Vec3::new(-6.0, 0.0, 0.0));
}

#[test]
fn align_with_zero_direction_returns_input() {
    let velocity = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(align_with(velocity, Vec3::ZERO), velocity);
}

#[test]
fn half_turn_reverses_direction() {
    let result = rotate_about_z(Vec3::X, 180.0);
    assert!((result - Vec3::NEG_X).length() < 1e-6);
}
