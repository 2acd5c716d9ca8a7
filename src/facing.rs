//! Horizontal facing of a side-on third-person character.
//!
//! The character turns about the vertical axis. A positive yaw faces the
//! positive X axis (right), a negative yaw faces left; turning around is a
//! half-turn.

use glam::Quat;

use crate::constants::HALF_TURN_DEGREES;
use crate::vector_math::movement_sign;

/// Whether two horizontal directions agree.
///
/// Zero on either side is compatible with anything.
///
/// # Examples
/// ```
/// use locomotion::facing::is_same_horizontal_direction;
/// assert!(is_same_horizontal_direction(0.0, -4.0));
/// assert!(is_same_horizontal_direction(2.5, 1.0));
/// assert!(!is_same_horizontal_direction(-1.0, 3.0));
/// ```
#[must_use]
pub fn is_same_horizontal_direction(first: f32, second: f32) -> bool {
    if first == 0.0 || second == 0.0 {
        return true;
    }
    movement_sign(first) == movement_sign(second)
}

/// Wraps `degrees` into the half-open range `(-180, 180]`.
#[must_use]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let angle = degrees % 360.0;
    if angle > HALF_TURN_DEGREES {
        angle % HALF_TURN_DEGREES - HALF_TURN_DEGREES
    } else if angle <= -HALF_TURN_DEGREES {
        angle % HALF_TURN_DEGREES + HALF_TURN_DEGREES
    } else {
        angle
    }
}

/// Yaw state of the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacingController {
    yaw: f32,
}

impl FacingController {
    /// Yaw of a character facing right.
    pub const RIGHT: f32 = 90.0;
    /// Yaw of a character facing left.
    pub const LEFT: f32 = -90.0;

    /// Creates a controller with the given yaw in degrees.
    #[must_use]
    pub const fn new(yaw: f32) -> Self {
        Self { yaw }
    }

    /// Current yaw in degrees.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current yaw as a rotation about the Y axis.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Whether the character already looks toward `direction`.
    #[must_use]
    pub fn is_facing(&self, direction: f32) -> bool {
        let normalised = self.yaw.rem_euclid(360.0);
        let signed = if normalised > HALF_TURN_DEGREES {
            normalised - 360.0
        } else {
            normalised
        };
        movement_sign(direction) == movement_sign(signed)
    }

    /// Turns the character around when it faces away from `direction`.
    ///
    /// A zero direction carries no intent and leaves the yaw unchanged.
    /// Returns `true` when the yaw changed.
    pub fn try_align_horizontal_look_rotation_with(&mut self, direction: f32) -> bool {
        if direction == 0.0 || !direction.is_finite() || self.is_facing(direction) {
            return false;
        }
        self.yaw = self.reversed_yaw(direction);
        true
    }

    fn reversed_yaw(&self, direction: f32) -> f32 {
        wrap_degrees(self.yaw.rem_euclid(360.0) + HALF_TURN_DEGREES * movement_sign(direction))
    }
}

impl Default for FacingController {
    fn default() -> Self {
        Self::new(Self::RIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 5.0)]
    #[case(5.0, 0.0)]
    #[case(0.0, -5.0)]
    #[case(-5.0, 0.0)]
    #[case(0.0, 0.0)]
    fn zero_is_compatible_with_anything(#[case] first: f32, #[case] second: f32) {
        assert!(is_same_horizontal_direction(first, second));
    }

    #[rstest]
    #[case(1.0, -1.0, false)]
    #[case(-0.2, -7.0, true)]
    #[case(3.0, 0.5, true)]
    fn sign_comparison(#[case] first: f32, #[case] second: f32, #[case] expected: bool) {
        assert_eq!(is_same_horizontal_direction(first, second), expected);
    }

    #[rstest]
    #[case(270.0, -90.0)]
    #[case(450.0, 90.0)]
    #[case(-270.0, 90.0)]
    #[case(180.0, 180.0)]
    #[case(-180.0, 180.0)]
    #[case(45.0, 45.0)]
    fn wraps_into_half_open_range(#[case] input: f32, #[case] expected: f32) {
        assert_relative_eq!(wrap_degrees(input), expected);
    }

    #[rstest]
    fn turns_left_then_right() {
        let mut facing = FacingController::default();
        assert!(facing.try_align_horizontal_look_rotation_with(-1.0));
        assert_relative_eq!(facing.yaw(), FacingController::LEFT);
        assert!(facing.is_facing(-1.0));

        assert!(facing.try_align_horizontal_look_rotation_with(1.0));
        assert_relative_eq!(facing.yaw(), FacingController::RIGHT);
    }

    #[rstest]
    fn analogue_input_turns_a_full_half_turn() {
        let mut facing = FacingController::default();
        assert!(facing.try_align_horizontal_look_rotation_with(-0.3));
        assert_relative_eq!(facing.yaw(), FacingController::LEFT);
    }

    #[rstest]
    #[case::zero_input(0.0)]
    #[case::already_facing(1.0)]
    fn keeps_yaw_without_reason_to_turn(#[case] direction: f32) {
        let mut facing = FacingController::default();
        assert!(!facing.try_align_horizontal_look_rotation_with(direction));
        assert_relative_eq!(facing.yaw(), FacingController::RIGHT);
    }
}
