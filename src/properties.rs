//! Shared physical state of one character.

use glam::Vec3;
use log::error;

use crate::config::MovementConfig;

/// Target velocity plus the per-ability rate constants.
///
/// Owned by the character and mutated only through the currently active
/// ability. `target_velocity_direction` is recomputed by whichever ability
/// needs it and carries no meaning across an ability switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalProperties {
    /// Velocity written to the rigid body on every physics step.
    pub target_velocity: Vec3,
    /// Unit direction along which the active ramp adds or removes speed.
    pub target_velocity_direction: Vec3,
    /// Horizontal acceleration while airborne.
    pub acceleration_in_air: f32,
    /// Horizontal deceleration while airborne.
    pub deceleration_in_air: f32,
    /// Gravity multiplier while falling.
    pub fall_acceleration: f32,
    /// Gravity multiplier while rising from a jump.
    pub jump_acceleration: f32,
    /// Vertical gravity.
    pub gravity: f32,
}

impl PhysicalProperties {
    /// Creates properties at rest using the rates from `config`.
    #[must_use]
    pub const fn from_config(config: &MovementConfig) -> Self {
        Self {
            target_velocity: Vec3::ZERO,
            target_velocity_direction: Vec3::X,
            acceleration_in_air: config.acceleration_in_air,
            deceleration_in_air: config.deceleration_in_air,
            fall_acceleration: config.fall_acceleration,
            jump_acceleration: config.jump_acceleration,
            gravity: config.gravity,
        }
    }

    /// Returns a copy with `target_velocity` replaced.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.target_velocity = velocity;
        self
    }

    /// Horizontal component of the target velocity.
    #[must_use]
    pub const fn horizontal_velocity(&self) -> f32 {
        self.target_velocity.x
    }

    /// Replaces a non-finite target velocity with zero.
    ///
    /// Returns `true` when a repair was needed.
    pub fn sanitize(&mut self) -> bool {
        if self.target_velocity.is_finite() {
            return false;
        }
        error!(
            "non-finite target velocity {:?} reset to zero",
            self.target_velocity
        );
        self.target_velocity = Vec3::ZERO;
        true
    }
}

impl Default for PhysicalProperties {
    fn default() -> Self {
        Self::from_config(&MovementConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sanitize_resets_nan_velocity() {
        let mut props = PhysicalProperties::default().with_velocity(Vec3::new(f32::NAN, 1.0, 0.0));
        assert!(props.sanitize());
        assert_eq!(props.target_velocity, Vec3::ZERO);
    }

    #[rstest]
    fn sanitize_keeps_finite_velocity() {
        let velocity = Vec3::new(3.0, -2.0, 0.0);
        let mut props = PhysicalProperties::default().with_velocity(velocity);
        assert!(!props.sanitize());
        assert_eq!(props.target_velocity, velocity);
    }
}
