//! Take-off and rise.

use log::debug;

use super::airborne::AirborneMotion;
use super::motion::MovementCore;
use crate::animation::AnimationClip;
use crate::context::MotionContext;
use crate::properties::PhysicalProperties;
use crate::ramp::RampStep;

/// Airborne ability active from take-off until the apex.
///
/// The vertical launch speed is set once on entry; horizontal control then
/// works exactly as in any other airborne ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpAbility {
    air: AirborneMotion,
    jump_velocity: f32,
}

impl JumpAbility {
    /// Creates an inactive jump launching at `jump_velocity`.
    #[must_use]
    pub const fn new(max_horizontal_speed: f32, jump_velocity: f32) -> Self {
        Self {
            air: AirborneMotion::new(max_horizontal_speed),
            jump_velocity,
        }
    }

    /// Shared airborne state.
    #[must_use]
    pub const fn air(&self) -> &AirborneMotion {
        &self.air
    }

    /// Vertical launch speed.
    #[must_use]
    pub const fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    /// Launches upward and continues with the held input.
    pub fn on_enter(&mut self, ctx: &mut MotionContext<'_>) {
        self.air.common_enter();
        ctx.properties.target_velocity.y = self.jump_velocity;
        debug!("jump launched at {:?}", ctx.properties.target_velocity);
        ctx.view.start_animation(AnimationClip::Jump);
        self.air.continue_with_input(ctx);
    }

    /// Frame update.
    pub fn tick(&mut self, ctx: &mut MotionContext<'_>, delta: f32) -> RampStep {
        self.air.tick(ctx, delta)
    }

    /// Physics step: gravity scaled by the jump acceleration.
    pub fn fixed_tick(ctx: &mut MotionContext<'_>, fixed_delta: f32) {
        let acceleration = ctx.properties.jump_acceleration;
        AirborneMotion::add_gravity(ctx, acceleration, fixed_delta);
        MovementCore::common_fixed_tick(ctx);
    }

    /// Airborne cleanup.
    pub fn on_exit(&mut self, ctx: &mut MotionContext<'_>) {
        self.air.common_exit(ctx);
    }

    /// Whether the rise is over.
    #[must_use]
    pub fn has_peaked(properties: &PhysicalProperties) -> bool {
        properties.target_velocity.y <= 0.0
    }

    /// Fresh input.
    pub fn handle_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        self.air.handle_movement_input(ctx);
    }

    /// Released input.
    pub fn cancel_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        self.air.cancel_movement_input(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::test_support::{Harness, PHYSICS};
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rstest::rstest;

    #[rstest]
    fn entry_launches_upward_keeping_horizontal() {
        let mut harness = Harness::with(Vec3::new(3.0, 0.0, 0.0), 1.0);
        let mut jump = JumpAbility::new(10.0, 8.0);
        jump.on_enter(&mut harness.ctx());

        assert_eq!(harness.props.target_velocity, Vec3::new(3.0, 8.0, 0.0));
        assert_eq!(harness.view.current(), Some(AnimationClip::Jump));
        assert!(jump.air().core().ramps().is_increasing());
    }

    #[rstest]
    fn gravity_brings_the_rise_to_an_apex() {
        let mut harness = Harness::with(Vec3::ZERO, 0.0);
        let mut jump = JumpAbility::new(10.0, 2.0);
        jump.on_enter(&mut harness.ctx());

        JumpAbility::fixed_tick(&mut harness.ctx(), PHYSICS);
        let props = harness.props;
        assert_relative_eq!(
            props.target_velocity.y,
            2.0 + props.gravity * props.jump_acceleration * PHYSICS
        );

        let mut steps = 1;
        while !JumpAbility::has_peaked(&harness.props) {
            JumpAbility::fixed_tick(&mut harness.ctx(), PHYSICS);
            steps += 1;
            assert!(steps < 1_000, "jump never peaked");
        }
        assert_eq!(harness.body.history().len(), steps);
    }
}
