//! Falling without ground contact.

use log::debug;

use super::airborne::AirborneMotion;
use super::motion::MovementCore;
use crate::animation::AnimationClip;
use crate::context::MotionContext;
use crate::ramp::{RampKind, RampStep};
use crate::vector_math::movement_sign;

/// Airborne ability active while the character falls.
///
/// Entering with more horizontal speed than the air cap first decays the
/// momentum down to the cap. Until that finishes, input only turns the
/// character so no other ramp competes for the velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallAbility {
    air: AirborneMotion,
    decreasing_to_max_allowed_speed: bool,
}

impl FallAbility {
    /// Creates an inactive fall ability capped at `max_horizontal_speed`.
    #[must_use]
    pub const fn new(max_horizontal_speed: f32) -> Self {
        Self {
            air: AirborneMotion::new(max_horizontal_speed),
            decreasing_to_max_allowed_speed: false,
        }
    }

    /// Shared airborne state.
    #[must_use]
    pub const fn air(&self) -> &AirborneMotion {
        &self.air
    }

    /// Whether the entry cap is still being applied.
    #[must_use]
    pub const fn is_capping(&self) -> bool {
        self.decreasing_to_max_allowed_speed
    }

    /// Starts the fall clip and either caps the entry speed or continues
    /// with the held input.
    pub fn on_enter(&mut self, ctx: &mut MotionContext<'_>) {
        self.air.common_enter();
        ctx.view.start_animation(AnimationClip::Fall);

        let momentum = ctx.horizontal_velocity();
        let cap = self.air.max_horizontal_speed();
        if momentum.abs() > cap {
            debug!("falling at {momentum}; capping to {cap}");
            self.air
                .core()
                .calculate_target_velocity_direction(ctx, movement_sign(momentum));
            let deceleration = ctx.properties.deceleration_in_air;
            self.air
                .core_mut()
                .ramps_mut()
                .start_decrease(deceleration, cap);
            self.decreasing_to_max_allowed_speed = true;
        } else {
            self.air.continue_with_input(ctx);
        }
    }

    /// Frame update.
    pub fn tick(&mut self, ctx: &mut MotionContext<'_>, delta: f32) -> RampStep {
        if !self.decreasing_to_max_allowed_speed {
            return self.air.tick(ctx, delta);
        }
        let step = self.air.core_mut().step(ctx.properties, delta);
        if step == RampStep::Finished(RampKind::Decrease) {
            debug!("fall cap reached at {:?}", ctx.properties.target_velocity);
            self.decreasing_to_max_allowed_speed = false;
            self.air.continue_with_input(ctx);
        }
        step
    }

    /// Physics step: gravity scaled by the fall acceleration.
    pub fn fixed_tick(ctx: &mut MotionContext<'_>, fixed_delta: f32) {
        let acceleration = ctx.properties.fall_acceleration;
        AirborneMotion::add_gravity(ctx, acceleration, fixed_delta);
        MovementCore::common_fixed_tick(ctx);
    }

    /// Stops capping and runs the airborne cleanup.
    pub fn on_exit(&mut self, ctx: &mut MotionContext<'_>) {
        self.decreasing_to_max_allowed_speed = false;
        self.air.common_exit(ctx);
    }

    /// Fresh input: only turn while the cap is applied.
    pub fn handle_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        if self.decreasing_to_max_allowed_speed {
            AirborneMotion::rotate_person(ctx);
            return;
        }
        self.air.handle_movement_input(ctx);
    }

    /// Released input: ignored while the cap is applied, whose completion
    /// decides what happens next.
    pub fn cancel_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        if self.decreasing_to_max_allowed_speed {
            return;
        }
        self.air.cancel_movement_input(ctx);
    }
}
