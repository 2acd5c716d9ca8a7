//! Behaviour shared by abilities without ground contact.
//!
//! While airborne, horizontal input does not set a speed directly. It steers
//! the existing momentum through the inertia loop: input along the momentum
//! keeps (or starts) a single increase toward the air cap, input against it
//! first decays the momentum to rest and then re-evaluates, which usually
//! accelerates the other way. Gravity acts on the vertical axis every physics
//! step regardless of what the ramps are doing.

use log::debug;

use super::motion::{InputSubscription, MotionProfile, MovementCore};
use crate::context::MotionContext;
use crate::facing::is_same_horizontal_direction;
use crate::ramp::{RampKind, RampStep};
use crate::vector_math::movement_sign;

/// In-air movement state embedded in every airborne ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirborneMotion {
    core: MovementCore,
    max_horizontal_speed: f32,
    inertia_enabled: bool,
    reevaluate_after_decrease: bool,
    subscription: InputSubscription,
}

impl AirborneMotion {
    /// Creates idle airborne state capped at `max_horizontal_speed`.
    #[must_use]
    pub const fn new(max_horizontal_speed: f32) -> Self {
        Self {
            core: MovementCore::new(MotionProfile::AIRBORNE),
            max_horizontal_speed,
            inertia_enabled: false,
            reevaluate_after_decrease: false,
            subscription: InputSubscription::new(),
        }
    }

    /// Shared movement core.
    #[must_use]
    pub const fn core(&self) -> &MovementCore {
        &self.core
    }

    /// Mutable shared movement core.
    pub const fn core_mut(&mut self) -> &mut MovementCore {
        &mut self.core
    }

    /// Horizontal speed cap.
    #[must_use]
    pub const fn max_horizontal_speed(&self) -> f32 {
        self.max_horizontal_speed
    }

    /// Whether the inertia loop is live.
    #[must_use]
    pub const fn is_inertia_enabled(&self) -> bool {
        self.inertia_enabled
    }

    /// Whether input events reach this ability.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_subscribed()
    }

    /// Enter hook shared by airborne abilities.
    pub fn common_enter(&mut self) {
        self.subscription.subscribe();
        self.inertia_enabled = false;
        self.reevaluate_after_decrease = false;
    }

    /// Exit hook shared by airborne abilities.
    ///
    /// Stops every ramp and the inertia loop, detaches from input and leaves
    /// the horizontal speed within the air cap.
    pub fn common_exit(&mut self, ctx: &mut MotionContext<'_>) {
        self.core.common_exit();
        self.subscription.unsubscribe();
        self.inertia_enabled = false;
        self.reevaluate_after_decrease = false;
        self.core.clamp_speed(ctx.properties, self.max_horizontal_speed);
    }

    /// Adds one physics step of gravity scaled by `acceleration`.
    pub fn add_gravity(ctx: &mut MotionContext<'_>, acceleration: f32, fixed_delta: f32) {
        let props = &mut *ctx.properties;
        props.target_velocity.y += props.gravity * acceleration * fixed_delta;
    }

    /// Frame update: advances the ramp and resumes the inertia loop when a
    /// reversal has finished decaying.
    pub fn tick(&mut self, ctx: &mut MotionContext<'_>, delta: f32) -> RampStep {
        let step = self.core.step(ctx.properties, delta);
        if step == RampStep::Finished(RampKind::Decrease) && self.reevaluate_after_decrease {
            self.reevaluate_after_decrease = false;
            if self.inertia_enabled {
                debug!("reversal settled; re-evaluating inertia");
                self.change_velocity_with_inertia(ctx);
            }
        }
        step
    }

    /// Steers the horizontal momentum toward the held input.
    ///
    /// Without horizontal input there is nothing to steer toward, so the loop
    /// is switched off instead.
    pub fn change_velocity_with_inertia(&mut self, ctx: &mut MotionContext<'_>) {
        let input = ctx.input_direction();
        if input == 0.0 {
            debug!("inertia requested without horizontal input");
            self.inertia_enabled = false;
            self.reevaluate_after_decrease = false;
            return;
        }
        self.inertia_enabled = true;

        let momentum = ctx.horizontal_velocity();
        if is_same_horizontal_direction(input, momentum) {
            self.core.calculate_target_velocity_direction(ctx, input);
            self.reevaluate_after_decrease = false;
            let acceleration = ctx.properties.acceleration_in_air;
            let ramps = self.core.ramps_mut();
            ramps.clear_decrease();
            ramps.start_increase(acceleration, self.max_horizontal_speed);
        } else {
            self.core
                .calculate_target_velocity_direction(ctx, movement_sign(momentum));
            let deceleration = ctx.properties.deceleration_in_air;
            let ramps = self.core.ramps_mut();
            ramps.clear_increase();
            ramps.start_decrease(deceleration, 0.0);
            self.reevaluate_after_decrease = true;
        }
    }

    /// Reaction to fresh horizontal input.
    pub fn handle_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        self.core.ramps_mut().clear_decrease();
        self.inertia_enabled = false;
        self.reevaluate_after_decrease = false;

        Self::rotate_person(ctx);

        self.change_velocity_with_inertia(ctx);
    }

    /// Turns the character toward the held input.
    pub fn rotate_person(ctx: &mut MotionContext<'_>) {
        let input = ctx.input_direction();
        ctx.facing.try_align_horizontal_look_rotation_with(input);
    }

    /// Reaction to released horizontal input: decay the momentum to rest.
    pub fn cancel_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        self.core.ramps_mut().clear_increase();
        self.inertia_enabled = false;
        self.reevaluate_after_decrease = false;

        self.decelerate_to_rest(ctx);
    }

    /// Starts decaying the horizontal momentum to zero along its own
    /// direction. Keeps a decrease that is already running.
    pub fn decelerate_to_rest(&mut self, ctx: &mut MotionContext<'_>) {
        let momentum = ctx.horizontal_velocity();
        self.core
            .calculate_target_velocity_direction(ctx, movement_sign(momentum));
        let deceleration = ctx.properties.deceleration_in_air;
        self.core.ramps_mut().start_decrease(deceleration, 0.0);
    }

    /// Either steers with the held input or decays to rest without it.
    pub fn continue_with_input(&mut self, ctx: &mut MotionContext<'_>) {
        if ctx.input.is_engaged() {
            self.change_velocity_with_inertia(ctx);
        } else {
            self.decelerate_to_rest(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::test_support::{Harness, FRAME, PHYSICS};
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rstest::rstest;

    fn airborne() -> AirborneMotion {
        let mut air = AirborneMotion::new(10.0);
        air.common_enter();
        air
    }

    fn run(air: &mut AirborneMotion, harness: &mut Harness, frames: usize) {
        for _ in 0..frames {
            air.tick(&mut harness.ctx(), FRAME);
            assert!(harness.vx().is_finite());
        }
    }

    #[rstest]
    fn gravity_scales_with_acceleration() {
        let mut harness = Harness::with(Vec3::new(3.0, 0.0, 0.0), 0.0);
        AirborneMotion::add_gravity(&mut harness.ctx(), 2.0, PHYSICS);
        assert_relative_eq!(harness.props.target_velocity.y, -9.81 * 2.0 * PHYSICS);
        assert_eq!(harness.vx(), 3.0);
    }

    #[rstest]
    fn matching_input_launches_one_increase() {
        let mut harness = Harness::with(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let mut air = airborne();

        air.change_velocity_with_inertia(&mut harness.ctx());
        air.change_velocity_with_inertia(&mut harness.ctx());
        air.tick(&mut harness.ctx(), FRAME);

        let accel = harness.props.acceleration_in_air;
        assert_relative_eq!(harness.vx(), 2.0 + accel * FRAME);
        assert!(air.core().ramps().is_increasing());
    }

    #[rstest]
    fn matching_input_accelerates_to_cap() {
        let mut harness = Harness::with(Vec3::new(1.0, -4.0, 0.0), 1.0);
        let mut air = airborne();

        air.change_velocity_with_inertia(&mut harness.ctx());
        run(&mut air, &mut harness, 2_000);
        assert_eq!(harness.vx(), 10.0);
        assert_eq!(harness.props.target_velocity.y, -4.0);
        assert!(!air.core().ramps().is_active());
    }

    #[rstest]
    #[case::half(0.5, 10.0)]
    #[case::light_left(-0.25, -10.0)]
    fn analogue_input_ramps_smoothly_to_cap(#[case] input: f32, #[case] expected: f32) {
        let mut harness = Harness::with(Vec3::new(2.0 * input.signum(), 0.0, 0.0), input);
        let mut air = airborne();

        air.change_velocity_with_inertia(&mut harness.ctx());
        assert_relative_eq!(harness.props.target_velocity_direction.length(), 1.0);

        let mut largest_step = 0.0_f32;
        for _ in 0..4_000 {
            let before = harness.vx();
            air.tick(&mut harness.ctx(), FRAME);
            largest_step = largest_step.max((harness.vx() - before).abs());
        }
        assert!(largest_step < 1.0, "speed jumped by {largest_step} in one frame");
        assert_eq!(harness.vx(), expected);
    }

    #[rstest]
    fn reversal_decays_then_accelerates_the_other_way() {
        let mut harness = Harness::with(Vec3::new(6.0, 0.0, 0.0), -1.0);
        let mut air = airborne();

        air.change_velocity_with_inertia(&mut harness.ctx());
        assert!(air.core().ramps().is_decreasing());
        assert_eq!(harness.props.target_velocity_direction, Vec3::X);

        let mut saw_rest = false;
        for _ in 0..4_000 {
            air.tick(&mut harness.ctx(), FRAME);
            assert!(harness.vx().is_finite());
            saw_rest |= harness.vx() == 0.0;
        }
        assert!(saw_rest, "momentum should settle before reversing");
        assert_eq!(harness.vx(), -10.0);
        assert!(air.is_inertia_enabled());
    }

    #[rstest]
    fn release_decays_to_rest() {
        let mut harness = Harness::with(Vec3::new(-8.0, 0.0, 0.0), 0.0);
        let mut air = airborne();

        air.cancel_movement_input(&mut harness.ctx());
        assert_eq!(harness.props.target_velocity_direction, Vec3::NEG_X);
        run(&mut air, &mut harness, 2_000);
        assert_eq!(harness.vx(), 0.0);
        assert!(!air.is_inertia_enabled());
    }

    #[rstest]
    fn exit_stops_the_inertia_chain() {
        let mut harness = Harness::with(Vec3::new(6.0, 0.0, 0.0), -1.0);
        let mut air = airborne();

        air.change_velocity_with_inertia(&mut harness.ctx());
        air.tick(&mut harness.ctx(), FRAME);
        air.common_exit(&mut harness.ctx());
        let frozen = harness.props.target_velocity;

        run(&mut air, &mut harness, 1_000);
        assert_eq!(harness.props.target_velocity, frozen);
        assert!(!air.is_subscribed());
        assert!(!air.is_inertia_enabled());
    }

    #[rstest]
    fn fresh_input_turns_the_character() {
        let mut harness = Harness::with(Vec3::ZERO, -1.0);
        let mut air = airborne();

        air.handle_movement_input(&mut harness.ctx());
        assert!(harness.facing.is_facing(-1.0));
        assert!(air.core().ramps().is_increasing());
    }

    #[rstest]
    fn inertia_without_input_does_nothing() {
        let mut harness = Harness::with(Vec3::new(4.0, 0.0, 0.0), 0.0);
        let mut air = airborne();

        air.change_velocity_with_inertia(&mut harness.ctx());
        assert!(!air.is_inertia_enabled());
        assert!(!air.core().ramps().is_active());
    }
}
