//! Walking on the ground.
//!
//! Ground movement ramps the whole velocity vector along the terrain. Each
//! frame the velocity is re-aligned with the current slope so speed carries
//! over when the ground tilts under the character. Reversing input stops the
//! character dead before accelerating the other way. Landing faster than the
//! walking limit decays the speed down to it before walking resumes.

use log::debug;

use super::motion::{InputSubscription, MotionProfile, MovementCore};
use crate::animation::AnimationClip;
use crate::context::MotionContext;
use crate::ramp::{RampKind, RampStep};
use crate::vector_math::movement_sign;

/// Rates used by [`WalkAbility`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkRates {
    /// Top walking speed.
    pub max_speed: f32,
    /// Speed gained per second while input is held.
    pub acceleration: f32,
    /// Speed lost per second after input is released.
    pub deceleration: f32,
}

/// Ground ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkAbility {
    core: MovementCore,
    rates: WalkRates,
    subscription: InputSubscription,
    decreasing_to_max_speed: bool,
}

impl WalkAbility {
    /// Creates an inactive walk ability.
    #[must_use]
    pub const fn new(rates: WalkRates) -> Self {
        Self {
            core: MovementCore::new(MotionProfile::GROUND),
            rates,
            subscription: InputSubscription::new(),
            decreasing_to_max_speed: false,
        }
    }

    /// Shared movement core.
    #[must_use]
    pub const fn core(&self) -> &MovementCore {
        &self.core
    }

    /// Configured rates.
    #[must_use]
    pub const fn rates(&self) -> WalkRates {
        self.rates
    }

    /// Whether speed above the walking limit is still being shed.
    #[must_use]
    pub const fn is_capping(&self) -> bool {
        self.decreasing_to_max_speed
    }

    /// Whether input events reach this ability.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_subscribed()
    }

    /// Lands the character: vertical speed is dropped and the horizontal
    /// speed continues along the ground.
    pub fn on_enter(&mut self, ctx: &mut MotionContext<'_>) {
        self.subscription.subscribe();
        ctx.view.start_animation(AnimationClip::Walk);

        let momentum = ctx.horizontal_velocity();
        self.core
            .calculate_target_velocity_direction(ctx, movement_sign(momentum));
        self.core.set_target_velocity(ctx.properties, momentum.abs());
        debug!("landed with {:?}", ctx.properties.target_velocity);

        if ctx.input.is_engaged() {
            self.handle_movement_input(ctx);
        } else {
            self.decelerate_to_rest(ctx);
        }
    }

    /// Frame update: follow the terrain, then advance the ramp.
    pub fn tick(&mut self, ctx: &mut MotionContext<'_>, delta: f32) -> RampStep {
        self.follow_terrain(ctx);
        let step = self.core.step(ctx.properties, delta);
        if self.decreasing_to_max_speed && step == RampStep::Finished(RampKind::Decrease) {
            debug!("walk cap reached at {:?}", ctx.properties.target_velocity);
            self.decreasing_to_max_speed = false;
            if ctx.input.is_engaged() {
                self.core
                    .ramps_mut()
                    .start_increase(self.rates.acceleration, self.rates.max_speed);
            } else {
                self.decelerate_to_rest(ctx);
            }
        }
        step
    }

    /// Physics step.
    pub fn fixed_tick(ctx: &mut MotionContext<'_>) {
        MovementCore::common_fixed_tick(ctx);
    }

    /// Stops ramps, detaches from input and keeps the speed within the
    /// walking limit.
    pub fn on_exit(&mut self, ctx: &mut MotionContext<'_>) {
        self.core.common_exit();
        self.subscription.unsubscribe();
        self.decreasing_to_max_speed = false;
        self.core.clamp_speed(ctx.properties, self.rates.max_speed);
    }

    /// Fresh input: turn, stop on reversal, accelerate toward the input.
    ///
    /// Above the walking limit the speed is first decayed down to it.
    pub fn handle_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        let input = ctx.input_direction();
        if input == 0.0 {
            return;
        }
        ctx.facing.try_align_horizontal_look_rotation_with(input);
        MovementCore::reset_velocity_on_switch_input_direction(ctx);
        self.core.calculate_target_velocity_direction(ctx, input);

        let speed = self
            .core
            .profile()
            .axis
            .speed(ctx.properties.target_velocity);
        let over_limit = speed > self.rates.max_speed;
        let ramps = self.core.ramps_mut();
        ramps.cancel_all();
        if over_limit {
            debug!("walking at {speed}; capping to {}", self.rates.max_speed);
            ramps.start_decrease(self.rates.deceleration, self.rates.max_speed);
        } else {
            ramps.start_increase(self.rates.acceleration, self.rates.max_speed);
        }
        self.decreasing_to_max_speed = over_limit;
    }

    /// Released input: slow down to rest.
    pub fn cancel_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        self.decreasing_to_max_speed = false;
        self.core.ramps_mut().cancel_all();
        self.decelerate_to_rest(ctx);
    }

    fn decelerate_to_rest(&mut self, ctx: &mut MotionContext<'_>) {
        let momentum = ctx.horizontal_velocity();
        self.core
            .calculate_target_velocity_direction(ctx, movement_sign(momentum));
        self.core
            .ramps_mut()
            .start_decrease(self.rates.deceleration, 0.0);
    }

    fn follow_terrain(&self, ctx: &mut MotionContext<'_>) {
        let heading = movement_sign(ctx.properties.target_velocity_direction.x);
        self.core.calculate_target_velocity_direction(ctx, heading);
        MovementCore::align_target_velocity(ctx.properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::test_support::{Harness, FRAME};
    use crate::environment::StaticGround;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rstest::{fixture, rstest};

    #[fixture]
    fn walk() -> WalkAbility {
        WalkAbility::new(WalkRates {
            max_speed: 6.0,
            acceleration: 30.0,
            deceleration: 40.0,
        })
    }

    fn run(walk: &mut WalkAbility, harness: &mut Harness, frames: usize) {
        for _ in 0..frames {
            walk.tick(&mut harness.ctx(), FRAME);
        }
    }

    #[rstest]
    fn landing_drops_vertical_speed(mut walk: WalkAbility) {
        let mut harness =
            Harness::with(Vec3::new(-4.0, -12.0, 0.0), 0.0).on_ground(StaticGround::flat());
        walk.on_enter(&mut harness.ctx());

        assert_eq!(harness.props.target_velocity, Vec3::new(-4.0, 0.0, 0.0));
        assert!(walk.core().ramps().is_decreasing());
        assert!(walk.is_subscribed());
    }

    #[rstest]
    fn held_input_reaches_walk_speed(mut walk: WalkAbility) {
        let mut harness = Harness::with(Vec3::ZERO, 1.0).on_ground(StaticGround::flat());
        walk.on_enter(&mut harness.ctx());
        run(&mut walk, &mut harness, 600);
        assert_eq!(harness.props.target_velocity, Vec3::new(6.0, 0.0, 0.0));
    }

    #[rstest]
    fn speed_follows_the_slope(mut walk: WalkAbility) {
        let mut harness = Harness::with(Vec3::ZERO, 1.0).on_ground(StaticGround::slope(-30.0));
        walk.on_enter(&mut harness.ctx());
        run(&mut walk, &mut harness, 600);

        let velocity = harness.props.target_velocity;
        assert_relative_eq!(velocity.length(), 6.0, epsilon = 1e-4);
        assert!(velocity.y > 0.0, "negated slope angle rotates the intent upward");
    }

    #[rstest]
    fn reversal_stops_dead_and_turns(mut walk: WalkAbility) {
        let mut harness = Harness::with(Vec3::ZERO, 1.0).on_ground(StaticGround::flat());
        walk.on_enter(&mut harness.ctx());
        run(&mut walk, &mut harness, 600);

        harness.input.set_horizontal(-1.0);
        walk.handle_movement_input(&mut harness.ctx());
        assert_eq!(harness.props.target_velocity, Vec3::ZERO);
        assert!(harness.facing.is_facing(-1.0));

        run(&mut walk, &mut harness, 600);
        assert_eq!(harness.props.target_velocity, Vec3::new(-6.0, 0.0, 0.0));
    }

    #[rstest]
    fn release_decays_to_rest(mut walk: WalkAbility) {
        let mut harness = Harness::with(Vec3::ZERO, 1.0).on_ground(StaticGround::flat());
        walk.on_enter(&mut harness.ctx());
        run(&mut walk, &mut harness, 600);

        harness.input.release();
        walk.cancel_movement_input(&mut harness.ctx());
        run(&mut walk, &mut harness, 600);
        assert_eq!(harness.props.target_velocity.length(), 0.0);
        assert!(!walk.core().ramps().is_active());
    }

    #[rstest]
    #[case::held(1.0, 6.0)]
    #[case::released(0.0, 0.0)]
    fn landing_above_the_limit_sheds_speed_smoothly(
        mut walk: WalkAbility,
        #[case] input: f32,
        #[case] settled: f32,
    ) {
        let mut harness =
            Harness::with(Vec3::new(10.0, -5.0, 0.0), input).on_ground(StaticGround::flat());
        walk.on_enter(&mut harness.ctx());
        assert_eq!(walk.is_capping(), input != 0.0);
        assert!(walk.core().ramps().is_decreasing());

        let mut largest_step = 0.0_f32;
        for _ in 0..600 {
            let before = harness.vx();
            walk.tick(&mut harness.ctx(), FRAME);
            largest_step = largest_step.max((harness.vx() - before).abs());
        }
        assert!(largest_step < 1.0, "speed jumped by {largest_step} in one frame");
        assert!(!walk.is_capping());
        assert_eq!(harness.props.target_velocity, Vec3::new(settled, 0.0, 0.0));
    }

    #[rstest]
    fn fresh_input_above_the_limit_caps_first(mut walk: WalkAbility) {
        let mut harness =
            Harness::with(Vec3::new(9.0, 0.0, 0.0), 0.0).on_ground(StaticGround::flat());
        walk.on_enter(&mut harness.ctx());

        harness.input.set_horizontal(1.0);
        walk.handle_movement_input(&mut harness.ctx());
        assert!(walk.is_capping());
        walk.tick(&mut harness.ctx(), FRAME);
        assert_relative_eq!(harness.vx(), 9.0 - 40.0 * FRAME);

        harness.input.release();
        walk.cancel_movement_input(&mut harness.ctx());
        assert!(!walk.is_capping());
        run(&mut walk, &mut harness, 600);
        assert_eq!(harness.vx(), 0.0);
    }

    #[rstest]
    fn analogue_input_walks_at_full_speed(mut walk: WalkAbility) {
        let mut harness = Harness::with(Vec3::ZERO, -0.4).on_ground(StaticGround::flat());
        walk.on_enter(&mut harness.ctx());
        assert_eq!(harness.props.target_velocity_direction, Vec3::NEG_X);

        let mut largest_step = 0.0_f32;
        for _ in 0..600 {
            let before = harness.vx();
            walk.tick(&mut harness.ctx(), FRAME);
            largest_step = largest_step.max((harness.vx() - before).abs());
        }
        assert!(largest_step < 1.0, "speed jumped by {largest_step} in one frame");
        assert_eq!(harness.props.target_velocity, Vec3::new(-6.0, 0.0, 0.0));
    }
}
