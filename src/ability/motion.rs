//! Behaviour shared by every movement ability.
//!
//! [`MovementCore`] owns an ability's [`RampEngine`] and knows how that
//! ability turns a horizontal intent into a velocity direction. Ground
//! abilities follow the terrain slope and ramp the whole vector; airborne
//! abilities ignore the slope and ramp only the horizontal component, leaving
//! the vertical axis to gravity.

use glam::Vec3;
use log::debug;

use crate::context::MotionContext;
use crate::facing::is_same_horizontal_direction;
use crate::properties::PhysicalProperties;
use crate::ramp::{AxisMask, RampEngine, RampStep};
use crate::vector_math::{align_with, movement_sign, rotate_about_z};

/// How a horizontal intent becomes a velocity direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionStrategy {
    /// Rotate the intent so the velocity runs along the ground.
    SlopeAligned,
    /// Use the intent as a pure horizontal direction.
    Horizontal,
}

/// Per-ability behaviour table selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionProfile {
    /// Direction calculation.
    pub direction: DirectionStrategy,
    /// Components measured and written by ramps.
    pub axis: AxisMask,
}

impl MotionProfile {
    /// Ground movement: slope-aligned, whole vector.
    pub const GROUND: Self = Self {
        direction: DirectionStrategy::SlopeAligned,
        axis: AxisMask::Full,
    };

    /// Airborne movement: horizontal only.
    pub const AIRBORNE: Self = Self {
        direction: DirectionStrategy::Horizontal,
        axis: AxisMask::Horizontal,
    };
}

/// Whether an ability currently listens to input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSubscription {
    subscribed: bool,
}

impl InputSubscription {
    /// Creates an unsubscribed handle.
    #[must_use]
    pub const fn new() -> Self {
        Self { subscribed: false }
    }

    /// Starts receiving input events.
    pub const fn subscribe(&mut self) {
        self.subscribed = true;
    }

    /// Stops receiving input events.
    pub const fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    /// Whether events should be delivered.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

/// Ramp engine plus direction handling for one ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementCore {
    profile: MotionProfile,
    ramps: RampEngine,
}

impl MovementCore {
    /// Creates an idle core for `profile`.
    #[must_use]
    pub const fn new(profile: MotionProfile) -> Self {
        Self {
            profile,
            ramps: RampEngine::new(profile.axis),
        }
    }

    /// Behaviour table in use.
    #[must_use]
    pub const fn profile(&self) -> MotionProfile {
        self.profile
    }

    /// Read access to the ramp engine.
    #[must_use]
    pub const fn ramps(&self) -> &RampEngine {
        &self.ramps
    }

    /// Write access to the ramp engine.
    pub const fn ramps_mut(&mut self) -> &mut RampEngine {
        &mut self.ramps
    }

    /// Points the target velocity direction toward `movement_direction`.
    ///
    /// Only the sign of `movement_direction` counts, so analogue input still
    /// yields a unit direction. With [`DirectionStrategy::SlopeAligned`] the rightward intent is
    /// rotated by the negated ground angle so the velocity climbs or descends
    /// with the terrain.
    pub fn calculate_target_velocity_direction(
        &self,
        ctx: &mut MotionContext<'_>,
        movement_direction: f32,
    ) {
        let intent = Vec3::X * movement_sign(movement_direction);
        ctx.properties.target_velocity_direction = match self.profile.direction {
            DirectionStrategy::Horizontal => intent,
            DirectionStrategy::SlopeAligned => {
                let slope = ctx.scanner.ground_signed_angle();
                if slope.is_finite() {
                    rotate_about_z(intent, -slope)
                } else {
                    intent
                }
            }
        };
    }

    /// Writes `direction × speed` into the axes this ability controls.
    pub fn set_target_velocity(&self, props: &mut PhysicalProperties, speed: f32) {
        self.profile.axis.set_speed(props, speed);
    }

    /// Turns the target velocity onto the current direction, keeping its
    /// magnitude.
    pub fn align_target_velocity(props: &mut PhysicalProperties) {
        props.target_velocity = align_with(props.target_velocity, props.target_velocity_direction);
    }

    /// Zeroes the target velocity when input points against the momentum.
    ///
    /// Returns `true` when the velocity was reset.
    pub fn reset_velocity_on_switch_input_direction(ctx: &mut MotionContext<'_>) -> bool {
        if is_same_horizontal_direction(ctx.horizontal_velocity(), ctx.input_direction()) {
            return false;
        }
        debug!(
            "input {} reverses momentum {:?}; velocity reset",
            ctx.input_direction(),
            ctx.properties.target_velocity
        );
        ctx.properties.target_velocity = Vec3::ZERO;
        true
    }

    /// Advances the active ramp by one frame.
    pub fn step(&mut self, props: &mut PhysicalProperties, delta: f32) -> RampStep {
        self.ramps.step(props, delta)
    }

    /// Limits the controlled speed to `bound`, keeping direction.
    ///
    /// A non-finite velocity is zeroed first.
    pub fn clamp_speed(&self, props: &mut PhysicalProperties, bound: f32) {
        props.sanitize();
        let axis = self.profile.axis;
        if axis.speed(props.target_velocity) <= bound {
            return;
        }
        debug!("speed clamped to {bound} from {:?}", props.target_velocity);
        match axis {
            AxisMask::Full => props.target_velocity = props.target_velocity.normalize() * bound,
            AxisMask::Horizontal => {
                props.target_velocity.x = props.target_velocity.x.signum() * bound;
            }
        }
    }

    /// Physics step shared by every ability: hand the velocity to the body.
    pub fn common_fixed_tick(ctx: &mut MotionContext<'_>) {
        ctx.properties.sanitize();
        ctx.body.apply_velocity(ctx.properties.target_velocity);
    }

    /// Cancels every ramp so nothing keeps writing after the ability ends.
    pub fn common_exit(&mut self) {
        self.ramps.cancel_all();
    }
}
