//! Movement abilities and their shared building blocks.
//!
//! Exactly one ability is active per character. Abilities are composed
//! rather than layered: every ability embeds a [`MovementCore`], and the
//! airborne ones embed an [`AirborneMotion`] that adds gravity and inertia.
//! [`Ability`] is the closed set the state machine switches between.

pub mod airborne;
pub mod fall;
pub mod jump;
pub mod motion;
pub mod walk;

#[cfg(test)]
mod test_support;

use std::fmt;

pub use airborne::AirborneMotion;
pub use fall::FallAbility;
pub use jump::JumpAbility;
pub use motion::{DirectionStrategy, InputSubscription, MotionProfile, MovementCore};
pub use walk::{WalkAbility, WalkRates};

use crate::config::MovementConfig;
use crate::context::MotionContext;
use crate::ramp::{RampEngine, RampStep};

/// Identifies an ability without carrying its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// Ground movement.
    Walk,
    /// Rising after take-off.
    Jump,
    /// Falling.
    Fall,
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Walk => "walk",
            Self::Jump => "jump",
            Self::Fall => "fall",
        };
        f.write_str(name)
    }
}

/// One active ability with its state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ability {
    /// See [`WalkAbility`].
    Walk(WalkAbility),
    /// See [`JumpAbility`].
    Jump(JumpAbility),
    /// See [`FallAbility`].
    Fall(FallAbility),
}

impl Ability {
    /// Builds a fresh, not yet entered ability of `kind`.
    #[must_use]
    pub const fn from_config(kind: AbilityKind, config: &MovementConfig) -> Self {
        match kind {
            AbilityKind::Walk => Self::Walk(WalkAbility::new(WalkRates {
                max_speed: config.walk_max_speed,
                acceleration: config.walk_acceleration,
                deceleration: config.walk_deceleration,
            })),
            AbilityKind::Jump => Self::Jump(JumpAbility::new(
                config.max_horizontal_speed,
                config.jump_velocity,
            )),
            AbilityKind::Fall => Self::Fall(FallAbility::new(config.max_horizontal_speed)),
        }
    }

    /// Which ability this is.
    #[must_use]
    pub const fn kind(&self) -> AbilityKind {
        match self {
            Self::Walk(_) => AbilityKind::Walk,
            Self::Jump(_) => AbilityKind::Jump,
            Self::Fall(_) => AbilityKind::Fall,
        }
    }

    /// Ramp engine of the ability.
    #[must_use]
    pub const fn ramps(&self) -> &RampEngine {
        match self {
            Self::Walk(walk) => walk.core().ramps(),
            Self::Jump(jump) => jump.air().core().ramps(),
            Self::Fall(fall) => fall.air().core().ramps(),
        }
    }

    /// Whether the ability currently receives input events.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        match self {
            Self::Walk(walk) => walk.is_subscribed(),
            Self::Jump(jump) => jump.air().is_subscribed(),
            Self::Fall(fall) => fall.air().is_subscribed(),
        }
    }

    /// Enter hook.
    pub fn on_enter(&mut self, ctx: &mut MotionContext<'_>) {
        match self {
            Self::Walk(walk) => walk.on_enter(ctx),
            Self::Jump(jump) => jump.on_enter(ctx),
            Self::Fall(fall) => fall.on_enter(ctx),
        }
    }

    /// Per-frame hook; advances the active ramp by `delta` seconds.
    pub fn tick(&mut self, ctx: &mut MotionContext<'_>, delta: f32) -> RampStep {
        match self {
            Self::Walk(walk) => walk.tick(ctx, delta),
            Self::Jump(jump) => jump.tick(ctx, delta),
            Self::Fall(fall) => fall.tick(ctx, delta),
        }
    }

    /// Physics hook.
    pub fn fixed_tick(&self, ctx: &mut MotionContext<'_>, fixed_delta: f32) {
        match self {
            Self::Walk(_) => WalkAbility::fixed_tick(ctx),
            Self::Jump(_) => JumpAbility::fixed_tick(ctx, fixed_delta),
            Self::Fall(_) => FallAbility::fixed_tick(ctx, fixed_delta),
        }
    }

    /// Exit hook.
    pub fn on_exit(&mut self, ctx: &mut MotionContext<'_>) {
        match self {
            Self::Walk(walk) => walk.on_exit(ctx),
            Self::Jump(jump) => jump.on_exit(ctx),
            Self::Fall(fall) => fall.on_exit(ctx),
        }
    }

    /// Input engaged or changed direction.
    pub fn handle_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        match self {
            Self::Walk(walk) => walk.handle_movement_input(ctx),
            Self::Jump(jump) => jump.handle_movement_input(ctx),
            Self::Fall(fall) => fall.handle_movement_input(ctx),
        }
    }

    /// Input released.
    pub fn cancel_movement_input(&mut self, ctx: &mut MotionContext<'_>) {
        match self {
            Self::Walk(walk) => walk.cancel_movement_input(ctx),
            Self::Jump(jump) => jump.cancel_movement_input(ctx),
            Self::Fall(fall) => fall.cancel_movement_input(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AbilityKind::Walk)]
    #[case(AbilityKind::Jump)]
    #[case(AbilityKind::Fall)]
    fn fresh_abilities_are_idle(#[case] kind: AbilityKind) {
        let ability = Ability::from_config(kind, &MovementConfig::default());
        assert_eq!(ability.kind(), kind);
        assert!(!ability.is_subscribed());
        assert!(!ability.ramps().is_active());
    }

    #[rstest]
    fn kinds_display_lowercase() {
        assert_eq!(AbilityKind::Fall.to_string(), "fall");
    }
}
