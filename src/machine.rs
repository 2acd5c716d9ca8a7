//! Per-character state machine switching between movement abilities.
//!
//! The machine owns the character's physical state and the single active
//! [`Ability`]. The host feeds it frames, physics steps and input events
//! together with the collaborators it should talk to; every callback builds
//! a fresh [`MotionContext`] so the active ability is the only writer of the
//! target velocity for its duration.

use log::{debug, info, warn};
use thiserror::Error;

use crate::ability::{Ability, AbilityKind, JumpAbility};
use crate::animation::AnimationView;
use crate::body::VelocitySink;
use crate::config::MovementConfig;
use crate::context::MotionContext;
use crate::environment::GroundScanner;
use crate::facing::FacingController;
use crate::input::{InputEvent, MovementInput};
use crate::properties::PhysicalProperties;
use crate::ramp::RampStep;

/// A requested ability switch was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The target ability is blocked by restrictors.
    #[error("cannot enter {target}: {count} active restrictor(s)")]
    Restricted {
        /// Ability that was requested.
        target: AbilityKind,
        /// Restrictors currently registered against it.
        count: u32,
    },
    /// Jumping needs ground contact.
    #[error("cannot jump while not walking on the ground")]
    NotGrounded,
}

/// Host-side services borrowed for one machine callback.
pub struct Collaborators<'a> {
    /// Ground slope and contact.
    pub scanner: &'a dyn GroundScanner,
    /// Animation notifications.
    pub view: &'a mut dyn AnimationView,
    /// Rigid body receiving the target velocity.
    pub body: &'a mut dyn VelocitySink,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Restrictors {
    walk: u32,
    jump: u32,
    fall: u32,
}

impl Restrictors {
    const fn count(&self, kind: AbilityKind) -> u32 {
        match kind {
            AbilityKind::Walk => self.walk,
            AbilityKind::Jump => self.jump,
            AbilityKind::Fall => self.fall,
        }
    }

    const fn slot(&mut self, kind: AbilityKind) -> &mut u32 {
        match kind {
            AbilityKind::Walk => &mut self.walk,
            AbilityKind::Jump => &mut self.jump,
            AbilityKind::Fall => &mut self.fall,
        }
    }
}

/// Owns one character's locomotion state.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionMachine {
    config: MovementConfig,
    properties: PhysicalProperties,
    facing: FacingController,
    input: MovementInput,
    active: Option<Ability>,
    restrictors: Restrictors,
}

fn context<'a>(
    properties: &'a mut PhysicalProperties,
    input: &'a MovementInput,
    facing: &'a mut FacingController,
    world: &'a mut Collaborators<'_>,
) -> MotionContext<'a> {
    MotionContext {
        properties,
        input,
        facing,
        scanner: world.scanner,
        view: &mut *world.view,
        body: &mut *world.body,
    }
}

impl LocomotionMachine {
    /// Creates a machine at rest, facing right, with no active ability.
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        Self {
            properties: PhysicalProperties::from_config(&config),
            config,
            facing: FacingController::default(),
            input: MovementInput::default(),
            active: None,
            restrictors: Restrictors::default(),
        }
    }

    /// Configuration the abilities are built from.
    #[must_use]
    pub const fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Current physical state.
    #[must_use]
    pub const fn properties(&self) -> &PhysicalProperties {
        &self.properties
    }

    /// Mutable physical state, for hosts that teleport or launch the
    /// character between callbacks.
    pub const fn properties_mut(&mut self) -> &mut PhysicalProperties {
        &mut self.properties
    }

    /// Current facing.
    #[must_use]
    pub const fn facing(&self) -> &FacingController {
        &self.facing
    }

    /// Current horizontal input.
    #[must_use]
    pub const fn input(&self) -> &MovementInput {
        &self.input
    }

    /// The active ability, once started.
    #[must_use]
    pub const fn active(&self) -> Option<&Ability> {
        self.active.as_ref()
    }

    /// Kind of the active ability, once started.
    #[must_use]
    pub fn active_kind(&self) -> Option<AbilityKind> {
        self.active.as_ref().map(Ability::kind)
    }

    /// Enters the first ability: walking when grounded, falling otherwise.
    ///
    /// # Errors
    /// Returns [`TransitionError::Restricted`] when that ability is blocked.
    pub fn start(&mut self, world: &mut Collaborators<'_>) -> Result<(), TransitionError> {
        let initial = if world.scanner.is_grounded() {
            AbilityKind::Walk
        } else {
            AbilityKind::Fall
        };
        info!("locomotion started in {initial}");
        self.transition_to(initial, world)
    }

    /// Exits the active ability, if any, and enters `target`.
    ///
    /// Requesting the ability that is already active does nothing.
    ///
    /// # Errors
    /// Returns [`TransitionError::Restricted`] while `target` has restrictors;
    /// the active ability is left untouched.
    pub fn transition_to(
        &mut self,
        target: AbilityKind,
        world: &mut Collaborators<'_>,
    ) -> Result<(), TransitionError> {
        if self.active_kind() == Some(target) {
            return Ok(());
        }
        let count = self.restrictors.count(target);
        if count > 0 {
            return Err(TransitionError::Restricted { target, count });
        }

        let mut ctx = context(&mut self.properties, &self.input, &mut self.facing, world);
        if let Some(mut previous) = self.active.take() {
            previous.on_exit(&mut ctx);
            debug!("{} -> {target}", previous.kind());
        }
        let mut next = Ability::from_config(target, &self.config);
        next.on_enter(&mut ctx);
        self.active = Some(next);
        Ok(())
    }

    /// Blocks entering `kind` until a matching [`Self::remove_restrictor`].
    pub fn add_restrictor(&mut self, kind: AbilityKind) {
        let slot = self.restrictors.slot(kind);
        *slot = slot.saturating_add(1);
    }

    /// Releases one restrictor registered against `kind`.
    pub fn remove_restrictor(&mut self, kind: AbilityKind) {
        let slot = self.restrictors.slot(kind);
        if *slot == 0 {
            warn!("no restrictor on {kind} to remove");
            return;
        }
        *slot -= 1;
    }

    /// Number of restrictors currently registered against `kind`.
    #[must_use]
    pub const fn restrictor_count(&self, kind: AbilityKind) -> u32 {
        self.restrictors.count(kind)
    }

    /// Frame update: applies automatic transitions, then ticks the active
    /// ability.
    pub fn tick(&mut self, world: &mut Collaborators<'_>, delta: f32) -> RampStep {
        self.apply_automatic_transitions(world);
        let mut ctx = context(&mut self.properties, &self.input, &mut self.facing, world);
        match self.active.as_mut() {
            Some(active) => active.tick(&mut ctx, delta),
            None => RampStep::Idle,
        }
    }

    /// Physics step of the active ability.
    pub fn fixed_tick(&mut self, world: &mut Collaborators<'_>, fixed_delta: f32) {
        let mut ctx = context(&mut self.properties, &self.input, &mut self.facing, world);
        if let Some(active) = self.active.as_ref() {
            active.fixed_tick(&mut ctx, fixed_delta);
        }
    }

    /// Horizontal input now reads `direction`.
    ///
    /// A zero direction is a release.
    pub fn engage_horizontal(&mut self, direction: f32, world: &mut Collaborators<'_>) {
        self.input.set_horizontal(direction);
        let event = if self.input.is_engaged() {
            InputEvent::Engaged
        } else {
            InputEvent::Released
        };
        self.deliver(event, world);
    }

    /// Horizontal input was let go.
    pub fn release_horizontal(&mut self, world: &mut Collaborators<'_>) {
        self.input.release();
        self.deliver(InputEvent::Released, world);
    }

    /// Takes off when walking on the ground.
    ///
    /// # Errors
    /// Returns [`TransitionError::NotGrounded`] unless walking with ground
    /// contact, or [`TransitionError::Restricted`] when jumping is blocked.
    pub fn jump(&mut self, world: &mut Collaborators<'_>) -> Result<(), TransitionError> {
        if self.active_kind() != Some(AbilityKind::Walk) || !world.scanner.is_grounded() {
            return Err(TransitionError::NotGrounded);
        }
        self.transition_to(AbilityKind::Jump, world)
    }

    fn deliver(&mut self, event: InputEvent, world: &mut Collaborators<'_>) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if !active.is_subscribed() {
            return;
        }
        let mut ctx = context(&mut self.properties, &self.input, &mut self.facing, world);
        match event {
            InputEvent::Engaged => active.handle_movement_input(&mut ctx),
            InputEvent::Released => active.cancel_movement_input(&mut ctx),
        }
    }

    fn apply_automatic_transitions(&mut self, world: &mut Collaborators<'_>) {
        let grounded = world.scanner.is_grounded();
        let next = match self.active_kind() {
            Some(AbilityKind::Walk) if !grounded => AbilityKind::Fall,
            Some(AbilityKind::Fall) if grounded => AbilityKind::Walk,
            Some(AbilityKind::Jump) if JumpAbility::has_peaked(&self.properties) => {
                AbilityKind::Fall
            }
            _ => return,
        };
        if let Err(err) = self.transition_to(next, world) {
            debug!("automatic transition skipped: {err}");
        }
    }
}
