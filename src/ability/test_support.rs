//! Owned collaborators for driving a single ability in unit tests.

use glam::Vec3;

use crate::animation::AnimationLog;
use crate::body::VelocityProbe;
use crate::context::MotionContext;
use crate::environment::{GroundScanner, StaticGround};
use crate::facing::FacingController;
use crate::input::MovementInput;
use crate::properties::PhysicalProperties;

pub(crate) const FRAME: f32 = 1.0 / 60.0;
pub(crate) const PHYSICS: f32 = 0.02;

pub(crate) struct Harness {
    pub(crate) props: PhysicalProperties,
    pub(crate) input: MovementInput,
    pub(crate) facing: FacingController,
    pub(crate) ground: StaticGround,
    pub(crate) view: AnimationLog,
    pub(crate) body: VelocityProbe,
}

impl Harness {
    /// Airborne character moving at `velocity` while holding `input`.
    pub(crate) fn with(velocity: Vec3, input: f32) -> Self {
        Self {
            props: PhysicalProperties::default().with_velocity(velocity),
            input: MovementInput::holding(input),
            facing: FacingController::default(),
            ground: StaticGround::airborne(),
            view: AnimationLog::default(),
            body: VelocityProbe::new(),
        }
    }

    pub(crate) fn on_ground(mut self, ground: StaticGround) -> Self {
        self.ground = ground;
        self
    }

    pub(crate) fn ctx(&mut self) -> MotionContext<'_> {
        MotionContext {
            properties: &mut self.props,
            input: &self.input,
            facing: &mut self.facing,
            scanner: &self.ground,
            view: &mut self.view,
            body: &mut self.body,
        }
    }

    pub(crate) fn ctx_with<'a>(&'a mut self, scanner: &'a dyn GroundScanner) -> MotionContext<'a> {
        MotionContext {
            properties: &mut self.props,
            input: &self.input,
            facing: &mut self.facing,
            scanner,
            view: &mut self.view,
            body: &mut self.body,
        }
    }

    pub(crate) fn vx(&self) -> f32 {
        self.props.target_velocity.x
    }
}
