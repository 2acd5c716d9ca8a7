//! Owned collaborators and frame loops for machine-level tests.

use glam::Vec3;
use locomotion::{
    AnimationLog, Collaborators, LocomotionMachine, MovementConfig, StaticGround, VelocityProbe,
    DEFAULT_FIXED_DELTA, DEFAULT_FRAME_DELTA,
};

/// Ground, animation view and body for one simulated character.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Ground under the character.
    pub ground: StaticGround,
    /// Clips the machine started.
    pub view: AnimationLog,
    /// Velocities written by physics steps.
    pub body: VelocityProbe,
}

impl Scene {
    /// Scene in which the character stands on `ground`.
    ///
    /// # Examples
    /// ```
    /// use locomotion::StaticGround;
    /// use test_utils::Scene;
    /// let scene = Scene::on(StaticGround::flat());
    /// assert!(scene.ground.grounded);
    /// ```
    pub fn on(ground: StaticGround) -> Self {
        Self {
            ground,
            ..Self::default()
        }
    }

    /// Borrows the scene as machine collaborators.
    pub fn world(&mut self) -> Collaborators<'_> {
        Collaborators {
            scanner: &self.ground,
            view: &mut self.view,
            body: &mut self.body,
        }
    }

    /// Runs `frames` frames with one physics step before each frame update.
    pub fn run(&mut self, machine: &mut LocomotionMachine, frames: usize) {
        for _ in 0..frames {
            self.frame(machine);
        }
    }

    /// Runs a single physics step followed by a frame update.
    pub fn frame(&mut self, machine: &mut LocomotionMachine) {
        let mut world = self.world();
        machine.fixed_tick(&mut world, DEFAULT_FIXED_DELTA);
        machine.tick(&mut world, DEFAULT_FRAME_DELTA);
    }

    /// Runs frame updates only, leaving gravity out of the picture.
    pub fn run_ticks(&mut self, machine: &mut LocomotionMachine, frames: usize) {
        for _ in 0..frames {
            machine.tick(&mut self.world(), DEFAULT_FRAME_DELTA);
        }
    }
}

/// Machine with default tuning, not yet started, moving at `velocity`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use test_utils::airborne_machine;
/// let machine = airborne_machine(Vec3::new(15.0, 0.0, 0.0));
/// assert!(machine.active().is_none());
/// ```
pub fn airborne_machine(velocity: Vec3) -> LocomotionMachine {
    let mut machine = LocomotionMachine::new(MovementConfig::default());
    machine.properties_mut().target_velocity = velocity;
    machine
}
