//! Mutable context handed to the active ability.

use crate::animation::AnimationView;
use crate::body::VelocitySink;
use crate::environment::GroundScanner;
use crate::facing::FacingController;
use crate::input::MovementInput;
use crate::properties::PhysicalProperties;

/// Everything an ability may read or write during one callback.
///
/// Holding the only `&mut PhysicalProperties` for the duration of a callback
/// is what makes the active ability the sole writer of the target velocity.
pub struct MotionContext<'a> {
    /// Target velocity and rate constants.
    pub properties: &'a mut PhysicalProperties,
    /// Current horizontal input.
    pub input: &'a MovementInput,
    /// Character yaw.
    pub facing: &'a mut FacingController,
    /// Ground slope and contact.
    pub scanner: &'a dyn GroundScanner,
    /// Animation notifications.
    pub view: &'a mut dyn AnimationView,
    /// Rigid body receiving the velocity.
    pub body: &'a mut dyn VelocitySink,
}

impl MotionContext<'_> {
    /// Horizontal input direction.
    #[must_use]
    pub fn input_direction(&self) -> f32 {
        self.input.horizontal_direction()
    }

    /// Horizontal component of the target velocity.
    #[must_use]
    pub fn horizontal_velocity(&self) -> f32 {
        self.properties.horizontal_velocity()
    }
}
