#![cfg_attr(docsrs, feature(doc_cfg))]
//! Ability-driven locomotion for a side-on third-person character.
//! Re-exports the abilities, the ramp engine and the state machine for the
//! headless runner and tests.
pub mod ability;
pub mod animation;
pub mod body;
pub mod config;
pub mod constants;
pub mod context;
pub mod environment;
pub mod facing;
pub mod input;
pub mod logging;
pub mod machine;
pub mod properties;
pub mod ramp;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use ability::{
    Ability, AbilityKind, AirborneMotion, FallAbility, JumpAbility, MotionProfile, MovementCore,
    WalkAbility, WalkRates,
};
pub use animation::{AnimationClip, AnimationLog, AnimationView};
pub use body::{VelocityProbe, VelocitySink};
pub use config::{ConfigError, MovementConfig};
pub use context::MotionContext;
pub use environment::{GroundScanner, StaticGround};
pub use facing::{is_same_horizontal_direction, FacingController};
pub use input::{InputEvent, MovementInput};
pub use logging::init as init_logging;
pub use machine::{Collaborators, LocomotionMachine, TransitionError};
pub use properties::PhysicalProperties;
pub use ramp::{AxisMask, RampEngine, RampKind, RampStep};
pub use vector_math::{align_with, movement_sign, rotate_about_z};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use locomotion::prelude::*;
    //! ```

    pub use crate::AbilityKind;
    pub use crate::Collaborators;
    pub use crate::GroundScanner;
    pub use crate::LocomotionMachine;
    pub use crate::MovementConfig;
    pub use crate::RampStep;
    pub use crate::StaticGround;
    pub use glam::Vec3;
}
