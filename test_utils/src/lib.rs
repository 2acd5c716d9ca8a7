//! Utility helpers for tests.
//!
//! Scenario helpers driving a [`LocomotionMachine`] against owned stand-ins
//! for the host's collaborators.
pub mod scene;

pub use scene::{airborne_machine, Scene};
