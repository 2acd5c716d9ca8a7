//! Locomotion constants shared by the abilities and the ramp engine.

/// Band within which a decreasing ramp treats the bound as reached.
///
/// Deceleration approaches its target asymptotically, so the ramp stops
/// inside this band and then writes the bound exactly.
pub const COMPARE_VELOCITY_TOLERANCE: f32 = 0.5;

/// Vertical gravity used when the configuration does not override it.
pub const GRAVITY_PULL: f32 = -9.81;

/// Physics step used by the headless runner and the test helpers.
pub const DEFAULT_FIXED_DELTA: f32 = 0.02;

/// Frame step used by the headless runner and the test helpers.
pub const DEFAULT_FRAME_DELTA: f32 = 1.0 / 60.0;

/// Horizontal speed cap applied while airborne.
pub const DEFAULT_MAX_HORIZONTAL_SPEED: f32 = 10.0;

/// Half-turn in degrees; facing reversal rotates by this amount.
pub const HALF_TURN_DEGREES: f32 = 180.0;
