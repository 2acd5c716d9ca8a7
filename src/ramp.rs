//! Tick-driven velocity ramps.
//!
//! A ramp gradually changes the magnitude of the target velocity toward a
//! bound, one step per frame. Each ability owns one [`RampEngine`], which
//! holds at most one ramp at a time: starting a decrease replaces a running
//! increase and vice versa, so two ramps can never write the same velocity
//! concurrently. Cancelling is a matter of clearing the slot; the next
//! [`RampEngine::step`] then leaves the velocity alone.

use glam::Vec3;
use log::{debug, trace};

use crate::constants::COMPARE_VELOCITY_TOLERANCE;
use crate::properties::PhysicalProperties;

/// Which part of the target velocity a ramp measures and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisMask {
    /// The whole vector; speed is its length.
    Full,
    /// Only the X component; speed is `|x|` and Y/Z are never touched.
    Horizontal,
}

impl AxisMask {
    /// Speed of `velocity` as seen through this mask.
    #[must_use]
    pub fn speed(self, velocity: Vec3) -> f32 {
        match self {
            Self::Full => velocity.length(),
            Self::Horizontal => velocity.x.abs(),
        }
    }

    /// Signed speed of `velocity` measured along `direction`.
    fn speed_along(self, velocity: Vec3, direction: Vec3) -> f32 {
        match self {
            Self::Full => velocity.dot(direction),
            Self::Horizontal => velocity.x * direction.x,
        }
    }

    /// Writes `direction × speed` into the components covered by the mask.
    pub fn set_speed(self, props: &mut PhysicalProperties, speed: f32) {
        let direction = props.target_velocity_direction;
        match self {
            Self::Full => props.target_velocity = direction * speed,
            Self::Horizontal => props.target_velocity.x = direction.x * speed,
        }
    }

    /// Adds `direction × amount` to the components covered by the mask.
    fn add_speed(self, props: &mut PhysicalProperties, amount: f32) {
        let direction = props.target_velocity_direction;
        match self {
            Self::Full => props.target_velocity += direction * amount,
            Self::Horizontal => props.target_velocity.x += direction.x * amount,
        }
    }

    /// Whether the rounded speed already sits on `bound`.
    fn is_close_to(self, velocity: Vec3, bound: f32) -> bool {
        let rounded = match self {
            Self::Full => velocity.length().round_ties_even(),
            Self::Horizontal => velocity.x.round_ties_even().abs(),
        };
        rounded == bound
    }
}

/// Direction of a ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampKind {
    /// Speed grows toward a maximum.
    Increase,
    /// Speed shrinks toward a minimum.
    Decrease,
}

/// Outcome of one [`RampEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampStep {
    /// No ramp is active; nothing was written.
    Idle,
    /// The ramp changed the velocity and wants another step.
    Running,
    /// The ramp reached its bound on this step and released the slot.
    Finished(RampKind),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Idle,
    Increasing {
        acceleration: f32,
        max_speed: f32,
        advanced: bool,
    },
    Decreasing {
        deceleration: f32,
        min_speed: f32,
    },
}

/// Single-owner ramp controller for one ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampEngine {
    axis: AxisMask,
    slot: Slot,
}

impl RampEngine {
    /// Creates an idle engine operating on `axis`.
    #[must_use]
    pub const fn new(axis: AxisMask) -> Self {
        Self {
            axis,
            slot: Slot::Idle,
        }
    }

    /// Axis this engine measures and writes.
    #[must_use]
    pub const fn axis(&self) -> AxisMask {
        self.axis
    }

    /// Whether an increasing ramp owns the velocity.
    #[must_use]
    pub const fn is_increasing(&self) -> bool {
        matches!(self.slot, Slot::Increasing { .. })
    }

    /// Whether a decreasing ramp owns the velocity.
    #[must_use]
    pub const fn is_decreasing(&self) -> bool {
        matches!(self.slot, Slot::Decreasing { .. })
    }

    /// Whether any ramp is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.slot, Slot::Idle)
    }

    /// Starts raising speed toward `max_speed` at `acceleration` per second.
    ///
    /// Does nothing and returns `false` while an increase is already running,
    /// so repeated requests never restart or duplicate the ramp. A running
    /// decrease is superseded.
    pub fn start_increase(&mut self, acceleration: f32, max_speed: f32) -> bool {
        if self.is_increasing() {
            return false;
        }
        debug_assert!(acceleration >= 0.0, "negative acceleration {acceleration}");
        debug_assert!(max_speed >= 0.0, "negative max speed {max_speed}");
        debug!("increase ramp started: acceleration={acceleration} max={max_speed}");
        self.slot = Slot::Increasing {
            acceleration: acceleration.max(0.0),
            max_speed: max_speed.max(0.0),
            advanced: false,
        };
        true
    }

    /// Starts lowering speed toward `min_speed` at `deceleration` per second.
    ///
    /// Does nothing and returns `false` while a decrease is already running.
    /// A running increase is superseded.
    pub fn start_decrease(&mut self, deceleration: f32, min_speed: f32) -> bool {
        if self.is_decreasing() {
            return false;
        }
        debug_assert!(deceleration >= 0.0, "negative deceleration {deceleration}");
        debug_assert!(min_speed >= 0.0, "negative min speed {min_speed}");
        debug!("decrease ramp started: deceleration={deceleration} min={min_speed}");
        self.slot = Slot::Decreasing {
            deceleration: deceleration.max(0.0),
            min_speed: min_speed.max(0.0),
        };
        true
    }

    /// Cancels a running increase, leaving a decrease untouched.
    pub fn clear_increase(&mut self) {
        if self.is_increasing() {
            trace!("increase ramp cancelled");
            self.slot = Slot::Idle;
        }
    }

    /// Cancels a running decrease, leaving an increase untouched.
    pub fn clear_decrease(&mut self) {
        if self.is_decreasing() {
            trace!("decrease ramp cancelled");
            self.slot = Slot::Idle;
        }
    }

    /// Cancels whichever ramp is running.
    pub fn cancel_all(&mut self) {
        self.clear_increase();
        self.clear_decrease();
    }

    /// Advances the active ramp by one frame of `delta` seconds.
    ///
    /// The bound check happens before any write, so a ramp cleared since the
    /// previous step never mutates the velocity again.
    pub fn step(&mut self, props: &mut PhysicalProperties, delta: f32) -> RampStep {
        match self.slot {
            Slot::Idle => RampStep::Idle,
            Slot::Increasing {
                acceleration,
                max_speed,
                advanced,
            } => self.step_increase(props, delta, acceleration, max_speed, advanced),
            Slot::Decreasing {
                deceleration,
                min_speed,
            } => self.step_decrease(props, delta, deceleration, min_speed),
        }
    }

    fn step_increase(
        &mut self,
        props: &mut PhysicalProperties,
        delta: f32,
        acceleration: f32,
        max_speed: f32,
        advanced: bool,
    ) -> RampStep {
        let speed = self.axis.speed(props.target_velocity);
        if speed < max_speed {
            self.axis.add_speed(props, acceleration * delta);
            trace!("increase step: {:?}", props.target_velocity);
            self.slot = Slot::Increasing {
                acceleration,
                max_speed,
                advanced: true,
            };
            return RampStep::Running;
        }

        // A ramp that started above its bound leaves the velocity as it was.
        if self.axis.is_close_to(props.target_velocity, max_speed) || advanced {
            self.axis.set_speed(props, max_speed);
        }
        debug!("increase ramp finished at {:?}", props.target_velocity);
        self.slot = Slot::Idle;
        RampStep::Finished(RampKind::Increase)
    }

    fn step_decrease(
        &mut self,
        props: &mut PhysicalProperties,
        delta: f32,
        deceleration: f32,
        min_speed: f32,
    ) -> RampStep {
        let speed = self.axis.speed(props.target_velocity);
        if speed > min_speed + COMPARE_VELOCITY_TOLERANCE {
            self.axis.add_speed(props, -deceleration * delta);
            let along = self
                .axis
                .speed_along(props.target_velocity, props.target_velocity_direction);
            if along < min_speed {
                self.axis.set_speed(props, min_speed);
            }
            trace!("decrease step: {:?}", props.target_velocity);
            return RampStep::Running;
        }

        self.axis.set_speed(props, min_speed);
        debug!("decrease ramp finished at {:?}", props.target_velocity);
        self.slot = Slot::Idle;
        RampStep::Finished(RampKind::Decrease)
    }
}
