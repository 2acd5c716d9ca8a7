//! Rigid-body velocity sink.

use std::collections::{vec_deque, VecDeque};

use glam::Vec3;

/// Receives the target velocity once per physics step.
#[cfg_attr(test, mockall::automock)]
pub trait VelocitySink {
    /// Overwrites the body's linear velocity.
    fn apply_velocity(&mut self, velocity: Vec3);
}

/// Sink that remembers the velocities it was given.
///
/// Only the newest [`VelocityProbe::HISTORY_LIMIT`] velocities are kept, so a
/// long-running simulation holds a bounded amount of memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VelocityProbe {
    applied: VecDeque<Vec3>,
    received: usize,
}

impl VelocityProbe {
    /// Number of velocities retained in the history.
    pub const HISTORY_LIMIT: usize = 4096;

    /// Creates an empty probe.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applied: VecDeque::new(),
            received: 0,
        }
    }

    /// Most recent velocity, if any step has run.
    #[must_use]
    pub fn last(&self) -> Option<Vec3> {
        self.applied.back().copied()
    }

    /// Retained velocities, oldest first.
    #[must_use]
    pub fn history(&self) -> vec_deque::Iter<'_, Vec3> {
        self.applied.iter()
    }

    /// Total number of physics steps seen, including evicted ones.
    #[must_use]
    pub const fn received(&self) -> usize {
        self.received
    }
}

impl VelocitySink for VelocityProbe {
    fn apply_velocity(&mut self, velocity: Vec3) {
        if self.applied.len() == Self::HISTORY_LIMIT {
            self.applied.pop_front();
        }
        self.applied.push_back(velocity);
        self.received += 1;
    }
}
