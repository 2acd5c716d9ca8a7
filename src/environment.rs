//! Ground information consumed by the abilities.

/// Source of ground contact and slope information.
///
/// Implemented by the host's environment scanner; the abilities only read it.
#[cfg_attr(test, mockall::automock)]
pub trait GroundScanner {
    /// Signed slope of the ground under the character, in degrees.
    ///
    /// Positive values are uphill to the right.
    fn ground_signed_angle(&self) -> f32;

    /// Whether the character currently stands on the ground.
    fn is_grounded(&self) -> bool;
}

/// Ground with a fixed slope and contact state.
///
/// Useful for headless runs where no real scanner exists.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticGround {
    /// Slope reported by [`GroundScanner::ground_signed_angle`].
    pub signed_angle: f32,
    /// Contact reported by [`GroundScanner::is_grounded`].
    pub grounded: bool,
}

impl StaticGround {
    /// Flat ground the character stands on.
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            signed_angle: 0.0,
            grounded: true,
        }
    }

    /// No ground below the character.
    #[must_use]
    pub const fn airborne() -> Self {
        Self {
            signed_angle: 0.0,
            grounded: false,
        }
    }

    /// Sloped ground the character stands on.
    #[must_use]
    pub const fn slope(signed_angle: f32) -> Self {
        Self {
            signed_angle,
            grounded: true,
        }
    }
}

impl GroundScanner for StaticGround {
    fn ground_signed_angle(&self) -> f32 {
        self.signed_angle
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }
}
