//! Horizontal movement input as seen by the abilities.

/// Discrete input notifications delivered to the active ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Horizontal movement input became active or changed direction.
    Engaged,
    /// Horizontal movement input was released.
    Released,
}

/// Live horizontal axis value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementInput {
    horizontal: f32,
}

impl MovementInput {
    /// Input holding `direction`.
    #[must_use]
    pub fn holding(direction: f32) -> Self {
        let mut input = Self::default();
        input.set_horizontal(direction);
        input
    }

    /// Current horizontal direction in `[-1, 1]`; zero means no input.
    #[must_use]
    pub const fn horizontal_direction(&self) -> f32 {
        self.horizontal
    }

    /// Whether any horizontal input is held.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.horizontal != 0.0
    }

    /// Stores a new axis value.
    ///
    /// NaN reads as no input; everything else is clamped to `[-1, 1]`.
    pub fn set_horizontal(&mut self, direction: f32) {
        self.horizontal = if direction.is_nan() {
            0.0
        } else {
            direction.clamp(-1.0, 1.0)
        };
    }

    /// Drops the axis back to zero.
    pub fn release(&mut self) {
        self.horizontal = 0.0;
    }
}
