//! Tuning values for the movement abilities.
//!
//! The host edits these as named numeric fields; this module loads them from
//! JSON and rejects values the abilities cannot work with. Once a
//! [`MovementConfig`] has passed [`MovementConfig::validate`], every rate and
//! bound is finite and non-negative, which the ramp engine relies on.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_MAX_HORIZONTAL_SPEED, GRAVITY_PULL};

/// Errors raised while loading or validating a [`MovementConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read movement config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration text is not valid JSON for [`MovementConfig`].
    #[error("failed to parse movement config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A rate or bound is below zero.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied for it.
        value: f32,
    },
    /// A value is NaN or infinite.
    #[error("`{field}` must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Movement tuning shared by the walk, jump and fall abilities.
///
/// Speeds are in units per second, rates in units per second squared.
/// `fall_acceleration` and `jump_acceleration` scale [`Self::gravity`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementConfig {
    /// Horizontal speed cap while airborne.
    pub max_horizontal_speed: f32,
    /// Horizontal acceleration while airborne.
    pub acceleration_in_air: f32,
    /// Horizontal deceleration while airborne.
    pub deceleration_in_air: f32,
    /// Gravity multiplier while falling.
    pub fall_acceleration: f32,
    /// Gravity multiplier while rising from a jump.
    pub jump_acceleration: f32,
    /// Vertical take-off speed of a jump.
    pub jump_velocity: f32,
    /// Speed cap on the ground.
    pub walk_max_speed: f32,
    /// Acceleration on the ground.
    pub walk_acceleration: f32,
    /// Deceleration on the ground.
    pub walk_deceleration: f32,
    /// Vertical gravity; negative pulls down.
    pub gravity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_horizontal_speed: DEFAULT_MAX_HORIZONTAL_SPEED,
            acceleration_in_air: 12.0,
            deceleration_in_air: 15.0,
            fall_acceleration: 1.5,
            jump_acceleration: 1.0,
            jump_velocity: 8.0,
            walk_max_speed: 6.0,
            walk_acceleration: 30.0,
            walk_deceleration: 40.0,
            gravity: GRAVITY_PULL,
        }
    }
}

impl MovementConfig {
    /// Parses and validates a configuration from JSON text.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields,
    /// and the validation errors described on [`Self::validate`].
    ///
    /// # Examples
    /// ```
    /// use locomotion::MovementConfig;
    /// let config = MovementConfig::from_json_str(r#"{ "max_horizontal_speed": 7.5 }"#).unwrap();
    /// assert_eq!(config.max_horizontal_speed, 7.5);
    /// assert_eq!(config.walk_max_speed, MovementConfig::default().walk_max_speed);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that every rate and bound is usable.
    ///
    /// `gravity` may be negative but must be finite; every other field must
    /// be finite and non-negative.
    ///
    /// # Errors
    /// Returns the first offending field as [`ConfigError::NonFinite`] or
    /// [`ConfigError::Negative`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.non_negative_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite { field: "gravity" });
        }
        Ok(())
    }

    const fn non_negative_fields(&self) -> [(&'static str, f32); 9] {
        [
            ("max_horizontal_speed", self.max_horizontal_speed),
            ("acceleration_in_air", self.acceleration_in_air),
            ("deceleration_in_air", self.deceleration_in_air),
            ("fall_acceleration", self.fall_acceleration),
            ("jump_acceleration", self.jump_acceleration),
            ("jump_velocity", self.jump_velocity),
            ("walk_max_speed", self.walk_max_speed),
            ("walk_acceleration", self.walk_acceleration),
            ("walk_deceleration", self.walk_deceleration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_is_valid() {
        assert!(MovementConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case::air_accel(r#"{ "acceleration_in_air": -1.0 }"#, "acceleration_in_air")]
    #[case::air_decel(r#"{ "deceleration_in_air": -0.5 }"#, "deceleration_in_air")]
    #[case::air_cap(r#"{ "max_horizontal_speed": -10.0 }"#, "max_horizontal_speed")]
    #[case::walk(r#"{ "walk_acceleration": -3.0 }"#, "walk_acceleration")]
    fn negative_values_are_rejected(#[case] text: &str, #[case] expected: &str) {
        match MovementConfig::from_json_str(text) {
            Err(ConfigError::Negative { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected negative-value error, got {other:?}"),
        }
    }

    #[rstest]
    fn negative_gravity_is_accepted() {
        let config = MovementConfig::from_json_str(r#"{ "gravity": -20.0 }"#)
            .expect("negative gravity is the normal case");
        assert_eq!(config.gravity, -20.0);
    }

    #[rstest]
    fn non_finite_values_are_rejected() {
        let config = MovementConfig {
            fall_acceleration: f32::INFINITY,
            ..MovementConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "fall_acceleration"
            })
        ));
    }

    #[rstest]
    fn unknown_fields_are_rejected() {
        let result = MovementConfig::from_json_str(r#"{ "max_speed": 3.0 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[rstest]
    fn missing_file_reports_io_error() {
        let result = MovementConfig::from_path("/definitely/not/here/movement.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
