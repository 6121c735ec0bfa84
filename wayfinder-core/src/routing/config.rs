//! Tunable routing policy

use serde::{Deserialize, Serialize};

use crate::{DisplayDistance, Error, Weight};

/// Extra weight for moving between floors, in raw coordinate units
pub const DEFAULT_FLOOR_CHANGE_PENALTY: Weight = 500.0;
/// Smallest bearing change, in degrees, narrated as a turn
pub const DEFAULT_MIN_TURN_ANGLE: f64 = 30.0;
/// Largest bearing change, in degrees, narrated as a turn
pub const DEFAULT_MAX_TURN_ANGLE: f64 = 150.0;
/// Raw coordinate units per display unit (meter)
pub const DEFAULT_DISTANCE_SCALE: f64 = 10.0;

/// Bearing changes strictly between `min_angle` and `max_angle` degrees are
/// narrated as turns, anything else is walked straight through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnThresholds {
    pub min_angle: f64,
    pub max_angle: f64,
}

impl Default for TurnThresholds {
    fn default() -> Self {
        Self {
            min_angle: DEFAULT_MIN_TURN_ANGLE,
            max_angle: DEFAULT_MAX_TURN_ANGLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub floor_change_penalty: Weight,
    pub turn: TurnThresholds,
    pub distance_scale: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            floor_change_penalty: DEFAULT_FLOOR_CHANGE_PENALTY,
            turn: TurnThresholds::default(),
            distance_scale: DEFAULT_DISTANCE_SCALE,
        }
    }
}

impl RoutingConfig {
    /// Checks that the policy values keep edge weights non-negative and the
    /// turn window well formed
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` describing the first offending value.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.floor_change_penalty.is_finite() || self.floor_change_penalty < 0.0 {
            return Err(Error::InvalidData(format!(
                "floor change penalty must be a non-negative number, got {}",
                self.floor_change_penalty
            )));
        }
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err(Error::InvalidData(format!(
                "distance scale must be positive, got {}",
                self.distance_scale
            )));
        }
        let TurnThresholds {
            min_angle,
            max_angle,
        } = self.turn;
        if !(0.0..=180.0).contains(&min_angle)
            || !(0.0..=180.0).contains(&max_angle)
            || min_angle >= max_angle
        {
            return Err(Error::InvalidData(format!(
                "turn thresholds must satisfy 0 <= min < max <= 180, got {min_angle} and {max_angle}"
            )));
        }
        Ok(())
    }

    /// Converts a raw coordinate distance to rounded display units
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn display_distance(&self, raw: Weight) -> DisplayDistance {
        (raw / self.distance_scale).round() as DisplayDistance
    }
}
