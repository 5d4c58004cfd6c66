//! Data-driven game balance
//!
//! Defaults reproduce the reference arcade behaviour. A JSON override can be
//! supplied by the host (e.g. embedded in the page) and is validated before use.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Edge length of an enemy's square hitbox
    pub enemy_size: f32,
    /// Slowest enemy speed (units per tick)
    pub speed_min: f32,
    /// Fastest enemy speed (units per tick, exclusive)
    pub speed_max: f32,
    /// Points per kill, multiplied by the current combo
    pub base_points: u64,
    /// Every Nth cumulative kill spawns one extra enemy
    pub escalation_interval: u32,
    /// Enemies at or left of this x end the session
    pub boundary_x: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_size: 40.0,
            // (rand * 1.5 + 1.5) / 5
            speed_min: 0.3,
            speed_max: 0.6,
            base_points: 100,
            escalation_interval: 5,
            boundary_x: 0.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::InvalidJson)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.enemy_size.is_finite() && self.enemy_size > 0.0) {
            return Err(TuningError::InvalidEnemySize(self.enemy_size));
        }
        if !(self.speed_min.is_finite()
            && self.speed_max.is_finite()
            && self.speed_min > 0.0
            && self.speed_min <= self.speed_max)
        {
            return Err(TuningError::InvalidSpeedRange {
                min: self.speed_min,
                max: self.speed_max,
            });
        }
        if self.escalation_interval == 0 {
            return Err(TuningError::ZeroEscalationInterval);
        }
        Ok(())
    }
}

/// Errors raised while loading a tuning override.
#[derive(Debug)]
pub enum TuningError {
    /// The document was not valid JSON for `Tuning`.
    InvalidJson(serde_json::Error),
    /// Enemy size must be a positive, finite number.
    InvalidEnemySize(f32),
    /// Speed range must be positive with `min <= max`.
    InvalidSpeedRange { min: f32, max: f32 },
    /// Escalation interval of zero would divide by zero.
    ZeroEscalationInterval,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(error) => write!(f, "could not parse tuning: {error}"),
            Self::InvalidEnemySize(size) => {
                write!(f, "enemy size must be positive (received {size})")
            }
            Self::InvalidSpeedRange { min, max } => {
                write!(f, "speed range {min}..{max} is not a positive ascending range")
            }
            Self::ZeroEscalationInterval => write!(f, "escalation interval must be at least 1"),
        }
    }
}

impl Error for TuningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.enemy_size, 40.0);
        assert_eq!(tuning.escalation_interval, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy_size": 30.0 }"#).expect("valid tuning");
        assert_eq!(tuning.enemy_size, 30.0);
        assert_eq!(tuning.base_points, 100);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "escalation_interval": 0 }"#),
            Err(TuningError::ZeroEscalationInterval)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "speed_min": 0.9, "speed_max": 0.1 }"#),
            Err(TuningError::InvalidSpeedRange { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "enemy_size": -1.0 }"#),
            Err(TuningError::InvalidEnemySize(_))
        ));
        assert!(matches!(Tuning::from_json("not json"), Err(TuningError::InvalidJson(_))));
    }
}
