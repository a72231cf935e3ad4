use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::current::{Current, SwellStage};

/// Errors raised when validating a current profile.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("strength {0} must be positive")]
    NonPositiveStrength(f64),
    #[error("acceleration {0} must lie strictly inside (0, 1)")]
    AccelerationOutOfRange(f64),
    #[error("deceleration {0} must lie strictly inside (0, 1)")]
    DecelerationOutOfRange(f64),
    #[error("pre-current strength factor {0} must be positive")]
    NonPositivePreStrengthFactor(f64),
    #[error("pre-current acceleration factor {0} pushes the pre-swell ramp rate out of (0, 1)")]
    PreAccelerationTooSharp(f64),
    #[error("pre-current deceleration factor {0} pushes the pre-swell release rate out of (0, 1)")]
    PreDecelerationTooSharp(f64),
    #[error("zeroing threshold {0} must be positive")]
    NonPositiveZeroingThreshold(f64),
    #[error("vertical bounds inverted: minimum {minimum} exceeds maximum {maximum}")]
    InvertedZBounds { minimum: f64, maximum: f64 },
}

/// Plain-data description of a current, loadable from JSON.
///
/// Every field has a default so partial documents parse; [`validate`]
/// rejects configurations that would hang or misbehave a [`Current`]
/// (most importantly ratios at or above 1, which would keep the priming
/// loops from converging).
///
/// [`validate`]: CurrentProfile::validate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentProfile {
    #[serde(default = "default_strength")]
    pub strength: f64,
    #[serde(default)]
    pub direction: f64,
    #[serde(default = "default_acceleration")]
    pub acceleration: f64,
    #[serde(default = "default_deceleration")]
    pub deceleration: f64,
    #[serde(default = "default_pre_shaping_factor")]
    pub pre_current_acceleration_factor: f64,
    #[serde(default = "default_pre_shaping_factor")]
    pub pre_current_deceleration_factor: f64,
    #[serde(default = "default_pre_strength_factor")]
    pub pre_current_strength_factor: f64,
    #[serde(default)]
    pub z_adjustment_per_step: f64,
    #[serde(default = "default_maximum_z")]
    pub maximum_z_adjustment: f64,
    #[serde(default = "default_minimum_z")]
    pub minimum_z_adjustment: f64,
    #[serde(default = "default_zeroing_threshold")]
    pub minimum_xy_movement_before_zeroing: f64,
    #[serde(default)]
    pub entry_stage: SwellStage,
}

fn default_strength() -> f64 {
    1.0
}

fn default_acceleration() -> f64 {
    0.95
}

fn default_deceleration() -> f64 {
    0.97
}

fn default_pre_shaping_factor() -> f64 {
    2.0
}

fn default_pre_strength_factor() -> f64 {
    4.0
}

fn default_maximum_z() -> f64 {
    10.0
}

fn default_minimum_z() -> f64 {
    -10.0
}

fn default_zeroing_threshold() -> f64 {
    0.001
}

impl Default for CurrentProfile {
    fn default() -> Self {
        Self {
            strength: default_strength(),
            direction: 0.0,
            acceleration: default_acceleration(),
            deceleration: default_deceleration(),
            pre_current_acceleration_factor: default_pre_shaping_factor(),
            pre_current_deceleration_factor: default_pre_shaping_factor(),
            pre_current_strength_factor: default_pre_strength_factor(),
            z_adjustment_per_step: 0.0,
            maximum_z_adjustment: default_maximum_z(),
            minimum_z_adjustment: default_minimum_z(),
            minimum_xy_movement_before_zeroing: default_zeroing_threshold(),
            entry_stage: SwellStage::default(),
        }
    }
}

impl CurrentProfile {
    /// Parse a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Barely-there ambient drift.
    pub fn ambient() -> Self {
        Self {
            strength: 1.0,
            z_adjustment_per_step: 0.01,
            ..Self::default()
        }
    }

    /// Strong, fast-building surge.
    pub fn surge() -> Self {
        Self {
            strength: 8.0,
            acceleration: 0.9,
            deceleration: 0.95,
            z_adjustment_per_step: 0.05,
            ..Self::default()
        }
    }

    /// Check every numeric precondition a [`Current`] relies on.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.strength <= 0.0 {
            return Err(ProfileError::NonPositiveStrength(self.strength));
        }
        if self.acceleration <= 0.0 || self.acceleration >= 1.0 {
            return Err(ProfileError::AccelerationOutOfRange(self.acceleration));
        }
        if self.deceleration <= 0.0 || self.deceleration >= 1.0 {
            return Err(ProfileError::DecelerationOutOfRange(self.deceleration));
        }
        if self.pre_current_strength_factor <= 0.0 {
            return Err(ProfileError::NonPositivePreStrengthFactor(
                self.pre_current_strength_factor,
            ));
        }
        let pre_ramp_denominator = self.acceleration
            - (1.0 - self.acceleration) / self.pre_current_acceleration_factor;
        if self.pre_current_acceleration_factor <= 0.0 || pre_ramp_denominator <= 0.0 {
            return Err(ProfileError::PreAccelerationTooSharp(
                self.pre_current_acceleration_factor,
            ));
        }
        let pre_release_rate = self.deceleration
            - (1.0 - self.deceleration) / self.pre_current_deceleration_factor;
        if self.pre_current_deceleration_factor <= 0.0 || pre_release_rate <= 0.0 {
            return Err(ProfileError::PreDecelerationTooSharp(
                self.pre_current_deceleration_factor,
            ));
        }
        if self.minimum_xy_movement_before_zeroing <= 0.0 {
            return Err(ProfileError::NonPositiveZeroingThreshold(
                self.minimum_xy_movement_before_zeroing,
            ));
        }
        if self.minimum_z_adjustment > self.maximum_z_adjustment {
            return Err(ProfileError::InvertedZBounds {
                minimum: self.minimum_z_adjustment,
                maximum: self.maximum_z_adjustment,
            });
        }
        Ok(())
    }

    /// Validate, then construct a current from this profile.
    pub fn build(&self) -> Result<Current, ProfileError> {
        self.validate()?;
        let mut current = Current::new(self.strength, self.direction, self.z_adjustment_per_step)
            .with_entry_stage(self.entry_stage);
        current.acceleration = self.acceleration;
        current.deceleration = self.deceleration;
        current.pre_current_acceleration_factor = self.pre_current_acceleration_factor;
        current.pre_current_deceleration_factor = self.pre_current_deceleration_factor;
        current.pre_current_strength_factor = self.pre_current_strength_factor;
        current.maximum_z_adjustment = self.maximum_z_adjustment;
        current.minimum_z_adjustment = self.minimum_z_adjustment;
        current.minimum_xy_movement_before_zeroing = self.minimum_xy_movement_before_zeroing;
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_builds() {
        let current = CurrentProfile::default().build().unwrap();
        assert!(!current.is_active());
        assert!((current.strength - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parse_partial_document() {
        let json = r#"{
            "strength": 6.0,
            "direction": 45.0,
            "entry_stage": "MainUp"
        }"#;
        let profile = CurrentProfile::from_json(json).unwrap();
        assert!((profile.strength - 6.0).abs() < 1e-12);
        assert!((profile.acceleration - 0.95).abs() < 1e-12);
        assert_eq!(profile.entry_stage, SwellStage::MainUp);
        profile.validate().unwrap();
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(CurrentProfile::from_json("{ \"strength\": }").is_err());
    }

    #[test]
    fn acceleration_of_one_is_rejected() {
        let profile = CurrentProfile {
            acceleration: 1.0,
            ..CurrentProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ProfileError::AccelerationOutOfRange(1.0))
        );
    }

    #[test]
    fn deceleration_above_one_is_rejected() {
        let profile = CurrentProfile {
            deceleration: 1.5,
            ..CurrentProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ProfileError::DecelerationOutOfRange(1.5))
        );
    }

    #[test]
    fn negative_strength_is_rejected() {
        let profile = CurrentProfile {
            strength: -2.0,
            ..CurrentProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ProfileError::NonPositiveStrength(-2.0))
        );
    }

    #[test]
    fn overly_sharp_pre_factor_is_rejected() {
        // Factor so small the pre-swell ramp denominator goes negative.
        let profile = CurrentProfile {
            pre_current_acceleration_factor: 0.01,
            ..CurrentProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ProfileError::PreAccelerationTooSharp(0.01))
        );
    }

    #[test]
    fn inverted_z_bounds_are_rejected() {
        let profile = CurrentProfile {
            maximum_z_adjustment: -5.0,
            minimum_z_adjustment: 5.0,
            ..CurrentProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ProfileError::InvertedZBounds {
                minimum: 5.0,
                maximum: -5.0
            })
        );
    }

    #[test]
    fn presets_validate() {
        CurrentProfile::ambient().validate().unwrap();
        CurrentProfile::surge().validate().unwrap();
    }

    #[test]
    fn built_current_runs_a_full_cycle() {
        let mut current = CurrentProfile::surge().build().unwrap();
        current.start();
        for _ in 0..100_000 {
            current.increment_to_next_step();
            if !current.is_active() {
                return;
            }
        }
        panic!("surge preset never completed its cycle");
    }
}
