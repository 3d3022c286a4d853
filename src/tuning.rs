//! Data-driven game balance
//!
//! Every knob the simulation reads lives here. Loaded from JSON; missing keys
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::CarProfile;

/// What happens when the round clock runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeoutPolicy {
    /// Leader wins; a tie goes to sudden death (next head hit wins)
    #[default]
    MostStarsWins,
    /// Clock is display-only and play continues at 00:00
    Informational,
}

impl TimeoutPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeoutPolicy::MostStarsWins => "MostStarsWins",
            TimeoutPolicy::Informational => "Informational",
        }
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Match ===
    /// Stars needed to win
    pub win_stars: u8,
    /// Round clock (seconds)
    pub round_duration: f32,
    /// Display points per head hit
    pub score_increment: u32,
    /// Clock expiry behaviour
    pub timeout_policy: TimeoutPolicy,

    // === Car physics (per reference frame) ===
    pub gravity: f32,
    pub accel_coefficient: f32,
    pub brake_damping: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    pub ground_bounce: f32,
    pub jump_impulse: f32,

    // === Car vs car ===
    pub restitution: f32,
    pub allowed_overlap: f32,

    // === Ramp launch ===
    pub ramp_slope_threshold: f32,
    pub ramp_speed_threshold: f32,
    pub ramp_boost: f32,

    // === Head hits ===
    pub head_offset_fraction: f32,
    pub head_radius_fraction: f32,
    pub body_hit_fraction: f32,

    // === Time ===
    /// Clamp for one real-time frame step (seconds)
    pub max_frame_step: f32,
    /// Time scale inside the slow-motion window
    pub slow_motion_factor: f32,
    /// Slow-motion window (wall-clock seconds)
    pub slow_motion_duration: f32,
    /// Scoring message lifetime (wall-clock seconds)
    pub score_message_duration: f32,

    // === Cars ===
    pub cars: [CarProfile; 2],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            win_stars: WIN_STARS,
            round_duration: ROUND_DURATION,
            score_increment: SCORE_INCREMENT,
            timeout_policy: TimeoutPolicy::default(),

            gravity: GRAVITY,
            accel_coefficient: ACCEL_COEFFICIENT,
            brake_damping: BRAKE_DAMPING,
            ground_friction: GROUND_FRICTION,
            air_friction: AIR_FRICTION,
            ground_bounce: GROUND_BOUNCE,
            jump_impulse: JUMP_IMPULSE,

            restitution: RESTITUTION,
            allowed_overlap: ALLOWED_OVERLAP,

            ramp_slope_threshold: RAMP_SLOPE_THRESHOLD,
            ramp_speed_threshold: RAMP_SPEED_THRESHOLD,
            ramp_boost: RAMP_BOOST,

            head_offset_fraction: HEAD_OFFSET_FRACTION,
            head_radius_fraction: HEAD_RADIUS_FRACTION,
            body_hit_fraction: BODY_HIT_FRACTION,

            max_frame_step: MAX_FRAME_STEP,
            slow_motion_factor: SLOW_MOTION_FACTOR,
            slow_motion_duration: SLOW_MOTION_DURATION,
            score_message_duration: SCORE_MESSAGE_DURATION,

            cars: [CarProfile::red(), CarProfile::blue()],
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning {
            field,
            reason: "must be finite and positive",
        })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning {
            field,
            reason: "must lie in [0, 1]",
        })
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_stars == 0 {
            return Err(ConfigError::InvalidTuning {
                field: "win_stars",
                reason: "must be at least 1",
            });
        }
        positive("round_duration", self.round_duration)?;
        positive("gravity", self.gravity)?;
        positive("max_frame_step", self.max_frame_step)?;
        positive("slow_motion_factor", self.slow_motion_factor)?;
        positive("head_radius_fraction", self.head_radius_fraction)?;
        positive("body_hit_fraction", self.body_hit_fraction)?;

        unit_interval("accel_coefficient", self.accel_coefficient)?;
        unit_interval("brake_damping", self.brake_damping)?;
        unit_interval("ground_friction", self.ground_friction)?;
        unit_interval("air_friction", self.air_friction)?;
        unit_interval("restitution", self.restitution)?;

        if !(-1.0..=0.0).contains(&self.ground_bounce) {
            return Err(ConfigError::InvalidTuning {
                field: "ground_bounce",
                reason: "must lie in [-1, 0]",
            });
        }
        if !(self.jump_impulse < 0.0) {
            return Err(ConfigError::InvalidTuning {
                field: "jump_impulse",
                reason: "must be negative (up)",
            });
        }
        for (field, value) in [
            ("allowed_overlap", self.allowed_overlap),
            ("ramp_slope_threshold", self.ramp_slope_threshold),
            ("ramp_speed_threshold", self.ramp_speed_threshold),
            ("ramp_boost", self.ramp_boost),
            ("head_offset_fraction", self.head_offset_fraction),
            ("slow_motion_duration", self.slow_motion_duration),
            ("score_message_duration", self.score_message_duration),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTuning {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }

        for car in &self.cars {
            positive("cars.half_size", car.half_size)?;
            positive("cars.max_speed", car.max_speed)?;
        }
        let [a, b] = &self.cars;
        if a.half_size != b.half_size {
            return Err(ConfigError::UnequalCarSizes(a.half_size, b.half_size));
        }

        Ok(())
    }

    /// Slow-motion window in milliseconds
    pub fn slow_motion_ms(&self) -> f64 {
        f64::from(self.slow_motion_duration) * 1000.0
    }

    /// Scoring message lifetime in milliseconds
    pub fn score_message_ms(&self) -> f64 {
        f64::from(self.score_message_duration) * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_only_named_keys() {
        let tuning = Tuning::from_json(r#"{ "win_stars": 3, "gravity": 0.8 }"#).unwrap();
        assert_eq!(tuning.win_stars, 3);
        assert!((tuning.gravity - 0.8).abs() < 1e-6);
        assert_eq!(tuning.round_duration, ROUND_DURATION);
        assert_eq!(tuning.cars, Tuning::default().cars);
    }

    #[test]
    fn test_timeout_policy_from_json() {
        let tuning = Tuning::from_json(r#"{ "timeout_policy": "Informational" }"#).unwrap();
        assert_eq!(tuning.timeout_policy, TimeoutPolicy::Informational);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "win_stars": 0 }"#),
            Err(ConfigError::InvalidTuning { field: "win_stars", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "jump_impulse": 5.0 }"#),
            Err(ConfigError::InvalidTuning { field: "jump_impulse", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "restitution": 1.5 }"#),
            Err(ConfigError::InvalidTuning { field: "restitution", .. })
        ));
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unequal_car_sizes() {
        let mut tuning = Tuning::default();
        tuning.cars[1].half_size += 4.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::UnequalCarSizes(_, _))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_policy_names_match_serde() {
        for policy in [TimeoutPolicy::MostStarsWins, TimeoutPolicy::Informational] {
            let json = serde_json::to_value(policy).unwrap();
            assert_eq!(json, policy.as_str());
        }
    }
}
