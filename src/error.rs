//! Configuration errors
//!
//! The simulation itself never fails; only bad setup (viewport, tuning) does.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid viewport {width}x{height}: dimensions must be finite and positive")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Invalid tuning value `{field}`: {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Car profiles must share one body size (got {0} and {1})")]
    UnequalCarSizes(f32, f32),

    #[error("Malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read tuning file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fail fast on viewports that would produce NaN geometry
pub fn check_viewport(width: f32, height: f32) -> Result<(), ConfigError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_viewport() {
        assert!(check_viewport(800.0, 600.0).is_ok());
        assert!(matches!(
            check_viewport(0.0, 600.0),
            Err(ConfigError::InvalidViewport { .. })
        ));
        assert!(check_viewport(800.0, -1.0).is_err());
        assert!(check_viewport(f32::NAN, 600.0).is_err());
        assert!(check_viewport(f32::INFINITY, 600.0).is_err());
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = ConfigError::InvalidTuning {
            field: "gravity",
            reason: "must be positive",
        };
        assert_eq!(
            err.to_string(),
            "Invalid tuning value `gravity`: must be positive"
        );
    }
}
