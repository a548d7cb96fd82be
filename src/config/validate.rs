//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if defaults.sample_rate == 0 {
        return Err(Error::ConfigValidation {
            message: "sample_rate must be at least 1".to_string(),
        });
    }

    if !defaults.duration.is_finite() || defaults.duration <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("duration must be positive, got {}", defaults.duration),
        });
    }

    if !defaults.time_stretch_rate.is_finite() || defaults.time_stretch_rate <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "time_stretch_rate must be positive, got {}",
                defaults.time_stretch_rate
            ),
        });
    }

    Ok(())
}
