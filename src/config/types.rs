//! Configuration type definitions.

use crate::constants::{
    DEFAULT_DURATION, DEFAULT_PITCH_SHIFT_STEPS, DEFAULT_SAMPLE_RATE, DEFAULT_TIME_STRETCH_RATE,
};
use crate::preprocess::{AugmentParams, Technique};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default augmentation settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default augmentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Target sample rate in Hz.
    pub sample_rate: u32,

    /// Clip duration in seconds after loading.
    pub duration: f64,

    /// Augmentation technique.
    pub technique: Technique,

    /// Time-stretch rate.
    pub time_stretch_rate: f64,

    /// Pitch shift in semitones.
    pub pitch_shift_steps: i32,

    /// Peak-normalize output.
    pub normalize: bool,
}

impl DefaultsConfig {
    /// Augmentation parameters described by these defaults.
    #[must_use]
    pub fn augment_params(&self) -> AugmentParams {
        AugmentParams {
            technique: self.technique,
            time_stretch_rate: self.time_stretch_rate,
            pitch_shift_steps: self.pitch_shift_steps,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: DEFAULT_DURATION,
            technique: Technique::None,
            time_stretch_rate: DEFAULT_TIME_STRETCH_RATE,
            pitch_shift_steps: DEFAULT_PITCH_SHIFT_STEPS,
            normalize: true,
        }
    }
}
