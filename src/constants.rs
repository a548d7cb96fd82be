//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "augment";

/// Default target sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default clip duration in seconds after loading.
pub const DEFAULT_DURATION: f64 = 2.0;

/// Default time-stretch rate (identity).
pub const DEFAULT_TIME_STRETCH_RATE: f64 = 1.0;

/// Default pitch shift in semitones (identity).
pub const DEFAULT_PITCH_SHIFT_STEPS: i32 = 0;

/// Added to the peak magnitude before dividing during peak normalization.
///
/// Keeps silent signals finite.
pub const NORMALIZE_EPSILON: f32 = 1e-8;

/// Semitones per octave.
pub const SEMITONES_PER_OCTAVE: f64 = 12.0;

/// Phase vocoder parameters.
pub mod stft {
    /// FFT frame size in samples.
    pub const N_FFT: usize = 2048;

    /// Hop between analysis frames in samples.
    pub const HOP_LENGTH: usize = N_FFT / 4;

    /// Slowest accepted stretch rate; the output is at most 32x the input.
    pub const MIN_STRETCH_RATE: f64 = 1.0 / 32.0;
}

/// Pitch shift parameters.
pub mod pitch {
    /// Largest accepted shift in either direction (four octaves).
    pub const MAX_STEPS: u32 = 48;

    /// Denominator of the rational resampling ratio used after stretching.
    ///
    /// Keeps the FFT resampler's chunk small for every step count; the ratio
    /// error stays below 0.05% (under one cent).
    pub const RATIO_DENOMINATOR: u32 = 1000;
}

/// Resampler parameters.
pub mod resample {
    /// Input chunk size fed to the FFT resampler.
    pub const CHUNK_SIZE: usize = 1024;

    /// Sub-chunks per chunk.
    pub const SUB_CHUNKS: usize = 1;
}

/// Audio file extensions picked up when scanning directories.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "m4a", "aac", "ogg"];

/// Extension of augmented output files.
pub const OUTPUT_EXTENSION: &str = "wav";

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "AUGMENT_CONFIG";
