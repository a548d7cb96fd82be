//! Duration normalization and augmentation recipes.

mod technique;

pub use technique::{AugmentParams, Technique};

use crate::audio::{fit_length, target_length};
use crate::constants::{DEFAULT_SAMPLE_RATE, NORMALIZE_EPSILON};
use crate::dsp::{DspBackend, StandardBackend};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Loads fixed-length clips and applies augmentation recipes at a fixed
/// sample rate.
///
/// All signal processing is delegated to the backend `B`.
#[derive(Debug, Clone)]
pub struct AudioPreprocessor<B = StandardBackend> {
    sample_rate: u32,
    backend: B,
}

impl AudioPreprocessor<StandardBackend> {
    /// Create a preprocessor using the standard backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `sample_rate` is zero.
    pub fn new(sample_rate: u32) -> Result<Self> {
        Self::with_backend(sample_rate, StandardBackend)
    }
}

impl Default for AudioPreprocessor<StandardBackend> {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            backend: StandardBackend,
        }
    }
}

impl<B: DspBackend> AudioPreprocessor<B> {
    /// Create a preprocessor with a custom backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `sample_rate` is zero.
    pub fn with_backend(sample_rate: u32, backend: B) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidParameter {
                name: "sample rate",
                value: 0.0,
                reason: "must be positive",
            });
        }
        Ok(Self {
            sample_rate,
            backend,
        })
    }

    /// Target sample rate in Hz.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The backend doing the signal processing.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load `path` as exactly `round(sample_rate * duration)` mono samples.
    ///
    /// The backend is asked to decode at most `duration` seconds; the result
    /// is then zero-padded or truncated to the exact length either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a non-positive duration and
    /// [`Error::Load`] wrapping the cause if the file cannot be decoded.
    pub fn load_audio(&self, path: &Path, duration: f64) -> Result<Vec<f32>> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "duration",
                value: duration,
                reason: "must be positive and finite",
            });
        }

        let decoded = self
            .backend
            .decode(path, self.sample_rate, Some(duration))
            .map_err(|e| Error::load(path, e))?;

        let target = target_length(self.sample_rate, duration);
        debug!(
            "Loaded {} samples from {}, fitting to {}",
            decoded.len(),
            path.display(),
            target
        );

        Ok(fit_length(decoded, target))
    }

    /// Change the duration of `signal` by `rate` while keeping its pitch.
    ///
    /// `rate > 1` speeds up, `rate < 1` slows down. The output has roughly
    /// `signal.len() / rate` samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `rate` is not positive.
    pub fn time_stretch(&self, signal: &[f32], rate: f64) -> Result<Vec<f32>> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "time stretch rate",
                value: rate,
                reason: "must be positive and finite",
            });
        }
        self.backend.time_stretch(signal, rate)
    }

    /// Shift the pitch of `signal` by `n_steps` semitones, keeping its length.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn pitch_shift(&self, signal: &[f32], n_steps: i32) -> Result<Vec<f32>> {
        self.backend.pitch_shift(signal, self.sample_rate, n_steps)
    }

    /// Apply `technique` to `signal`.
    ///
    /// Cascaded techniques run in the order their name spells out.
    ///
    /// # Errors
    ///
    /// Propagates parameter and backend failures from the individual steps.
    pub fn apply_preprocessing(
        &self,
        signal: Vec<f32>,
        technique: Technique,
        time_stretch_rate: f64,
        pitch_shift_steps: i32,
    ) -> Result<Vec<f32>> {
        debug!(
            "Applying {technique} (rate {time_stretch_rate}, steps {pitch_shift_steps}) to {} samples",
            signal.len()
        );

        match technique {
            Technique::None => Ok(signal),
            Technique::TimeStretch => self.time_stretch(&signal, time_stretch_rate),
            Technique::PitchShift => self.pitch_shift(&signal, pitch_shift_steps),
            Technique::PitchThenTime => {
                let shifted = self.pitch_shift(&signal, pitch_shift_steps)?;
                self.time_stretch(&shifted, time_stretch_rate)
            }
            Technique::TimeThenPitch => {
                let stretched = self.time_stretch(&signal, time_stretch_rate)?;
                self.pitch_shift(&stretched, pitch_shift_steps)
            }
        }
    }

    /// Apply the recipe described by `params`.
    ///
    /// # Errors
    ///
    /// See [`apply_preprocessing`](Self::apply_preprocessing).
    pub fn apply(&self, signal: Vec<f32>, params: &AugmentParams) -> Result<Vec<f32>> {
        self.apply_preprocessing(
            signal,
            params.technique,
            params.time_stretch_rate,
            params.pitch_shift_steps,
        )
    }

    /// Peak-normalize `signal`.
    ///
    /// See [`normalize_audio`].
    #[must_use]
    pub fn normalize_audio(&self, signal: Vec<f32>) -> Vec<f32> {
        normalize_audio(signal)
    }
}

/// Scale `signal` so its largest magnitude sample lands at about ±1.0.
///
/// Every sample is divided by `max(|x|) + 1e-8`, so an all-zero signal stays
/// all zero instead of turning into NaN.
#[must_use]
pub fn normalize_audio(mut signal: Vec<f32>) -> Vec<f32> {
    let peak = signal.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    let divisor = peak + NORMALIZE_EPSILON;
    for sample in &mut signal {
        *sample /= divisor;
    }
    signal
}
