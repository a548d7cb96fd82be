//! Signal-processing backends.
//!
//! [`AudioPreprocessor`](crate::preprocess::AudioPreprocessor) never touches
//! samples itself; every decode, resample, stretch and shift goes through a
//! [`DspBackend`]. [`StandardBackend`] is the default, built on symphonia,
//! rubato and rustfft.

mod pitch;
mod stft;
mod vocoder;

pub use pitch::pitch_shift;
pub use stft::Stft;
pub use vocoder::time_stretch;

use crate::audio;
use crate::error::Result;
use std::path::Path;

/// Capabilities the preprocessor needs from a DSP library.
pub trait DspBackend: Send + Sync {
    /// Decode `path` to mono samples at `target_rate`.
    ///
    /// When `max_duration` is set, at most that many seconds are decoded.
    fn decode(&self, path: &Path, target_rate: u32, max_duration: Option<f64>)
    -> Result<Vec<f32>>;

    /// Convert `samples` from `from_rate` to `to_rate`.
    fn resample(&self, samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>>;

    /// Change duration by `rate` while keeping pitch.
    fn time_stretch(&self, samples: &[f32], rate: f64) -> Result<Vec<f32>>;

    /// Shift pitch by `n_steps` semitones while keeping duration.
    fn pitch_shift(&self, samples: &[f32], sample_rate: u32, n_steps: i32) -> Result<Vec<f32>>;
}

/// Default backend: symphonia decoding, rubato resampling and an STFT phase
/// vocoder for stretching and shifting.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBackend;

impl DspBackend for StandardBackend {
    fn decode(
        &self,
        path: &Path,
        target_rate: u32,
        max_duration: Option<f64>,
    ) -> Result<Vec<f32>> {
        let decoded = audio::decode_audio_file(path, max_duration)?;
        self.resample(decoded.samples, decoded.sample_rate, target_rate)
    }

    fn resample(&self, samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
        audio::resample(samples, from_rate, to_rate)
    }

    fn time_stretch(&self, samples: &[f32], rate: f64) -> Result<Vec<f32>> {
        vocoder::time_stretch(samples, rate)
    }

    fn pitch_shift(&self, samples: &[f32], sample_rate: u32, n_steps: i32) -> Result<Vec<f32>> {
        pitch::pitch_shift(samples, sample_rate, n_steps)
    }
}
