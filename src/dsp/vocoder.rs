//! Phase vocoder time-stretching.

use super::stft::{Frame, Stft};
use crate::constants::stft::{HOP_LENGTH, MIN_STRETCH_RATE, N_FFT};
use crate::error::{Error, Result};
use rustfft::num_complex::Complex;
use std::f32::consts::PI;

/// Stretch `samples` by `rate` without changing pitch.
///
/// `rate > 1` shortens the signal, `rate < 1` lengthens it. The output has
/// `round(len / rate)` samples. Rates below [`MIN_STRETCH_RATE`] are
/// rejected rather than allocating an unbounded output.
#[allow(clippy::float_cmp)]
pub fn time_stretch(samples: &[f32], rate: f64) -> Result<Vec<f32>> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::StretchFailed {
            reason: format!("rate must be positive and finite, got {rate}"),
        });
    }
    if rate < MIN_STRETCH_RATE {
        return Err(Error::StretchFailed {
            reason: format!("rate {rate} is below the minimum of {MIN_STRETCH_RATE}"),
        });
    }
    if rate == 1.0 || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let stft = Stft::new(N_FFT, HOP_LENGTH);
    let spectrum = stft.forward(samples);
    let stretched = phase_vocoder(&spectrum, rate, stft.hop(), stft.n_fft());

    Ok(stft.inverse(&stretched, stretched_len(samples.len(), rate)))
}

/// Output length of a signal of `len` samples stretched by `rate`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn stretched_len(len: usize, rate: f64) -> usize {
    (len as f64 / rate).round() as usize
}

/// Resample STFT frames in time by `rate`, keeping per-bin phase advance
/// consistent with the original hop.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn phase_vocoder(frames: &[Frame], rate: f64, hop: usize, n_fft: usize) -> Vec<Frame> {
    let Some(first) = frames.first() else {
        return Vec::new();
    };
    let n_bins = first.len();
    let zero = Complex::new(0.0f32, 0.0);

    // Expected phase advance per hop for each bin
    let phi_advance: Vec<f32> = (0..n_bins)
        .map(|k| 2.0 * PI * hop as f32 * k as f32 / n_fft as f32)
        .collect();

    let mut phase_acc: Vec<f32> = first.iter().map(|c| c.arg()).collect();
    let n_steps = (frames.len() as f64 / rate).ceil() as usize;
    let mut output = Vec::with_capacity(n_steps);

    for step in 0..n_steps {
        let t = step as f64 * rate;
        let idx = t.floor() as usize;
        if idx >= frames.len() {
            break;
        }
        let alpha = (t - t.floor()) as f32;

        let current = &frames[idx];
        let next = frames.get(idx + 1);

        let frame: Frame = (0..n_bins)
            .map(|k| {
                let c0 = current[k];
                let c1 = next.map_or(zero, |f| f[k]);
                let magnitude = (1.0 - alpha) * c0.norm() + alpha * c1.norm();
                let out = Complex::from_polar(magnitude, phase_acc[k]);

                let mut delta = c1.arg() - c0.arg() - phi_advance[k];
                delta -= 2.0 * PI * (delta / (2.0 * PI)).round();
                phase_acc[k] += phi_advance[k] + delta;

                out
            })
            .collect();

        output.push(frame);
    }

    output
}
