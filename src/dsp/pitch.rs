//! Resample-based pitch shifting.

use super::vocoder;
use crate::audio::{fit_length, resample};
use crate::constants::SEMITONES_PER_OCTAVE;
use crate::constants::pitch::{MAX_STEPS, RATIO_DENOMINATOR};
use crate::error::{Error, Result};
use tracing::trace;

/// Shift `samples` by `n_steps` semitones without changing their duration.
///
/// The signal is time-stretched by `2^(-n/12)` and then resampled by
/// `2^(-n/12)` back to its original length. Shifts beyond four octaves in
/// either direction are rejected.
pub fn pitch_shift(samples: &[f32], sample_rate: u32, n_steps: i32) -> Result<Vec<f32>> {
    if n_steps.unsigned_abs() > MAX_STEPS {
        return Err(Error::InvalidParameter {
            name: "n_steps",
            value: f64::from(n_steps),
            reason: "must be within four octaves (48 semitones)",
        });
    }
    if n_steps == 0 || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let rate = stretch_rate(n_steps);
    let (from, to) = resample_ratio(rate);
    trace!(
        "Pitch shift {n_steps:+} semitones at {sample_rate} Hz: stretch rate {rate:.6}, resample {from}:{to}"
    );

    let stretched = vocoder::time_stretch(samples, rate)?;
    let shifted = resample(stretched, from, to)?;

    Ok(fit_length(shifted, samples.len()))
}

/// Time-stretch rate that precedes resampling for a shift of `n_steps`.
fn stretch_rate(n_steps: i32) -> f64 {
    2.0f64.powf(-f64::from(n_steps) / SEMITONES_PER_OCTAVE)
}

/// Rational `from:to` ratio approximating `1 / rate` for the resampler.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn resample_ratio(rate: f64) -> (u32, u32) {
    let from = (f64::from(RATIO_DENOMINATOR) / rate).round().max(1.0) as u32;
    (from, RATIO_DENOMINATOR)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[allow(clippy::cast_precision_loss)]
    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    fn zero_crossings(samples: &[f32]) -> usize {
        samples
            .windows(2)
            .filter(|w| (w[0] < 0.0) != (w[1] < 0.0))
            .count()
    }

    #[test]
    fn test_stretch_rate_octave() {
        assert!((stretch_rate(12) - 0.5).abs() < 1e-12);
        assert!((stretch_rate(-12) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_resample_ratio() {
        assert_eq!(resample_ratio(stretch_rate(12)), (2000, 1000));
        assert_eq!(resample_ratio(stretch_rate(-12)), (500, 1000));
        assert_eq!(resample_ratio(stretch_rate(1)), (1059, 1000));
    }

    #[test]
    fn test_out_of_range_steps_rejected() {
        let input = vec![0.1; 64];
        for steps in [49, -49, 400, i32::MIN] {
            let result = pitch_shift(&input, 16_000, steps);
            assert!(
                matches!(result, Err(Error::InvalidParameter { name: "n_steps", .. })),
                "steps {steps}"
            );
        }
        assert_eq!(pitch_shift(&input, 16_000, 48).unwrap().len(), 64);
    }

    #[test]
    fn test_pitch_shift_keeps_onset_at_44k() {
        let mut input = vec![0.0; 4410];
        input.extend(sine(440.0, 44_100, 44_100 - 4410).iter().map(|s| s * 0.5));

        for steps in [1, 2, -1] {
            let output = pitch_shift(&input, 44_100, steps).unwrap();
            assert_eq!(output.len(), input.len());

            let onset = output.iter().position(|s| s.abs() > 0.1).unwrap();
            assert!(
                onset.abs_diff(4410) <= 2048,
                "steps {steps}: onset {onset}"
            );

            let tail_peak = output[output.len() - 2048..]
                .iter()
                .fold(0.0f32, |acc, s| acc.max(s.abs()));
            assert!(tail_peak > 0.1, "steps {steps}: tail peak {tail_peak}");
        }
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let input = sine(440.0, 16_000, 4000);
        assert_eq!(pitch_shift(&input, 16_000, 0).unwrap(), input);
    }

    #[test]
    fn test_pitch_shift_preserves_length() {
        let input = sine(440.0, 16_000, 16_000);
        for steps in [-5, -1, 3, 7] {
            let output = pitch_shift(&input, 16_000, steps).unwrap();
            assert_eq!(output.len(), input.len(), "steps {steps}");
        }
    }

    #[test]
    fn test_octave_up_doubles_frequency() {
        let input = sine(400.0, 16_000, 16_000);
        let output = pitch_shift(&input, 16_000, 12).unwrap();

        let interior = &output[2048..output.len() - 2048];
        let crossings_in = zero_crossings(&input[2048..input.len() - 2048]);
        let crossings_out = zero_crossings(interior);

        #[allow(clippy::cast_precision_loss)]
        let ratio = crossings_out as f32 / crossings_in as f32;
        assert!((ratio - 2.0).abs() < 0.15, "ratio {ratio}");
    }
}
