//! Audio resampling using rubato.

use crate::constants::resample::{CHUNK_SIZE, SUB_CHUNKS};
use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};
use tracing::trace;

const CHANNELS: usize = 1;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate. The output
/// holds `ceil(len * to_rate / from_rate)` samples and is aligned with the
/// input: the resampler's output delay is dropped from the front and the
/// tail is flushed with silence.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(Error::Resample {
            reason: format!("cannot resample from {from_rate} Hz to {to_rate} Hz"),
        });
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        CHANNELS,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_needed = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let expected = expected_output_len(samples.len(), from_rate, to_rate);
    let wanted = delay + expected;
    let mut output = Vec::with_capacity(wanted + resampler.output_frames_next());

    let mut chunks = samples.chunks_exact(frames_needed);
    for chunk in &mut chunks {
        output.extend_from_slice(&process_chunk(&mut resampler, chunk, frames_needed)?);
    }

    // Flush the remainder and the delay line with zero-padded chunks
    let mut tail = chunks.remainder().to_vec();
    tail.resize(frames_needed, 0.0);
    while output.len() < wanted {
        let flushed = process_chunk(&mut resampler, &tail, frames_needed)?;
        if flushed.is_empty() {
            return Err(Error::Resample {
                reason: "resampler produced no output while flushing".to_string(),
            });
        }
        output.extend_from_slice(&flushed);
        tail.fill(0.0);
    }

    trace!(
        "Resampled {} -> {} samples ({from_rate} -> {to_rate} Hz, delay {delay})",
        samples.len(),
        expected
    );

    output.truncate(wanted);
    Ok(output.split_off(delay))
}

/// Run one fixed-size chunk through the resampler.
fn process_chunk(resampler: &mut Fft<f32>, chunk: &[f32], frames: usize) -> Result<Vec<f32>> {
    let input_adapter =
        SequentialSlice::new(chunk, CHANNELS, frames).map_err(|e| Error::Resample {
            reason: format!("failed to create input adapter: {e}"),
        })?;

    let resampled = resampler
        .process(&input_adapter, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

/// Number of output samples corresponding to `input_len` input samples.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn expected_output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
