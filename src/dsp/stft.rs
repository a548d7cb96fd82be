//! Short-time Fourier transform with a periodic Hann window.
//!
//! Frames are centered: the signal is zero-padded by `n_fft / 2` on both
//! sides before analysis, and the padding is removed again on synthesis.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// One analysis frame holding bins `0..=n_fft/2`.
pub type Frame = Vec<Complex<f32>>;

/// Planned forward/inverse transforms for a fixed frame size.
pub struct Stft {
    n_fft: usize,
    hop: usize,
    window: Vec<f32>,
    fft_forward: Arc<dyn Fft<f32>>,
    fft_inverse: Arc<dyn Fft<f32>>,
}

impl Stft {
    /// Plan transforms for `n_fft`-sample frames advanced by `hop` samples.
    pub fn new(n_fft: usize, hop: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            n_fft,
            hop,
            window: hann(n_fft),
            fft_forward: planner.plan_fft_forward(n_fft),
            fft_inverse: planner.plan_fft_inverse(n_fft),
        }
    }

    /// Frame size in samples.
    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    /// Hop length in samples.
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Number of non-negative frequency bins per frame.
    pub fn n_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Analyze `signal` into frames of `n_bins()` complex bins.
    pub fn forward(&self, signal: &[f32]) -> Vec<Frame> {
        let pad = self.n_fft / 2;
        let n_frames = 1 + signal.len() / self.hop;
        let mut buffer = vec![Complex::new(0.0, 0.0); self.n_fft];
        let mut scratch = vec![Complex::new(0.0, 0.0); self.fft_forward.get_inplace_scratch_len()];

        (0..n_frames)
            .map(|frame| {
                let start = frame * self.hop;
                for (i, slot) in buffer.iter_mut().enumerate() {
                    // Index into the virtually padded signal
                    let sample = (start + i)
                        .checked_sub(pad)
                        .and_then(|idx| signal.get(idx))
                        .copied()
                        .unwrap_or(0.0);
                    *slot = Complex::new(sample * self.window[i], 0.0);
                }
                self.fft_forward.process_with_scratch(&mut buffer, &mut scratch);
                buffer[..self.n_bins()].to_vec()
            })
            .collect()
    }

    /// Resynthesize `length` samples from `frames` by weighted overlap-add.
    pub fn inverse(&self, frames: &[Frame], length: usize) -> Vec<f32> {
        let pad = self.n_fft / 2;
        let total = self.n_fft + self.hop * frames.len().saturating_sub(1);
        let mut output = vec![0.0f32; total];
        let mut window_sum = vec![0.0f32; total];
        let mut buffer = vec![Complex::new(0.0, 0.0); self.n_fft];
        let mut scratch = vec![Complex::new(0.0, 0.0); self.fft_inverse.get_inplace_scratch_len()];

        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / self.n_fft as f32;

        for (frame_idx, frame) in frames.iter().enumerate() {
            // Rebuild the full spectrum from its Hermitian half
            buffer[..frame.len()].copy_from_slice(frame);
            for k in frame.len()..self.n_fft {
                buffer[k] = buffer[self.n_fft - k].conj();
            }
            self.fft_inverse.process_with_scratch(&mut buffer, &mut scratch);

            let start = frame_idx * self.hop;
            for (i, value) in buffer.iter().enumerate() {
                let w = self.window[i];
                output[start + i] += value.re * scale * w;
                window_sum[start + i] += w * w;
            }
        }

        for (sample, &norm) in output.iter_mut().zip(&window_sum) {
            if norm > f32::MIN_POSITIVE {
                *sample /= norm;
            }
        }

        let mut signal: Vec<f32> = output.into_iter().skip(pad).take(length).collect();
        signal.resize(length, 0.0);
        signal
    }
}

/// Periodic Hann window of `len` samples.
#[allow(clippy::cast_precision_loss)]
fn hann(len: usize) -> Vec<f32> {
    (0..len)
        .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f32 / len as f32).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_endpoints() {
        let w = hann(8);
        assert!(w[0].abs() < 1e-7);
        assert!((w[4] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_count_and_bins() {
        let stft = Stft::new(256, 64);
        let frames = stft.forward(&vec![0.0; 1000]);
        assert_eq!(frames.len(), 1 + 1000 / 64);
        assert!(frames.iter().all(|f| f.len() == 129));
    }

    #[test]
    fn test_forward_inverse_reconstructs_signal() {
        let stft = Stft::new(256, 64);
        #[allow(clippy::cast_precision_loss)]
        let signal: Vec<f32> = (0..2000)
            .map(|i| (i as f32 * 0.05).sin() * 0.5 + (i as f32 * 0.31).cos() * 0.25)
            .collect();

        let frames = stft.forward(&signal);
        let rebuilt = stft.inverse(&frames, signal.len());

        assert_eq!(rebuilt.len(), signal.len());
        let max_err = signal
            .iter()
            .zip(&rebuilt)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_err < 1e-3, "max reconstruction error {max_err}");
    }
}
