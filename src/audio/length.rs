//! Fixed-length signal helpers.

/// Number of samples in `duration` seconds at `sample_rate`, rounded to the
/// nearest sample.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn target_length(sample_rate: u32, duration: f64) -> usize {
    (f64::from(sample_rate) * duration).round().max(0.0) as usize
}

/// Force `samples` to exactly `target` samples.
///
/// Shorter signals are right-padded with silence, longer ones lose their tail.
pub fn fit_length(mut samples: Vec<f32>, target: usize) -> Vec<f32> {
    samples.resize(target, 0.0);
    samples
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_target_length_exact() {
        assert_eq!(target_length(44_100, 2.0), 88_200);
        assert_eq!(target_length(16_000, 0.5), 8_000);
    }

    #[test]
    fn test_target_length_rounds_to_nearest() {
        // 22050 * 0.00005 = 1.1025
        assert_eq!(target_length(22_050, 0.000_05), 1);
        // 10 * 0.25 = 2.5 rounds away from zero
        assert_eq!(target_length(10, 0.25), 3);
    }

    #[test]
    fn test_fit_length_pads_with_zeros() {
        let out = fit_length(vec![0.5, -0.5], 5);
        assert_eq!(out, vec![0.5, -0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_fit_length_truncates_tail() {
        let out = fit_length(vec![0.1, 0.2, 0.3, 0.4], 2);
        assert_eq!(out, vec![0.1, 0.2]);
    }

    #[test]
    fn test_fit_length_exact_is_unchanged() {
        let samples = vec![0.25; 8];
        assert_eq!(fit_length(samples.clone(), 8), samples);
    }
}
