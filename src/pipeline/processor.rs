//! Single file processing pipeline.

use crate::audio::write_wav;
use crate::dsp::DspBackend;
use crate::error::Result;
use crate::pipeline::output_path_for;
use crate::preprocess::{AudioPreprocessor, AugmentParams};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Options shared by every file in a batch.
#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions {
    /// Clip duration in seconds after loading.
    pub duration: f64,
    /// Augmentation recipe.
    pub params: AugmentParams,
    /// Peak-normalize before writing.
    pub normalize: bool,
}

/// Outcome of processing one file.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Path of the written WAV file.
    pub output_path: PathBuf,
    /// Number of samples written.
    pub samples: usize,
}

/// Load, augment and write a single audio file.
///
/// The output lands at [`output_path_for`] inside `output_dir`.
pub fn process_file<B: DspBackend>(
    input_path: &Path,
    output_dir: &Path,
    preprocessor: &AudioPreprocessor<B>,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    let start_time = Instant::now();
    info!("Processing: {}", input_path.display());

    let signal = preprocessor.load_audio(input_path, options.duration)?;
    let mut augmented = preprocessor.apply(signal, &options.params)?;

    if options.normalize {
        augmented = preprocessor.normalize_audio(augmented);
    } else {
        debug!("Skipping peak normalization");
    }

    let output_path = output_path_for(input_path, output_dir, options.params.technique);
    write_wav(&output_path, &augmented, preprocessor.sample_rate())?;

    info!(
        "Wrote {} ({} samples) in {:.2}s",
        output_path.display(),
        augmented.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(ProcessResult {
        output_path,
        samples: augmented.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::preprocess::Technique;
    use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_tone(path: &Path, sample_rate: u32, frames: usize, amplitude: i16) {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            writer
                .write_sample(if i % 4 < 2 { amplitude } else { -amplitude })
                .unwrap();
        }
        writer.finalize().unwrap();
    }

    fn options(technique: Technique, normalize: bool) -> ProcessOptions {
        ProcessOptions {
            duration: 1.0,
            params: AugmentParams {
                technique,
                ..AugmentParams::default()
            },
            normalize,
        }
    }

    #[test]
    fn test_process_file_writes_fixed_length_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("tone.wav");
        write_tone(&input, 8000, 4000, 8000);

        let pre = AudioPreprocessor::new(8000).unwrap();
        let result =
            process_file(&input, dir.path(), &pre, &options(Technique::None, true)).unwrap();

        assert_eq!(result.output_path, dir.path().join("tone.none.wav"));
        assert_eq!(result.samples, 8000);

        let reader = WavReader::open(&result.output_path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.len(), 8000);
    }

    #[test]
    fn test_process_file_normalizes_peak() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("quiet.wav");
        write_tone(&input, 8000, 8000, 1000);

        let pre = AudioPreprocessor::new(8000).unwrap();
        let result =
            process_file(&input, dir.path(), &pre, &options(Technique::None, true)).unwrap();

        let peak = WavReader::open(&result.output_path)
            .unwrap()
            .into_samples::<i16>()
            .map(|s| s.unwrap().unsigned_abs())
            .max()
            .unwrap();
        assert!(peak > 32_000, "peak {peak}");
    }

    #[test]
    fn test_process_file_missing_input_is_load_error() {
        let dir = TempDir::new().unwrap();
        let pre = AudioPreprocessor::new(8000).unwrap();

        let result = process_file(
            &dir.path().join("absent.wav"),
            dir.path(),
            &pre,
            &options(Technique::None, false),
        );
        assert!(matches!(result, Err(Error::Load { .. })));
    }
}
