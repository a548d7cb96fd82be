//! Audio decoding using symphonia.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Decoded audio data at the file's native sample rate.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Audio samples as mono f32 in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Duration in seconds.
    pub duration_secs: f32,
}

/// Decode an audio file to mono f32 samples.
///
/// Multichannel audio is mixed down by averaging channels. When
/// `max_duration` is set, decoding stops once that many seconds of frames
/// have been read and the result is cut to exactly that length.
///
/// Supports WAV, FLAC, MP3, AAC and Ogg Vorbis.
pub fn decode_audio_file(path: &Path, max_duration: Option<f64>) -> Result<DecodedAudio> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let max_frames = max_duration.map(|secs| frames_for(secs, sample_rate));
    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        let spec = *decoded.spec();
        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        append_mono(buffer.samples(), spec.channels.count(), &mut samples);

        if max_frames.is_some_and(|max| samples.len() >= max) {
            break;
        }
    }

    if let Some(max) = max_frames {
        samples.truncate(max);
    }

    #[allow(clippy::cast_precision_loss)]
    let duration_secs = samples.len() as f32 / sample_rate as f32;

    debug!(
        "Decoded {} samples ({:.3}s) at {} Hz from {}",
        samples.len(),
        duration_secs,
        sample_rate,
        path.display()
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        duration_secs,
    })
}

/// Number of whole frames covering `secs` seconds at `sample_rate`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn frames_for(secs: f64, sample_rate: u32) -> usize {
    (secs.max(0.0) * f64::from(sample_rate)).ceil() as usize
}

/// Append interleaved samples to the output buffer, converting to mono.
fn append_mono(interleaved: &[f32], channels: usize, output: &mut Vec<f32>) {
    if channels <= 1 {
        output.extend_from_slice(interleaved);
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / channels as f32;
    output.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() * scale),
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_fixture(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            for ch in 0..channels {
                let value: i16 = if ch == 0 { 16_384 } else { -8_192 };
                writer.write_sample(if i % 2 == 0 { value } else { 0 }).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_append_mono_passthrough() {
        let mut out = Vec::new();
        append_mono(&[0.1, 0.2, 0.3], 1, &mut out);
        assert_eq!(out, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_append_mono_averages_channels() {
        let mut out = Vec::new();
        append_mono(&[1.0, 0.0, 0.5, 0.5], 2, &mut out);
        assert_eq!(out, vec![0.5, 0.5]);
    }

    #[test]
    fn test_frames_for_rounds_up() {
        assert_eq!(frames_for(1.0, 8000), 8000);
        assert_eq!(frames_for(0.00001, 8000), 1);
        assert_eq!(frames_for(-1.0, 8000), 0);
    }

    #[test]
    fn test_decode_stereo_wav_to_mono() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        write_fixture(&path, 2, 8000, 800);

        let decoded = decode_audio_file(&path, None).unwrap();
        assert_eq!(decoded.sample_rate, 8000);
        assert_eq!(decoded.samples.len(), 800);
        // (0.5 + -0.25) / 2
        assert!((decoded.samples[0] - 0.125).abs() < 1e-3);
        assert_eq!(decoded.samples[1], 0.0);
    }

    #[test]
    fn test_decode_respects_max_duration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.wav");
        write_fixture(&path, 1, 8000, 16_000);

        let decoded = decode_audio_file(&path, Some(0.5)).unwrap();
        assert_eq!(decoded.samples.len(), 4000);
        assert!((decoded.duration_secs - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_decode_missing_file_is_open_error() {
        let result = decode_audio_file(Path::new("/nonexistent/audio.wav"), None);
        assert!(matches!(result, Err(Error::AudioOpen { .. })));
    }

    #[test]
    fn test_decode_garbage_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();

        assert!(decode_audio_file(&path, None).is_err());
    }
}
