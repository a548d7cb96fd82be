//! Audio decoding, resampling, length fitting and WAV output.

mod decode;
mod length;
mod resample;
mod writer;

pub use decode::{DecodedAudio, decode_audio_file};
pub use length::{fit_length, target_length};
pub use resample::resample;
pub use writer::write_wav;
