//! Error types for audio-augment.

/// Result type alias for audio-augment operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for audio-augment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio file could not be loaded into a fixed-length signal.
    #[error("error loading audio '{path}': {source}")]
    Load {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying decode or I/O failure.
        #[source]
        source: Box<Error>,
    },

    /// A numeric parameter violates its precondition.
    #[error("invalid {name}: {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Precondition that was violated.
        reason: &'static str,
    },

    /// Augmentation technique outside the supported set.
    #[error(
        "unknown technique: {value} (expected one of none, time_stretch, pitch_shift, pitch_then_time, time_then_pitch)"
    )]
    UnknownTechnique {
        /// Rejected technique literal.
        value: String,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}': {source}")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}': {source}")]
    AudioDecode {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Time-stretch could not be computed.
    #[error("time stretch failed: {reason}")]
    StretchFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// No valid audio files found.
    #[error("no valid audio files found in the provided paths")]
    NoValidAudioFiles,

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap a backend failure raised while loading `path`.
    pub(crate) fn load(path: &std::path::Path, source: Self) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_load_error_keeps_cause() {
        let inner = Error::NoAudioTracks {
            path: "clip.wav".into(),
        };
        let err = Error::load(std::path::Path::new("clip.wav"), inner);

        let message = err.to_string();
        assert!(message.starts_with("error loading audio 'clip.wav'"));
        assert!(message.contains("no audio tracks found"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_technique_message_lists_choices() {
        let err = Error::UnknownTechnique {
            value: "bogus".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("bogus"));
        assert!(message.contains("time_then_pitch"));
    }
}
