//! Augmentation technique selection.

use crate::constants::{DEFAULT_PITCH_SHIFT_STEPS, DEFAULT_TIME_STRETCH_RATE};
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// One of the five augmentation recipes.
///
/// Deserialization goes through [`FromStr`](std::str::FromStr), so config
/// files accept the same literals and hyphenated aliases as the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Technique {
    /// Leave the signal untouched.
    #[default]
    None,
    /// Time-stretch only.
    TimeStretch,
    /// Pitch-shift only.
    PitchShift,
    /// Pitch-shift, then time-stretch the shifted signal.
    PitchThenTime,
    /// Time-stretch, then pitch-shift the stretched signal.
    TimeThenPitch,
}

impl Technique {
    /// Every technique, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::TimeStretch,
        Self::PitchShift,
        Self::PitchThenTime,
        Self::TimeThenPitch,
    ];

    /// Canonical literal for this technique.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TimeStretch => "time_stretch",
            Self::PitchShift => "pitch_shift",
            Self::PitchThenTime => "pitch_then_time",
            Self::TimeThenPitch => "time_then_pitch",
        }
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Technique {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "time_stretch" | "time-stretch" => Ok(Self::TimeStretch),
            "pitch_shift" | "pitch-shift" => Ok(Self::PitchShift),
            "pitch_then_time" | "pitch-then-time" => Ok(Self::PitchThenTime),
            "time_then_pitch" | "time-then-pitch" => Ok(Self::TimeThenPitch),
            other => Err(Error::UnknownTechnique {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Technique {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Technique plus the parameters it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentParams {
    /// Recipe to apply.
    pub technique: Technique,
    /// Stretch factor; `> 1` speeds up, `< 1` slows down.
    pub time_stretch_rate: f64,
    /// Semitone shift.
    pub pitch_shift_steps: i32,
}

impl Default for AugmentParams {
    fn default() -> Self {
        Self {
            technique: Technique::None,
            time_stretch_rate: DEFAULT_TIME_STRETCH_RATE,
            pitch_shift_steps: DEFAULT_PITCH_SHIFT_STEPS,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_technique_from_str() {
        assert_eq!("none".parse::<Technique>().ok(), Some(Technique::None));
        assert_eq!(
            "time_stretch".parse::<Technique>().ok(),
            Some(Technique::TimeStretch)
        );
        assert_eq!(
            "pitch-then-time".parse::<Technique>().ok(),
            Some(Technique::PitchThenTime)
        );
    }

    #[test]
    fn test_technique_display_parses_back() {
        for technique in Technique::ALL {
            assert_eq!(technique.to_string().parse::<Technique>().ok(), Some(technique));
        }
    }

    #[test]
    fn test_unknown_technique_rejected() {
        for bogus in ["bogus_value", "", "NONE", "time stretch", "pitch"] {
            let err = bogus.parse::<Technique>().unwrap_err();
            assert!(matches!(err, Error::UnknownTechnique { ref value } if value == bogus));
        }
    }

    #[test]
    fn test_augment_params_from_toml() {
        let params: AugmentParams = toml::from_str(
            r#"
technique = "time_then_pitch"
time_stretch_rate = 1.25
"#,
        )
        .unwrap();
        assert_eq!(params.technique, Technique::TimeThenPitch);
        assert!((params.time_stretch_rate - 1.25).abs() < f64::EPSILON);
        assert_eq!(params.pitch_shift_steps, 0);
    }
}
