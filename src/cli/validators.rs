//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::preprocess::Technique;

/// Parse and validate a strictly positive, finite float.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `name` - Name of the parameter for error messages
pub fn parse_positive_float(s: &str, name: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{name} must be positive, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a time-stretch rate.
pub fn parse_rate(s: &str) -> Result<f64, String> {
    parse_positive_float(s, "rate")
}

/// Parse and validate a clip duration in seconds.
pub fn parse_duration(s: &str) -> Result<f64, String> {
    parse_positive_float(s, "duration")
}

/// Parse an augmentation technique literal.
pub fn parse_technique(s: &str) -> Result<Technique, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_valid() {
        assert_eq!(parse_rate("1.5").ok(), Some(1.5));
        assert_eq!(parse_rate("0.25").ok(), Some(0.25));
    }

    #[test]
    fn test_parse_rate_invalid() {
        assert!(parse_rate("0").is_err());
        assert!(parse_rate("-1.0").is_err());
        assert!(parse_rate("inf").is_err());
        assert!(parse_rate("abc").is_err());
    }

    #[test]
    fn test_parse_positive_float_messages() {
        let err = parse_positive_float("-3", "duration").unwrap_err();
        assert!(err.contains("duration must be positive"));

        let err = parse_positive_float("x", "duration").unwrap_err();
        assert!(err.contains("not a valid number"));
    }

    #[test]
    fn test_parse_duration_valid() {
        assert_eq!(parse_duration("2").ok(), Some(2.0));
    }

    #[test]
    fn test_parse_technique() {
        assert_eq!(
            parse_technique("time-then-pitch").ok(),
            Some(Technique::TimeThenPitch)
        );
        let err = parse_technique("bogus_value").unwrap_err();
        assert!(err.contains("unknown technique"));
    }
}
