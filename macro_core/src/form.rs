//! Parsing of raw form input into profile and log values.
//!
//! The input surface hands over text. Anything missing, non-numeric or not
//! positive becomes `Error::Validation` naming the offending field.

use crate::{ActivityLevel, Error, Result, Sex};
use std::str::FromStr;

/// Parse a required, strictly positive real number
pub fn parse_positive(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!(
            "Please enter a value for {}.",
            field
        )));
    }

    let value: f64 = trimmed.parse().map_err(|_| {
        Error::validation(format!(
            "Please enter a valid number for {} (got {:?}).",
            field, trimmed
        ))
    })?;

    check_positive(field, value)
}

/// Reject NaN, infinities, zero and negatives
pub fn check_positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::validation(format!(
            "{} must be a positive number.",
            capitalize(field)
        )));
    }
    Ok(value)
}

/// Parse an age in whole years
///
/// Fractional input is truncated; anything under one year is rejected.
pub fn parse_age(raw: &str) -> Result<u32> {
    let years = parse_positive("age", raw)?.trunc();
    if years < 1.0 {
        return Err(Error::validation("Age must be at least one year."));
    }
    if years > u32::MAX as f64 {
        return Err(Error::validation(format!(
            "Age must be at most {} years.",
            u32::MAX
        )));
    }
    Ok(years as u32)
}

/// Parse a log weight, using the log form's wording
pub fn parse_log_weight(raw: &str) -> Result<f64> {
    parse_positive("weight", raw)
        .map_err(|_| Error::validation("Please enter a valid weight for the log."))
}

/// Trim notes, treating blank text as absent
pub fn normalize_notes(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(Error::validation(format!(
                "Unknown sex: {:?} (expected male or female)",
                other
            ))),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.key().to_lowercase() == key)
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown activity level: {:?} (expected one of {})",
                    s.trim(),
                    ActivityLevel::ALL
                        .iter()
                        .map(|l| l.key())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_accepts_numbers() {
        assert_eq!(parse_positive("weight", " 70.5 ").unwrap(), 70.5);
        assert_eq!(parse_positive("height", "175").unwrap(), 175.0);
    }

    #[test]
    fn test_parse_positive_rejects_bad_input() {
        for raw in ["", "   ", "abc", "0", "-3", "NaN", "inf"] {
            let err = parse_positive("weight", raw).unwrap_err();
            assert!(
                matches!(err, Error::Validation(_)),
                "expected validation error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_missing_value_names_field() {
        let err = parse_positive("height", "").unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_parse_age_truncates() {
        assert_eq!(parse_age("30").unwrap(), 30);
        assert_eq!(parse_age("30.9").unwrap(), 30);
        assert!(parse_age("0.5").is_err());
        assert!(parse_age("-1").is_err());
    }

    #[test]
    fn test_parse_age_overflow_message() {
        let err = parse_age("4294967296").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("at most"));

        let err = parse_age("0.2").unwrap_err();
        assert_eq!(err.to_string(), "Age must be at least one year.");

        assert_eq!(parse_age("4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn test_parse_log_weight_message() {
        let err = parse_log_weight("").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid weight for the log.");
    }

    #[test]
    fn test_normalize_notes() {
        assert_eq!(normalize_notes(None), None);
        assert_eq!(normalize_notes(Some("   ")), None);
        assert_eq!(
            normalize_notes(Some("  felt good \n")),
            Some("felt good".to_string())
        );
    }

    #[test]
    fn test_parse_sex() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("m".parse::<Sex>().unwrap(), Sex::Male);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_parse_activity_spellings() {
        for raw in ["veryActive", "very_active", "very-active", "VERYACTIVE"] {
            assert_eq!(
                raw.parse::<ActivityLevel>().unwrap(),
                ActivityLevel::VeryActive
            );
        }
        assert_eq!(
            "light".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::Light
        );
        assert!("couch".parse::<ActivityLevel>().is_err());
    }
}
