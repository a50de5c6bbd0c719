//! Minimal TOML reader for the device configuration
//!
//! Handles only the subset `overspeed.toml` uses. It does NOT support the
//! full TOML spec.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` with string, integer, float, and boolean values
//! - Comments (`# ...`), including after a value
//!
//! Unknown keys are ignored so older firmware accepts newer files. Unknown
//! sections and malformed values are errors.

use heapless::String;

use super::types::{Consent, InvalidThresholdPolicy, OverspeedConfig};
use crate::location::Accuracy;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection {
        line: u16,
    },
    /// Line is neither a header nor `key = value`
    InvalidLine {
        line: u16,
    },
    /// Value has the wrong type or is out of range
    InvalidValue {
        line: u16,
    },
    /// String longer than its field allows
    TooLong {
        line: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Alert,
    Location,
    Gps,
    Display,
}

/// Parse the configuration file, starting from defaults
pub fn parse_config(input: &str) -> Result<OverspeedConfig, ParseError> {
    let mut config = OverspeedConfig::new();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            section = parse_section_header(name)
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ParseError::InvalidLine { line: line_no })?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name.trim() {
        "alert" => Some(Section::Alert),
        "location" => Some(Section::Location),
        "gps" => Some(Section::Gps),
        "display" => Some(Section::Display),
        _ => None,
    }
}

/// Drop a `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_value(
    config: &mut OverspeedConfig,
    section: Section,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue { line };

    match (section, key) {
        (Section::Alert, "default_threshold_kmh") => {
            config.alert.default_threshold_kmh = parse_non_negative(value).ok_or(invalid)?;
        }
        (Section::Alert, "cooldown_ms") => {
            config.alert.cooldown_ms = value.parse().map_err(|_| invalid)?;
        }
        (Section::Alert, "invalid_threshold") => {
            config.alert.invalid_threshold = match parse_string(value).ok_or(invalid)? {
                "suppress" => InvalidThresholdPolicy::SuppressAlert,
                "default" => InvalidThresholdPolicy::UseDefault,
                _ => return Err(invalid),
            };
        }
        (Section::Location, "consent") => {
            config.location.consent = match parse_string(value).ok_or(invalid)? {
                "prompt" => Consent::Prompt,
                "granted" => Consent::Granted,
                _ => return Err(invalid),
            };
        }
        (Section::Location, "accuracy") => {
            config.location.accuracy = match parse_string(value).ok_or(invalid)? {
                "low" => Accuracy::Low,
                "balanced" => Accuracy::Balanced,
                "high" => Accuracy::High,
                _ => return Err(invalid),
            };
        }
        (Section::Location, "distance_interval_m") => {
            config.location.distance_interval_m = parse_non_negative(value).ok_or(invalid)?;
        }
        (Section::Location, "time_interval_ms") => {
            config.location.time_interval_ms = value.parse().map_err(|_| invalid)?;
        }
        (Section::Gps, "baud") => {
            let baud: u32 = value.parse().map_err(|_| invalid)?;
            if baud == 0 {
                return Err(invalid);
            }
            config.gps.baud = baud;
        }
        (Section::Display, "title") => {
            let title = parse_string(value).ok_or(invalid)?;
            config.display.title =
                String::try_from(title).map_err(|_| ParseError::TooLong { line })?;
        }
        // Unknown key: ignored
        _ => {}
    }

    Ok(())
}

/// Quoted string contents
fn parse_string(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

/// Finite non-negative number; integers are accepted for float fields
fn parse_non_negative(value: &str) -> Option<f32> {
    let n: f32 = value.parse().ok()?;
    (n.is_finite() && n >= 0.0).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
# Overspeed configuration

[alert]
default_threshold_kmh = 80     # km/h
cooldown_ms = 2500
invalid_threshold = "default"

[location]
consent = "granted"
accuracy = "balanced"
distance_interval_m = 2.5
time_interval_ms = 1000

[gps]
baud = 38400

[display]
title = "SPEED # WATCH"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL).unwrap();
        assert_eq!(config.alert.default_threshold_kmh, 80.0);
        assert_eq!(config.alert.cooldown_ms, 2500);
        assert_eq!(
            config.alert.invalid_threshold,
            InvalidThresholdPolicy::UseDefault
        );
        assert_eq!(config.location.consent, Consent::Granted);
        assert_eq!(config.location.accuracy, Accuracy::Balanced);
        assert_eq!(config.location.distance_interval_m, 2.5);
        assert_eq!(config.location.time_interval_ms, 1000);
        assert_eq!(config.gps.baud, 38400);
        assert_eq!(config.display.title.as_str(), "SPEED # WATCH");
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_config("").unwrap(), OverspeedConfig::default());
        assert_eq!(
            parse_config("# only a comment\n\n").unwrap(),
            OverspeedConfig::default()
        );
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = parse_config("[alert]\nvolume = 3\ncooldown_ms = 10\n").unwrap();
        assert_eq!(config.alert.cooldown_ms, 10);
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[alert]\n\n[wifi]\n"),
            Err(ParseError::InvalidSection { line: 3 })
        );
        assert_eq!(
            parse_config("[alert\n"),
            Err(ParseError::InvalidSection { line: 1 })
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[alert]\ndefault_threshold_kmh = -5\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[alert]\ninvalid_threshold = \"ignore\"\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[location]\naccuracy = high\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[gps]\nbaud = 0\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_invalid_line() {
        assert_eq!(
            parse_config("[gps]\nbaud\n"),
            Err(ParseError::InvalidLine { line: 2 })
        );
    }

    #[test]
    fn test_title_too_long() {
        assert_eq!(
            parse_config("[display]\ntitle = \"0123456789012345678901\"\n"),
            Err(ParseError::TooLong { line: 2 })
        );
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("t = \"a#b\" # c"), "t = \"a#b\" ");
        assert_eq!(strip_comment("# all"), "");
    }
}
