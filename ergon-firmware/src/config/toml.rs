//! Simple TOML parser for controller configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the controller configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers: `control`, `motor`, `board`
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys

use ergon_core::config::{ConfigError, ControllerConfig, QuadratureMode};
use ergon_hal_rp2040::gpio::parse_pin;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Values parsed but do not form a valid configuration
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Control,
    Motor,
    Board,
}

/// Parse TOML configuration into a validated [`ControllerConfig`]
///
/// Keys that are absent keep their default value; unknown keys are ignored.
pub fn parse_config(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a section header name
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "control" => Ok(Section::Control),
        "motor" => Ok(Section::Motor),
        "board" => Ok(Section::Board),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse quadrature counting mode
fn parse_quadrature(value: &str) -> Result<QuadratureMode, ParseError> {
    match parse_string(value) {
        "full" | "Full" => Ok(QuadratureMode::Full),
        "half" | "Half" => Ok(QuadratureMode::Half),
        "single" | "Single" => Ok(QuadratureMode::Single),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ControllerConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            if key == "version" {
                config.version = parse_int(value)?;
            }
        }
        Section::Control => {
            let c = &mut config.control;
            match key {
                "reverse_encoder" => c.reverse_encoder = parse_bool(value)?,
                "tick_interval_ms" => c.tick_interval_ms = parse_int(value)?,
                "status_interval_ms" => c.status_interval_ms = parse_int(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Motor => {
            let m = &mut config.motor;
            match key {
                "max_duty" => m.max_duty = parse_int(value)?,
                "pwm_frequency_hz" | "pwm_frequency" => m.pwm_frequency_hz = parse_int(value)?,
                _ => {}
            }
        }
        Section::Board => {
            let b = &mut config.board;
            let pin = || parse_pin(parse_string(value)).map_err(|_| ParseError::InvalidPin);
            match key {
                "motor_in1" | "in1_pin" => b.motor_in1 = pin()?,
                "motor_in2" | "in2_pin" => b.motor_in2 = pin()?,
                "encoder_a" | "encoder_a_pin" => b.encoder_a = pin()?,
                "encoder_b" | "encoder_b_pin" => b.encoder_b = pin()?,
                "quadrature" => b.quadrature = parse_quadrature(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("control"), Ok(Section::Control));
        assert_eq!(parse_section_header(" board "), Ok(Section::Board));
        assert_eq!(parse_section_header("stepper"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_key_value_strips_comment() {
        assert_eq!(
            parse_key_value("max_duty = 200 # 8-bit"),
            Some(("max_duty", "200"))
        );
        assert_eq!(
            parse_key_value(r#"motor_in1 = "gpio#1""#),
            Some(("motor_in1", r#""gpio#1""#))
        );
        assert_eq!(parse_key_value("novalue ="), None);
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
version = 1

[control]
reverse_encoder = false
tick_interval_ms = 5
status_interval_ms = 500

[motor]
max_duty = 1023
pwm_frequency_hz = 20000

[board]
motor_in1 = "gpio10"
motor_in2 = "!gpio11"
encoder_a = "^gpio12"
encoder_b = "^gpio13"
quadrature = "full"
"#;

        let config = parse_config(config_str).unwrap();
        assert!(!config.control.reverse_encoder);
        assert_eq!(config.control.tick_interval_ms, 5);
        assert_eq!(config.control.status_interval_ms, 500);
        assert_eq!(config.motor.max_duty, 1023);
        assert_eq!(config.motor.pwm_frequency_hz, 20_000);
        assert_eq!(config.board.motor_in1.pin, 10);
        assert!(config.board.motor_in2.inverted);
        assert!(config.board.encoder_a.pull_up);
        assert_eq!(config.board.quadrature, QuadratureMode::Full);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[motor]\nmax_duty = 100\n").unwrap();
        assert_eq!(config.motor.max_duty, 100);
        assert_eq!(config.control, ControllerConfig::default().control);
        assert_eq!(config.board, ControllerConfig::default().board);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            parse_config("[control]\nreverse_encoder = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[board]\nmotor_in1 = \"pin3\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("[control]\ntick_interval_ms = 0\n"),
            Err(ParseError::Invalid(ConfigError::InvalidTickInterval))
        );
        assert_eq!(
            parse_config("[board]\nencoder_a = \"gpio17\"\n"),
            Err(ParseError::Invalid(ConfigError::PinConflict(17)))
        );
        assert_eq!(parse_config("[control]\njunk\n"), Err(ParseError::InvalidLine));
    }
}
