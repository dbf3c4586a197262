//! Build script for ergon-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates controller.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs claimed by UART0 and the PWM output
const RESERVED_PINS: [i64; 3] = [0, 1, 16];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate controller.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a controller.toml configuration file.     ║\n\
            ║  Please create one in the ergon-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in controller.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_control(&config, &mut errors);
    validate_motor(&config, &mut errors);
    validate_board(&config, &mut errors);
    report("Invalid controller configuration", &errors);

    println!("cargo:warning=controller.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a boxed list of errors
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate that required sections exist and the version matches
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["control", "motor", "board"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }

    match config.get("version") {
        Some(toml::Value::Integer(1)) | None => {}
        Some(_) => errors.push("version must be 1".to_string()),
    }
}

/// Check an optional integer key against an inclusive range
fn check_range(
    table: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => None,
    }
}

/// Validate control loop timing
fn validate_control(config: &toml::Value, errors: &mut Vec<String>) {
    let control = match config.get("control") {
        Some(t @ toml::Value::Table(_)) => t,
        _ => return,
    };

    if let Some(v) = control.get("reverse_encoder") {
        if !v.is_bool() {
            errors.push("[control] reverse_encoder must be true or false".to_string());
        }
    }

    let tick = check_range(control, "control", "tick_interval_ms", 1, 1000, errors).unwrap_or(10);
    let status = check_range(control, "control", "status_interval_ms", 1, 3_600_000, errors)
        .unwrap_or(1000);
    if status < tick {
        errors.push("[control] status_interval_ms must be >= tick_interval_ms".to_string());
    }
}

/// Validate motor output settings
fn validate_motor(config: &toml::Value, errors: &mut Vec<String>) {
    let motor = match config.get("motor") {
        Some(t @ toml::Value::Table(_)) => t,
        _ => return,
    };

    check_range(motor, "motor", "max_duty", 1, 65_535, errors);
    check_range(motor, "motor", "pwm_frequency_hz", 10, 1_000_000, errors);
}

/// Parse a pin string like "gpio17", "!gpio17" or "^gpio20"
fn parse_pin(s: &str) -> Option<i64> {
    let num = s.trim_start_matches(['!', '^']).strip_prefix("gpio")?;
    num.parse().ok()
}

/// Validate board pin assignments
fn validate_board(config: &toml::Value, errors: &mut Vec<String>) {
    let board = match config.get("board") {
        Some(t @ toml::Value::Table(_)) => t,
        _ => return,
    };

    let mut used: Vec<(i64, &str)> = Vec::new();
    // Missing keys keep the firmware defaults
    let keys = [("motor_in1", 17), ("motor_in2", 18), ("encoder_a", 20), ("encoder_b", 21)];
    for (key, default) in keys {
        let pin = match board.get(key) {
            Some(toml::Value::String(s)) => match parse_pin(s) {
                Some(pin) => pin,
                None => {
                    errors.push(format!("[board] {} '{}' is not a pin", key, s));
                    continue;
                }
            },
            Some(_) => {
                errors.push(format!("[board] {} must be a pin string", key));
                continue;
            }
            None => default,
        };

        if !(0..30).contains(&pin) {
            errors.push(format!("[board] {} gpio{} does not exist", key, pin));
        } else if RESERVED_PINS.contains(&pin) {
            errors.push(format!("[board] {} gpio{} is reserved", key, pin));
        } else if let Some((_, other)) = used.iter().find(|(p, _)| *p == pin) {
            errors.push(format!("[board] {} reuses gpio{} from {}", key, pin, other));
        }
        used.push((pin, key));
    }

    if let Some(v) = board.get("quadrature") {
        match v.as_str() {
            Some("full" | "half" | "single") => {}
            _ => errors.push("[board] quadrature must be 'full', 'half' or 'single'".to_string()),
        }
    }
}
