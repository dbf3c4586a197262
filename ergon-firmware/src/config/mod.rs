//! Configuration loading and parsing
//!
//! The controller configuration is compiled in from `controller.toml` and
//! parsed at boot by a small no_std parser. `build.rs` has already
//! validated the file, so a parse failure here means the two disagree; the
//! firmware then runs on compiled defaults.

pub mod toml;

use defmt::*;

use ergon_core::config::ControllerConfig;

pub use toml::{parse_config, ParseError};

/// Embedded configuration (compiled into firmware)
/// Edit controller.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../controller.toml");

/// Load the embedded configuration, falling back to defaults
pub fn load_config() -> ControllerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            ControllerConfig::default()
        }
    }
}
