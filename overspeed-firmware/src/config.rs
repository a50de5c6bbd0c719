//! Configuration loading
//!
//! The configuration is compiled in from overspeed.toml; build.rs has
//! already checked that the device parser accepts it.

use defmt::*;
use overspeed_core::config::{parse_config, OverspeedConfig};

/// Load the embedded configuration, falling back to defaults
pub fn load_config(source: &str) -> OverspeedConfig {
    match parse_config(source) {
        Ok(config) => {
            info!(
                "Config loaded: threshold {} km/h, cooldown {} ms, gps {} baud",
                config.alert.default_threshold_kmh, config.alert.cooldown_ms, config.gps.baud
            );
            config
        }
        Err(e) => {
            error!("Config parse failed: {:?}, using defaults", e);
            OverspeedConfig::default()
        }
    }
}
