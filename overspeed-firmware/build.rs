//! Build script for overspeed-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates overspeed.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use overspeed_core::config::{parse_config, OverspeedConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate overspeed.toml at compile time
///
/// The file is checked three ways: TOML syntax, field types via serde, and
/// agreement with the on-device line parser, so a file that builds is one
/// the firmware will load without falling back to defaults.
fn validate_config() {
    println!("cargo:rerun-if-changed=overspeed.toml");

    let config_path = Path::new("overspeed.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: overspeed.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds an overspeed.toml configuration file.       ║\n\
            ║  Please create one in the overspeed-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read overspeed.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let typed: OverspeedConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid overspeed.toml                                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    validate_ranges(&typed);

    match parse_config(&content) {
        Ok(device) if device == typed => {}
        Ok(_) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: overspeed.toml uses syntax the device cannot read        ║\n\
                ║                                                                  ║\n\
                ║  Keep to `key = value` lines under [alert], [location], [gps]    ║\n\
                ║  and [display], one value per line.                              ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n"
            );
        }
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Device parser rejects overspeed.toml                     ║\n\
                ║                                                                  ║\n\
                ║  {:<64} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format!("{:?}", e)
            );
        }
    }

    println!("cargo:warning=overspeed.toml validated successfully");
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

/// Validate numeric ranges serde cannot express
fn validate_ranges(config: &OverspeedConfig) {
    let mut errors = Vec::new();

    let threshold = config.alert.default_threshold_kmh;
    if !threshold.is_finite() || threshold < 0.0 {
        errors.push("[alert] default_threshold_kmh must be a non-negative number".to_string());
    }

    let distance = config.location.distance_interval_m;
    if !distance.is_finite() || distance < 0.0 {
        errors.push("[location] distance_interval_m must be non-negative".to_string());
    }

    const BAUD_RATES: [u32; 6] = [4800, 9600, 19200, 38400, 57600, 115200];
    if !BAUD_RATES.contains(&config.gps.baud) {
        errors.push(format!(
            "[gps] baud {} is not a standard GPS rate",
            config.gps.baud
        ));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in overspeed.toml                         ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
