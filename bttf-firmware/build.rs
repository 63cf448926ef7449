//! Build script for bttf-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates lamp.toml and compiles it to the embedded postcard blob
//! - Records the build time as the RTC fallback seed

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use bttf_core::config::{ConfigRoot, LampConfig, MAX_READ_INTERVAL_S, MIN_READ_INTERVAL_S};
use bttf_core::registry::GPIO_COUNT;
use bttf_core::traits::display::MAX_BRIGHTNESS;

fn main() {
    setup_linker();
    compile_config();
    record_build_time();
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate lamp.toml and write it to OUT_DIR as postcard
fn compile_config() {
    println!("cargo:rerun-if-changed=lamp.toml");

    let config_path = Path::new("lamp.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: lamp.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds its default settings from lamp.toml.       ║\n\
            ║  Please create one in the bttf-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read lamp.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ConfigRoot = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid lamp.toml                                        ║\n\
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
    validate_time(&config, &mut errors);
    if let Some(lamp) = &config.lamp {
        validate_lamp(lamp, &mut errors);
    } else {
        println!("cargo:warning=lamp.toml has no [BTTFLamp] section, built-in defaults apply");
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid lamp configuration                               ║\n\
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

    let blob = postcard::to_allocvec(&config).unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("lamp_config.bin"), blob).unwrap();

    println!("cargo:warning=lamp.toml validated successfully");
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

fn validate_time(config: &ConfigRoot, errors: &mut Vec<String>) {
    let offset = config.time.utc_offset_h;
    if !(-12..=14).contains(&offset) {
        errors.push(format!("[time] utc-offset-h {} must be -12 to 14", offset));
    }
}

fn validate_lamp(lamp: &LampConfig, errors: &mut Vec<String>) {
    if let Some(interval) = lamp.read_interval_s {
        let range = MIN_READ_INTERVAL_S as i32..=MAX_READ_INTERVAL_S as i32;
        if !range.contains(&interval) {
            // Clamped on load, so only worth a warning
            println!(
                "cargo:warning=[BTTFLamp] read-interval-s {} will be clamped to {}-{}",
                interval, MIN_READ_INTERVAL_S, MAX_READ_INTERVAL_S
            );
        }
    }

    if let Some(brightness) = lamp.brightness {
        if brightness > MAX_BRIGHTNESS {
            errors.push(format!(
                "[BTTFLamp] brightness {} must be 0-{}",
                brightness, MAX_BRIGHTNESS
            ));
        }
    }

    if let Some(pins) = &lamp.pins {
        let all = pins.all();
        for pin in all {
            if pin >= GPIO_COUNT {
                errors.push(format!("[BTTFLamp.pins] GPIO{} does not exist", pin));
            }
        }
        for (i, pin) in all.iter().enumerate() {
            if all[i + 1..].contains(pin) {
                errors.push(format!("[BTTFLamp.pins] GPIO{} assigned twice", pin));
            }
        }
    }
}

/// Export the build time for seeding an unset RTC
///
/// Honors SOURCE_DATE_EPOCH for reproducible builds.
fn record_build_time() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let secs = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    println!("cargo:rustc-env=BTTF_BUILD_UNIX={}", secs);
}
