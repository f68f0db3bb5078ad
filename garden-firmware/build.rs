//! Build script for garden-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates garden.toml at compile time
//! - Generates the configuration constants included by `src/config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
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

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate garden.toml configuration at compile time
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=garden.toml");

    let config_path = Path::new("garden.toml");

    if !config_path.exists() {
        fail(
            "garden.toml not found!",
            &[
                "The firmware requires a garden.toml configuration file.".into(),
                "Please create one in the garden-firmware directory.".into(),
            ],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read garden.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in garden.toml",
            &format_error_lines(&e.to_string()),
        ),
    };

    validate_required_sections(&config);

    let mut errors = Vec::new();
    validate_pump(&config, &mut errors);
    validate_ui(&config, &mut errors);
    validate_input(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in garden.toml", &errors);
    }

    println!("cargo:warning=garden.toml validated successfully");
    config
}

/// Truncate error message lines to the box width
fn format_error_lines(msg: &str) -> Vec<String> {
    msg.lines()
        .map(|line| {
            if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = ["pump", "ui", "input", "timing"]
        .iter()
        .filter(|section| !matches!(config.get(**section), Some(toml::Value::Table(_))))
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    if !errors.is_empty() {
        fail("Missing required sections in garden.toml", &errors);
    }
}

/// Check an integer key against its allowed range
fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) if range.contains(v) => {}
        Some(toml::Value::Integer(_)) => errors.push(format!(
            "[{}] {} must be {}-{}",
            section,
            key,
            range.start(),
            range.end()
        )),
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        None => errors.push(format!("[{}] missing '{}'", section, key)),
    }
}

fn validate_pump(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "pump", "run_minutes", 1..=1440, errors);
    check_int(config, "pump", "wait_minutes", 0..=1440, errors);
}

fn validate_ui(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "ui", "idle_timeout_ms", 1_000..=600_000, errors);
    check_int(config, "ui", "duration_step_minutes", 1..=1440, errors);
    check_int(config, "ui", "power_step_percent", 1..=100, errors);
    check_int(config, "ui", "notice_ms", 0..=60_000, errors);
}

fn validate_input(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("input").and_then(|s| s.get("encoder_reversed")) {
        Some(toml::Value::Boolean(_)) => {}
        Some(_) => errors.push("[input] encoder_reversed must be true or false".into()),
        None => errors.push("[input] missing 'encoder_reversed'".into()),
    }
    check_int(config, "input", "poll_interval_ms", 1..=50, errors);
    check_int(config, "input", "debounce_ms", 1..=500, errors);
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "timing", "tick_interval_ms", 10..=1_000, errors);
}

/// Write `garden_config.rs` into OUT_DIR
///
/// Only called after validation, so every lookup is known to succeed.
fn generate_config(config: &toml::Value) {
    let int = |section: &str, key: &str| -> i64 {
        config[section][key].as_integer().unwrap()
    };
    let reversed = config["input"]["encoder_reversed"].as_bool().unwrap();

    let source = format!(
        "/// Controller configuration from garden.toml\n\
         pub const CONTROLLER_CONFIG: ControllerConfig = ControllerConfig {{\n    \
             pump: PumpConfig {{ run_minutes: {}, wait_minutes: {} }},\n    \
             ui: UiConfig {{\n        \
                 idle_timeout_ms: {},\n        \
                 duration_step_minutes: {},\n        \
                 power_step_percent: {},\n        \
                 notice_ms: {},\n    \
             }},\n\
         }};\n\
         pub const ENCODER_REVERSED: bool = {};\n\
         pub const POLL_INTERVAL_MS: u64 = {};\n\
         pub const DEBOUNCE_MS: u64 = {};\n\
         pub const TICK_INTERVAL_MS: u64 = {};\n",
        int("pump", "run_minutes"),
        int("pump", "wait_minutes"),
        int("ui", "idle_timeout_ms"),
        int("ui", "duration_step_minutes"),
        int("ui", "power_step_percent"),
        int("ui", "notice_ms"),
        reversed,
        int("input", "poll_interval_ms"),
        int("input", "debounce_ms"),
        int("timing", "tick_interval_ms"),
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("garden_config.rs"), source).unwrap();
}
