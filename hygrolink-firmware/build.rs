//! Build script for hygrolink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates station.toml at compile time
//! - Checks that the CYW43 radio blobs are present

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Radio firmware, fetched from the embassy repository (`cyw43-firmware/`)
const RADIO_BLOBS: [&str; 2] = ["cyw43-firmware/43439A0.bin", "cyw43-firmware/43439A0_clm.bin"];

const VALID_PIN_RANGE: std::ops::RangeInclusive<i64> = 0..=29;

/// Pins wired on the board and not available to station.toml
const BOARD_PINS: [i64; 6] = [10, 11, 23, 24, 25, 29];

fn main() {
    setup_linker();
    check_radio_blobs();
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

fn check_radio_blobs() {
    let missing: Vec<&str> = RADIO_BLOBS
        .iter()
        .copied()
        .filter(|path| !Path::new(path).exists())
        .collect();

    for path in RADIO_BLOBS {
        println!("cargo:rerun-if-changed={}", path);
    }

    if !missing.is_empty() {
        fail(
            "CYW43 radio firmware not found",
            &missing
                .iter()
                .map(|path| format!("missing {}", path))
                .chain(std::iter::once(
                    "copy it from embassy's cyw43-firmware directory".to_string(),
                ))
                .collect::<Vec<_>>(),
        );
    }
}

/// Validate station.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=station.toml");

    let config_content = match fs::read_to_string("station.toml") {
        Ok(content) => content,
        Err(e) => fail("Failed to read station.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in station.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_lengths(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_station(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in station.toml", &errors);
    }

    let has_key = config
        .get("thingspeak")
        .and_then(|t| t.get("api_key"))
        .and_then(|k| k.as_str())
        .is_some_and(|k| !k.is_empty());
    if !has_key {
        println!("cargo:warning=station.toml has no thingspeak api_key; uploads are disabled");
    }

    println!("cargo:warning=station.toml validated successfully");
}

fn validate_lengths(config: &toml::Value, errors: &mut Vec<String>) {
    let limits = [
        ("wifi", "ssid", 32),
        ("wifi", "password", 64),
        ("thingspeak", "api_key", 32),
        ("thingspeak", "url", 96),
    ];

    for (section, key, max) in limits {
        let value = config.get(section).and_then(|s| s.get(key));
        match value {
            None => {}
            Some(toml::Value::String(s)) if s.len() > max => {
                errors.push(format!("[{}] {} longer than {} bytes", section, key, max));
            }
            Some(toml::Value::String(_)) => {}
            Some(_) => errors.push(format!("[{}] {} must be a string", section, key)),
        }
    }

    if let Some(toml::Value::String(url)) = config.get("thingspeak").and_then(|t| t.get("url")) {
        if !url.starts_with("http://") {
            errors.push("[thingspeak] url must start with http://".to_string());
        }
    }
}

/// Pin number from a `gpioN` string with optional `!` / `^` prefixes
fn pin_number(value: &str) -> Option<i64> {
    value
        .trim_start_matches(['!', '^'])
        .strip_prefix("gpio")?
        .parse()
        .ok()
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let pins = [
        ("display", "cs_pin"),
        ("display", "dc_pin"),
        ("display", "rst_pin"),
        ("sensor", "data_pin"),
    ];

    let mut seen: Vec<(i64, String)> = Vec::new();
    for (section, key) in pins {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        let name = format!("{}.{}", section, key);

        let Some(pin) = value.as_str().and_then(pin_number) else {
            errors.push(format!("{} must look like \"gpioN\"", name));
            continue;
        };

        if !VALID_PIN_RANGE.contains(&pin) {
            errors.push(format!("{} gpio{} out of range", name, pin));
        } else if BOARD_PINS.contains(&pin) {
            errors.push(format!("{} gpio{} is wired on the board", name, pin));
        } else if let Some((_, other)) = seen.iter().find(|(p, _)| *p == pin) {
            errors.push(format!("{} gpio{} already used by {}", name, pin, other));
        }
        seen.push((pin, name));
    }
}

fn validate_station(config: &toml::Value, errors: &mut Vec<String>) {
    let positive = [
        ("station", "poll_interval_s"),
        ("station", "max_errors"),
        ("display", "width"),
        ("display", "height"),
        ("display", "spi_frequency"),
    ];

    for (section, key) in positive {
        match config.get(section).and_then(|s| s.get(key)) {
            None => {}
            Some(toml::Value::Integer(n)) if *n > 0 => {}
            Some(_) => errors.push(format!("[{}] {} must be a positive integer", section, key)),
        }
    }

    if let Some(mode) = config.get("display").and_then(|d| d.get("spi_mode")) {
        if !matches!(mode.as_integer(), Some(0..=3)) {
            errors.push("[display] spi_mode must be 0-3".to_string());
        }
    }
}

/// Abort the build with a boxed message
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
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
