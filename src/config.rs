//! Command line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "BaseDatos/systems";
pub const DEFAULT_BACKGROUND: &str = "images/spacebackground.jpg";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const WINDOW_TITLE: &str = "Select a Constellation";
pub const WINDOW_SIZE: [f32; 2] = [900.0, 700.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [700.0, 500.0];

/// Browse constellation descriptors and view their stars in 3D.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "constellation-viewer", version)]
pub struct Config {
    /// Directory of constellation XML descriptors
    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        env = "CONSTELLATION_DIR",
        default_value = DEFAULT_DATA_DIR
    )]
    pub data_dir: PathBuf,

    /// Background image drawn behind the window
    #[arg(
        long,
        value_name = "FILE",
        env = "CONSTELLATION_BACKGROUND",
        default_value = DEFAULT_BACKGROUND
    )]
    pub background: PathBuf,

    /// Log filter, e.g. "info" or "constellation_viewer=debug" (RUST_LOG wins)
    #[arg(
        long,
        value_name = "FILTER",
        env = "CONSTELLATION_LOG",
        default_value = DEFAULT_LOG_FILTER
    )]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            background: PathBuf::from(DEFAULT_BACKGROUND),
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "constellation-viewer",
            "-d",
            "catalog",
            "--background",
            "bg.png",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("catalog"));
        assert_eq!(config.background, PathBuf::from("bg.png"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Config::try_parse_from(["constellation-viewer", "--verbose-ish"]).is_err());
    }
}
