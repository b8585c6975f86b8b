//! CLI argument definitions using clap
//!
//! Commands:
//! - reactorwatch analyze --dataset <csv> [--config <path>] [--lat <f> --lon <f>]
//! - reactorwatch serve [--config <path>] [--port <u16>]
//! - reactorwatch init [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// reactorwatch - nuclear reactor proximity analysis and alerting
#[derive(Parser, Debug)]
#[command(name = "reactorwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a reactor dataset and check the current location against it
    Analyze {
        /// CSV with Name, Latitude, Longitude and Age columns
        #[arg(long)]
        dataset: PathBuf,

        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use this latitude instead of the configured location provider
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Use this longitude instead of the configured location provider
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Alert radius in km
        #[arg(long)]
        threshold_km: Option<f64>,

        /// Skip the desktop notification
        #[arg(long, default_value_t = false)]
        no_notify: bool,

        /// Write the GeoJSON map layer to this file
        #[arg(long)]
        map_out: Option<PathBuf>,
    },

    /// Serve the analysis over HTTP
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(long, default_value = "./reactorwatch.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_args() {
        let cli = Cli::try_parse_from([
            "reactorwatch",
            "analyze",
            "--dataset",
            "plants.csv",
            "--lat",
            "-33.9",
            "--lon",
            "18.4",
            "--no-notify",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze {
                dataset,
                lat,
                lon,
                no_notify,
                config,
                ..
            } => {
                assert_eq!(dataset, PathBuf::from("plants.csv"));
                assert_eq!(lat, Some(-33.9));
                assert_eq!(lon, Some(18.4));
                assert!(no_notify);
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(Cli::try_parse_from([
            "reactorwatch",
            "analyze",
            "--dataset",
            "plants.csv",
            "--lat",
            "19.0",
        ])
        .is_err());
    }

    #[test]
    fn test_init_default_path() {
        let cli = Cli::try_parse_from(["reactorwatch", "init"]).unwrap();
        match cli.command {
            Command::Init { config } => assert_eq!(config, PathBuf::from("./reactorwatch.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
