//! CLI command implementations
//!
//! `analyze` runs the pipeline in order: load, classify, resolve location,
//! compute proximity, format alert, notify, render map.

use std::fs;
use std::path::{Path, PathBuf};

use crate::alerting::{deliver, NotificationSink, SinkKind};
use crate::config::Config;
use crate::http_server::HttpServer;
use crate::location::{resolve, Coordinates, FixedLocation, LocationProvider};
use crate::map::MapLayer;
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope};
use crate::pipeline::AnalysisReport;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Options for one `analyze` invocation
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub dataset: PathBuf,
    pub config: Option<PathBuf>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub threshold_km: Option<f64>,
    pub no_notify: bool,
    pub map_out: Option<PathBuf>,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Analyze {
            dataset,
            config,
            lat,
            lon,
            threshold_km,
            no_notify,
            map_out,
        } => {
            let report = analyze(&AnalyzeOptions {
                dataset,
                config,
                lat,
                lon,
                threshold_km,
                no_notify,
                map_out,
            })?;
            write_response(&report)
        }
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Init { config } => init(&config),
    }
}

/// Loads configuration, applies the threshold override and log level.
pub fn load_config(path: Option<&Path>, threshold_km: Option<f64>) -> CliResult<Config> {
    let mut config = Config::load_or_default(path)?;
    if let Some(threshold_km) = threshold_km {
        config.threshold_km = threshold_km;
        config.validate()?;
    }

    Logger::set_min_severity(config.severity()?);

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(Event::ConfigLoaded, &[("source", source.as_str())]);

    Ok(config)
}

/// Analyze a dataset against the current location
pub fn analyze(opts: &AnalyzeOptions) -> CliResult<AnalysisReport> {
    let config = load_config(opts.config.as_deref(), opts.threshold_km)?;

    let provider: Box<dyn LocationProvider> = match (opts.lat, opts.lon) {
        (Some(lat), Some(lon)) => {
            if !Coordinates::new(lat, lon).is_valid() {
                return Err(CliError::invalid_location(lat, lon));
            }
            Box::new(FixedLocation::new(lat, lon))
        }
        _ => config.location_provider()?,
    };

    let sink = if opts.no_notify {
        SinkKind::None.build()
    } else {
        config.notification_sink()
    };

    run_analysis(
        &config,
        &opts.dataset,
        provider.as_ref(),
        sink.as_ref(),
        opts.map_out.as_deref(),
    )
}

/// Runs the full pipeline with explicit collaborators.
pub fn run_analysis(
    config: &Config,
    dataset_path: &Path,
    provider: &dyn LocationProvider,
    sink: &dyn NotificationSink,
    map_out: Option<&Path>,
) -> CliResult<AnalysisReport> {
    let dataset_name = dataset_path.display().to_string();
    let scope = ObservationScope::with_fields("ANALYZE", &[("dataset", dataset_name.as_str())]);

    let dataset = match config.dataset_loader().load_path(dataset_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(Event::DatasetRejected, &[("reason", reason.as_str())]);
            scope.fail(&reason);
            return Err(e.into());
        }
    };

    let count = dataset.len().to_string();
    let filled = dataset.filled_cells().to_string();
    let policy = config.missing_values.to_string();
    log_event_with_fields(
        Event::DatasetLoaded,
        &[
            ("filled_cells", filled.as_str()),
            ("missing_values", policy.as_str()),
            ("reactors", count.as_str()),
        ],
    );

    let location = resolve(provider);
    let analysis = config.analyzer().analyze(&location, dataset.records());

    if let Some(alert) = &analysis.alert {
        deliver(sink, &alert.notification);
    }

    if let Some(path) = map_out {
        let layer = MapLayer::from_analysis(&analysis, config.circle_radius_m);
        if let Err(e) = layer.write_to(path) {
            let reason = format!("Failed to write map '{}': {}", path.display(), e);
            scope.fail(&reason);
            return Err(CliError::io_error(reason));
        }
        let target = path.display().to_string();
        log_event_with_fields(Event::MapWritten, &[("path", target.as_str())]);
    }

    let nearby = analysis.nearby_count().to_string();
    scope.complete_with_fields(&[("nearby", nearby.as_str())]);

    Ok(AnalysisReport::new(analysis))
}

/// Start the HTTP server
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path, None)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let server = HttpServer::new(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Write a default configuration file
///
/// Refuses to overwrite an existing file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path.display()));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::io_error(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
    }

    let json = Config::default().to_json_pretty()?;
    fs::write(config_path, json + "\n").map_err(|e| {
        CliError::io_error(format!(
            "Failed to write {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("written", path.as_str())]);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerting::NoopNotifier;
    use crate::location::NoLocation;

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("reactorwatch.json");

        init(&path).unwrap();
        let written = Config::load(&path).unwrap();
        assert_eq!(written, Config::default());

        let err = init(&path).unwrap_err();
        assert_eq!(err.code_str(), "REACTOR_CLI_ALREADY_INITIALIZED");
    }

    #[test]
    fn test_threshold_override_is_validated() {
        assert!(load_config(None, Some(-5.0)).is_err());
        assert_eq!(load_config(None, Some(100.0)).unwrap().threshold_km, 100.0);
    }

    #[test]
    fn test_out_of_range_flags_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("plants.csv");
        fs::write(&dataset, "Name,Latitude,Longitude,Age\nTarapur,19.83,72.66,54\n").unwrap();

        let err = analyze(&AnalyzeOptions {
            dataset,
            lat: Some(198.3),
            lon: Some(72.66),
            no_notify: true,
            ..AnalyzeOptions::default()
        })
        .unwrap_err();
        assert_eq!(err.code_str(), "REACTOR_CLI_INVALID_LOCATION");
        assert!(err.message().contains("198.3"));
    }

    #[test]
    fn test_missing_dataset_is_dataset_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_analysis(
            &Config::default(),
            &dir.path().join("absent.csv"),
            &NoLocation,
            &NoopNotifier,
            None,
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "REACTOR_CLI_DATASET_ERROR");
    }
}
