//! Classifier → proximity → alert, composed into one pure run

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::alerting::{AlertFormatter, AlertPayload, SAFE_ZONE_MESSAGE};
use crate::dataset::ReactorRecord;
use crate::location::UserLocation;
use crate::observability::{log_event_with_fields, Event};
use crate::proximity::{ProximityEngine, ProximityResult};
use crate::safety::{classify, color_for, Color, SafetyTier};

/// Per-reactor row of the analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactorAssessment {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub age: Option<f64>,
    pub safety: SafetyTier,
    pub color: Color,
    pub distance_km: f64,
    pub within_threshold: bool,
}

impl ReactorAssessment {
    fn from_result(result: ProximityResult) -> Self {
        let safety = classify(result.reactor.age);
        Self {
            name: result.reactor.name,
            latitude: result.reactor.latitude,
            longitude: result.reactor.longitude,
            age: result.reactor.age,
            safety,
            color: color_for(safety),
            distance_km: result.distance_km,
            within_threshold: result.within_threshold,
        }
    }
}

/// Deterministic outcome of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub location: UserLocation,
    pub threshold_km: f64,
    pub reactors: Vec<ReactorAssessment>,
    pub alert: Option<AlertPayload>,
    pub safe_zone: bool,
    pub status_message: String,
}

impl Analysis {
    /// Number of reactors within threshold
    pub fn nearby_count(&self) -> usize {
        self.reactors.iter().filter(|r| r.within_threshold).count()
    }
}

/// Analysis stamped with run identity, as emitted by the CLI and HTTP server.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: Analysis,
}

impl AnalysisReport {
    pub fn new(analysis: Analysis) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            analysis,
        }
    }
}

/// Runs the engine over a dataset for a resolved (or unresolved) location.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    engine: ProximityEngine,
    formatter: AlertFormatter,
}

impl Analyzer {
    pub fn new(engine: ProximityEngine, formatter: AlertFormatter) -> Self {
        Self { engine, formatter }
    }

    pub fn threshold_km(&self) -> f64 {
        self.engine.threshold_km()
    }

    /// Pure apart from logging: same inputs, same `Analysis`.
    pub fn analyze(&self, user: &UserLocation, reactors: &[ReactorRecord]) -> Analysis {
        let results = self.engine.compute(user, reactors);
        let alert = self.formatter.format(&results);

        let reactors: Vec<ReactorAssessment> = results
            .into_iter()
            .map(ReactorAssessment::from_result)
            .collect();

        let count = reactors.len().to_string();
        let threshold = self.threshold_km().to_string();
        log_event_with_fields(
            Event::ProximityComputed,
            &[("reactors", count.as_str()), ("threshold_km", threshold.as_str())],
        );

        let (safe_zone, status_message) = match &alert {
            Some(payload) => {
                let names = payload.reactor_names.join(",");
                log_event_with_fields(Event::AlertRaised, &[("reactors", names.as_str())]);
                (false, payload.message.clone())
            }
            None => {
                log_event_with_fields(Event::SafeZone, &[]);
                (true, SAFE_ZONE_MESSAGE.to_string())
            }
        };

        Analysis {
            location: *user,
            threshold_km: self.threshold_km(),
            reactors,
            alert,
            safe_zone,
            status_message,
        }
    }
}
