//! Observability for reactorwatch
//!
//! Provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Scope-based begin/complete tracing
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on the analysis
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use reactorwatch::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::DatasetLoaded, &[("reactors", "12")]);
//!
//! let scope = ObservationScope::new("ANALYZE");
//! // ... run the pipeline ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_degraded() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
