//! Analysis pipeline
//!
//! Loader → Classifier → Proximity Engine → Alert Formatter, with the
//! resolved location passed in as a value. Side-effecting collaborators
//! (location lookup, notifications) stay outside `Analyzer`.

mod analyzer;

pub use analyzer::{Analysis, AnalysisReport, Analyzer, ReactorAssessment};
