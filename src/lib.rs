//! reactorwatch - nuclear reactor proximity analysis and alerting
//!
//! Loads a reactor dataset, classifies each reactor by age, checks the user's
//! location against a geodesic proximity threshold and produces an alert, a
//! notification and a GeoJSON map layer.

pub mod alerting;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod http_server;
pub mod location;
pub mod map;
pub mod observability;
pub mod pipeline;
pub mod proximity;
pub mod safety;
