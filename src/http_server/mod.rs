//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /analyze` - Multipart CSV upload, returns report and map layer
//!
//! Query parameters on `/analyze`: `lat` and `lon` (together) override the
//! configured location provider; `threshold_km` overrides the alert radius.

pub mod analyze_routes;
pub mod config;
pub mod health_routes;
pub mod server;

pub use analyze_routes::{AnalyzeResponse, ErrorResponse, DATASET_FIELD};
pub use config::HttpServerConfig;
pub use server::HttpServer;
