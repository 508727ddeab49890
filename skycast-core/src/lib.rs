//! Core library for the `skycast` weather tools.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - Unified domain records for weather, forecast, air quality and alerts
//! - The mapper from upstream JSON shapes into those records
//! - The query service orchestrating upstream calls
//! - Presentation and recommendation helpers producing the tool output
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services.

pub mod advice;
pub mod config;
pub mod error;
pub mod format;
pub mod mapper;
pub mod model;
pub mod service;
pub mod upstream;

pub use advice::Activity;
pub use config::{Config, ConfigFile};
pub use error::WeatherError;
pub use model::{
    AirQualitySnapshot, Alert, AlertSet, AqiLevel, CurrentConditions, ForecastPoint,
    ForecastSeries, Location, PollutantLevels, Severity, WeatherSummary,
};
pub use service::WeatherService;
