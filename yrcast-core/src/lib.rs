//! Core library for `yrcast`.
//!
//! Turns a place name or coordinate into the few integers a watch face needs:
//! - Location resolution via Nominatim
//! - met.no Locationforecast fetching
//! - Symbol code to icon classification and 24 hour forecast aggregation
//! - Configuration handling
//!
//! It is used by `yrcast-cli`, but any host that implements [`Deliver`] can drive it.

pub mod aggregate;
pub mod condition;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod pipeline;
pub mod resolver;
pub mod transport;

pub use aggregate::{FORECAST_WINDOW_SIZE, REPRESENTATIVE_INDEX, aggregate};
pub use condition::{IconCategory, classify, is_night_symbol};
pub use config::{Config, Endpoints};
pub use error::{Result, WeatherError};
pub use fetcher::WeatherFetcher;
pub use model::{
    Coordinate, CurrentSummary, Dictionary, ForecastSummary, Mode, WeatherObservation,
    WeatherSummary,
};
pub use pipeline::WeatherPipeline;
pub use resolver::LocationResolver;
pub use transport::{Deliver, HttpGet, ReqwestTransport};
