//! The full request chain: resolve, fetch, summarize, deliver.
//!
//! Each call is independent. The fetch for a query only starts once the
//! geocoding response has been parsed, and nothing is delivered unless the
//! whole chain succeeds.

use reqwest::{Url, header::HeaderValue};
use std::sync::Arc;

use crate::{
    config::Config,
    error::{Result, WeatherError},
    fetcher::WeatherFetcher,
    model::{Coordinate, Mode, WeatherSummary},
    resolver::LocationResolver,
    transport::{Deliver, HttpGet, ReqwestTransport},
};

pub struct WeatherPipeline {
    resolver: LocationResolver,
    fetcher: WeatherFetcher,
    sink: Box<dyn Deliver>,
}

impl std::fmt::Debug for WeatherPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherPipeline")
            .field("resolver", &self.resolver)
            .field("fetcher", &self.fetcher)
            .finish_non_exhaustive()
    }
}

impl WeatherPipeline {
    pub fn new(resolver: LocationResolver, fetcher: WeatherFetcher, sink: Box<dyn Deliver>) -> Self {
        Self { resolver, fetcher, sink }
    }

    /// Wire both stages to one transport using the endpoints and user agent from `config`.
    pub fn with_transport(
        config: &Config,
        transport: Arc<dyn HttpGet>,
        sink: Box<dyn Deliver>,
    ) -> Result<Self> {
        let geocode = parse_endpoint("endpoints.geocode", &config.endpoints.geocode)?;
        let forecast = parse_endpoint("endpoints.forecast", &config.endpoints.forecast)?;
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            WeatherError::InvalidSetting { setting: "user_agent", reason: e.to_string() }
        })?;

        Ok(Self::new(
            LocationResolver::new(transport.clone(), geocode, user_agent.clone()),
            WeatherFetcher::new(transport, forecast, user_agent),
            sink,
        ))
    }

    pub fn from_config(config: &Config, sink: Box<dyn Deliver>) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()), sink)
    }

    pub async fn weather_for_query(&self, query: &str, mode: Mode) -> Result<WeatherSummary> {
        let coord = self.resolver.resolve(query).await.inspect_err(|e| {
            tracing::warn!(query, %mode, error = %e, "Location lookup failed");
        })?;
        self.weather_for_coordinate(coord, mode).await
    }

    pub async fn weather_for_coordinate(
        &self,
        coord: Coordinate,
        mode: Mode,
    ) -> Result<WeatherSummary> {
        let summary = self.fetcher.fetch(coord, mode).await.inspect_err(|e| {
            tracing::warn!(%coord, %mode, error = %e, "Weather fetch failed");
        })?;

        let dictionary = summary.to_dictionary();
        tracing::info!(%mode, ?dictionary, "Delivering weather");
        self.sink.deliver(dictionary);

        Ok(summary)
    }

    pub async fn get_weather(&self, query: &str) -> Result<WeatherSummary> {
        self.weather_for_query(query, Mode::Current).await
    }

    pub async fn get_weather_from_coords(&self, coord: Coordinate) -> Result<WeatherSummary> {
        self.weather_for_coordinate(coord, Mode::Current).await
    }

    pub async fn get_forecast(&self, query: &str) -> Result<WeatherSummary> {
        self.weather_for_query(query, Mode::Forecast).await
    }

    pub async fn get_forecast_from_coords(&self, coord: Coordinate) -> Result<WeatherSummary> {
        self.weather_for_coordinate(coord, Mode::Forecast).await
    }
}

fn parse_endpoint(setting: &'static str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| WeatherError::InvalidSetting { setting, reason: e.to_string() })
}
