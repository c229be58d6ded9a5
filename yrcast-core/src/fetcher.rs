use chrono::{DateTime, Utc};
use reqwest::{
    Url,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    aggregate::{DEFAULT_SYMBOL_CODE, FORECAST_WINDOW_SIZE, aggregate},
    condition::{classify, is_night_symbol},
    error::{Result, WeatherError},
    model::{
        ConditionSummary, Coordinate, CurrentSummary, Mode, WeatherObservation, WeatherSummary,
        round_temperature,
    },
    transport::HttpGet,
};

pub const DEFAULT_FORECAST_URL: &str =
    "https://api.met.no/weatherapi/locationforecast/2.0/compact";

#[derive(Debug, Deserialize)]
struct MetResponse {
    properties: MetProperties,
}

/// Entries stay raw until read, so a broken step nobody looks at can't
/// spoil the whole feed.
#[derive(Debug, Deserialize)]
struct MetProperties {
    timeseries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct MetTimeStep {
    time: Option<String>,
    data: MetData,
}

#[derive(Debug, Deserialize)]
struct MetData {
    instant: MetInstant,
    next_1_hours: Option<MetPeriod>,
    next_6_hours: Option<MetPeriod>,
}

#[derive(Debug, Deserialize)]
struct MetInstant {
    details: MetDetails,
}

#[derive(Debug, Deserialize)]
struct MetDetails {
    air_temperature: f64,
}

#[derive(Debug, Deserialize)]
struct MetPeriod {
    summary: Option<MetSummary>,
}

#[derive(Debug, Deserialize)]
struct MetSummary {
    symbol_code: Option<String>,
}

impl MetPeriod {
    fn into_summary(self) -> Option<ConditionSummary> {
        self.summary
            .and_then(|s| s.symbol_code)
            .map(|symbol_code| ConditionSummary { symbol_code })
    }
}

impl From<MetTimeStep> for WeatherObservation {
    fn from(step: MetTimeStep) -> Self {
        let time = step
            .time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));

        WeatherObservation {
            time,
            air_temperature: step.data.instant.details.air_temperature,
            next_1h: step.data.next_1_hours.and_then(MetPeriod::into_summary),
            next_6h: step.data.next_6_hours.and_then(MetPeriod::into_summary),
        }
    }
}

/// A met.no timeseries with at least one entry.
#[derive(Debug, Clone)]
pub struct Timeseries {
    steps: Vec<Value>,
}

impl Timeseries {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn observation(&self, index: usize) -> Result<WeatherObservation> {
        let step = self.steps.get(index).ok_or_else(|| {
            WeatherError::Malformed(format!("timeseries has no entry {index}"))
        })?;

        MetTimeStep::deserialize(step)
            .map(WeatherObservation::from)
            .map_err(|e| WeatherError::malformed(&format!("timeseries entry {index}"), e))
    }

    /// The leading `size` observations, or fewer if the series is shorter.
    pub fn window(&self, size: usize) -> Result<Vec<WeatherObservation>> {
        (0..size.min(self.len())).map(|i| self.observation(i)).collect()
    }
}

/// Requests the met.no timeseries for a coordinate and normalizes it.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    transport: Arc<dyn HttpGet>,
    endpoint: Url,
    user_agent: HeaderValue,
}

impl WeatherFetcher {
    pub fn new(transport: Arc<dyn HttpGet>, endpoint: Url, user_agent: HeaderValue) -> Self {
        Self { transport, endpoint, user_agent }
    }

    pub fn request_url(&self, coord: Coordinate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lat", &coord.latitude.to_string())
            .append_pair("lon", &coord.longitude.to_string());
        url
    }

    pub async fn fetch(&self, coord: Coordinate, mode: Mode) -> Result<WeatherSummary> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());

        let body = self.transport.get(self.request_url(coord), headers).await?;
        let timeseries = parse_timeseries(&body)?;

        tracing::debug!(%coord, %mode, steps = timeseries.len(), "Fetched timeseries");

        summarize(&timeseries, mode)
    }
}

/// Top-level shape of a met.no response; entries are checked when read.
pub fn parse_timeseries(body: &str) -> Result<Timeseries> {
    let parsed: MetResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::malformed("forecast response", e))?;

    if parsed.properties.timeseries.is_empty() {
        return Err(WeatherError::Malformed("forecast response has an empty timeseries".into()));
    }

    Ok(Timeseries { steps: parsed.properties.timeseries })
}

/// Reads only the entries `mode` needs: the first for current, the forecast window otherwise.
pub fn summarize(timeseries: &Timeseries, mode: Mode) -> Result<WeatherSummary> {
    match mode {
        Mode::Current => {
            let now = timeseries.observation(0)?;
            Ok(WeatherSummary::Current(summarize_current(&now)))
        }
        Mode::Forecast => {
            aggregate(&timeseries.window(FORECAST_WINDOW_SIZE)?).map(WeatherSummary::Forecast)
        }
    }
}

/// Current conditions from the "now" observation. The symbol prefers the
/// 1 hour outlook, then the 6 hour one, then a fair-weather default.
pub fn summarize_current(now: &WeatherObservation) -> CurrentSummary {
    let symbol_code = now
        .next_1h
        .as_ref()
        .or(now.next_6h.as_ref())
        .map(|s| s.symbol_code.as_str())
        .unwrap_or(DEFAULT_SYMBOL_CODE);

    CurrentSummary {
        temperature: round_temperature(now.air_temperature),
        condition: classify(symbol_code, is_night_symbol(symbol_code)),
    }
}
