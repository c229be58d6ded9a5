//! Reduction of a forecast timeseries into one high/low/condition summary.
//!
//! met.no's compact feed steps in 3 hour increments further out, which the
//! two constants below rely on. If the step changes, both need revisiting.

use crate::{
    condition::classify,
    error::{Result, WeatherError},
    model::{ForecastSummary, WeatherObservation, round_temperature},
};

/// Observations covering the next 24 hours at a 3 hour step.
pub const FORECAST_WINDOW_SIZE: usize = 8;

/// Observation roughly 6 hours out, lining up with the `next_6_hours` horizon.
pub const REPRESENTATIVE_INDEX: usize = 2;

/// Symbol used when no representative condition is available.
pub const DEFAULT_SYMBOL_CODE: &str = "fair_day";

pub fn aggregate(observations: &[WeatherObservation]) -> Result<ForecastSummary> {
    let window = &observations[..observations.len().min(FORECAST_WINDOW_SIZE)];
    if window.is_empty() {
        return Err(WeatherError::Malformed("timeseries has no observations".to_string()));
    }

    let (low, high) = window.iter().map(|o| o.air_temperature).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(low, high), temp| (low.min(temp), high.max(temp)),
    );

    let symbol_code = observations
        .get(REPRESENTATIVE_INDEX)
        .and_then(|o| o.next_6h.as_ref())
        .map(|s| s.symbol_code.as_str())
        .unwrap_or(DEFAULT_SYMBOL_CODE);

    tracing::debug!(
        window = window.len(),
        from = ?window.first().and_then(|o| o.time),
        to = ?window.last().and_then(|o| o.time),
        symbol_code,
        "Aggregating forecast window"
    );

    Ok(ForecastSummary {
        condition: classify(symbol_code, false),
        high_temp: round_temperature(high),
        low_temp: round_temperature(low),
    })
}
