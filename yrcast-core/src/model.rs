use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::condition::IconCategory;

/// Named integer fields handed to the device transport.
pub type Dictionary = BTreeMap<&'static str, i32>;

pub const KEY_TEMPERATURE: &str = "WeatherTemperature";
pub const KEY_CONDITION: &str = "WeatherCondition";
pub const KEY_FORECAST_CONDITION: &str = "WeatherForecastCondition";
pub const KEY_FORECAST_HIGH: &str = "WeatherForecastHighTemp";
pub const KEY_FORECAST_LOW: &str = "WeatherForecastLowTemp";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Current,
    Forecast,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Current => "current",
            Mode::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSummary {
    pub symbol_code: String,
}

/// One entry of the provider timeseries. Position in the sequence is the
/// time step; `time` is carried along for logging only.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub time: Option<DateTime<Utc>>,
    pub air_temperature: f64,
    pub next_1h: Option<ConditionSummary>,
    pub next_6h: Option<ConditionSummary>,
}

impl WeatherObservation {
    pub fn new(air_temperature: f64) -> Self {
        Self { time: None, air_temperature, next_1h: None, next_6h: None }
    }

    pub fn with_next_1h(mut self, symbol_code: impl Into<String>) -> Self {
        self.next_1h = Some(ConditionSummary { symbol_code: symbol_code.into() });
        self
    }

    pub fn with_next_6h(mut self, symbol_code: impl Into<String>) -> Self {
        self.next_6h = Some(ConditionSummary { symbol_code: symbol_code.into() });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentSummary {
    pub temperature: i32,
    pub condition: IconCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastSummary {
    pub condition: IconCategory,
    pub high_temp: i32,
    pub low_temp: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WeatherSummary {
    Current(CurrentSummary),
    Forecast(ForecastSummary),
}

impl WeatherSummary {
    /// Flatten into the keys the watch face reads.
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        match self {
            WeatherSummary::Current(current) => {
                dict.insert(KEY_TEMPERATURE, current.temperature);
                dict.insert(KEY_CONDITION, current.condition.device_code().into());
            }
            WeatherSummary::Forecast(forecast) => {
                dict.insert(KEY_FORECAST_CONDITION, forecast.condition.device_code().into());
                dict.insert(KEY_FORECAST_HIGH, forecast.high_temp);
                dict.insert(KEY_FORECAST_LOW, forecast.low_temp);
            }
        }
        dict
    }

    pub fn mode(&self) -> Mode {
        match self {
            WeatherSummary::Current(_) => Mode::Current,
            WeatherSummary::Forecast(_) => Mode::Forecast,
        }
    }
}

/// Round to the nearest integer, half-way values toward positive infinity.
/// This is what the device-side script does, so `-2.5` becomes `-2`.
pub fn round_temperature(value: f64) -> i32 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_temperature(14.6), 15);
        assert_eq!(round_temperature(14.5), 15);
        assert_eq!(round_temperature(14.4), 14);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.6), -3);
        assert_eq!(round_temperature(0.0), 0);
    }

    #[test]
    fn rounding_does_not_bump_values_just_below_half() {
        assert_eq!(round_temperature(0.49999999999999994), 0);
        assert_eq!(round_temperature(-0.5000000000000001), -1);
    }

    #[test]
    fn current_summary_flattens_to_device_keys() {
        let summary = WeatherSummary::Current(CurrentSummary {
            temperature: 15,
            condition: IconCategory::HeavyRain,
        });

        let dict = summary.to_dictionary();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(KEY_TEMPERATURE), Some(&15));
        assert_eq!(dict.get(KEY_CONDITION), Some(&6));
    }

    #[test]
    fn forecast_summary_flattens_to_device_keys() {
        let summary = WeatherSummary::Forecast(ForecastSummary {
            condition: IconCategory::PartlyCloudyDay,
            high_temp: 10,
            low_temp: -3,
        });

        let dict = summary.to_dictionary();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.get(KEY_FORECAST_CONDITION), Some(&2));
        assert_eq!(dict.get(KEY_FORECAST_HIGH), Some(&10));
        assert_eq!(dict.get(KEY_FORECAST_LOW), Some(&-3));
        assert_eq!(summary.mode(), Mode::Forecast);
    }
}
