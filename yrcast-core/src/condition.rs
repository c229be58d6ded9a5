//! Mapping of met.no symbol codes onto the icon set the watch face can draw.
//!
//! Symbol codes look like `clearsky_day`, `rainshowers_night` or `heavysnow`.
//! The base code (qualifier stripped) selects the category; the qualifier only
//! matters for the two categories that have a night glyph.

use serde::{Deserialize, Serialize};

const NIGHT_QUALIFIER: &str = "_night";
const QUALIFIERS: &[&str] = &["_day", "_night"];

/// Glyphs the device understands. The discriminant is the value sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum IconCategory {
    ClearDay = 0,
    ClearNight = 1,
    PartlyCloudyDay = 2,
    PartlyCloudyNight = 3,
    Cloudy = 4,
    LightRain = 5,
    HeavyRain = 6,
    MixedRainSnow = 7,
    LightSnow = 8,
    HeavySnow = 9,
    Thunderstorm = 10,
    Generic = 11,
}

impl IconCategory {
    pub const fn device_code(self) -> u8 {
        self as u8
    }

    pub const fn all() -> &'static [IconCategory] {
        &[
            IconCategory::ClearDay,
            IconCategory::ClearNight,
            IconCategory::PartlyCloudyDay,
            IconCategory::PartlyCloudyNight,
            IconCategory::Cloudy,
            IconCategory::LightRain,
            IconCategory::HeavyRain,
            IconCategory::MixedRainSnow,
            IconCategory::LightSnow,
            IconCategory::HeavySnow,
            IconCategory::Thunderstorm,
            IconCategory::Generic,
        ]
    }
}

/// Base symbol codes with a dedicated icon. Anything else falls back to
/// [`IconCategory::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSymbol {
    ClearSky,
    Fair,
    PartlyCloudy,
    Cloudy,
    LightRain,
    LightRainShowers,
    RainShowers,
    Rain,
    HeavyRain,
    HeavyRainShowers,
    Sleet,
    SleetShowers,
    Snow,
    SnowShowers,
    HeavySnow,
    HeavySnowShowers,
    LightSnow,
    LightSnowShowers,
    Thunder,
    Thunderstorm,
}

impl BaseSymbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseSymbol::ClearSky => "clearsky",
            BaseSymbol::Fair => "fair",
            BaseSymbol::PartlyCloudy => "partlycloudy",
            BaseSymbol::Cloudy => "cloudy",
            BaseSymbol::LightRain => "lightrain",
            BaseSymbol::LightRainShowers => "lightrainshowers",
            BaseSymbol::RainShowers => "rainshowers",
            BaseSymbol::Rain => "rain",
            BaseSymbol::HeavyRain => "heavyrain",
            BaseSymbol::HeavyRainShowers => "heavyrainshowers",
            BaseSymbol::Sleet => "sleet",
            BaseSymbol::SleetShowers => "sleetshowers",
            BaseSymbol::Snow => "snow",
            BaseSymbol::SnowShowers => "snowshowers",
            BaseSymbol::HeavySnow => "heavysnow",
            BaseSymbol::HeavySnowShowers => "heavysnowshowers",
            BaseSymbol::LightSnow => "lightsnow",
            BaseSymbol::LightSnowShowers => "lightsnowshowers",
            BaseSymbol::Thunder => "thunder",
            BaseSymbol::Thunderstorm => "thunderstorm",
        }
    }

    pub const fn all() -> &'static [BaseSymbol] {
        &[
            BaseSymbol::ClearSky,
            BaseSymbol::Fair,
            BaseSymbol::PartlyCloudy,
            BaseSymbol::Cloudy,
            BaseSymbol::LightRain,
            BaseSymbol::LightRainShowers,
            BaseSymbol::RainShowers,
            BaseSymbol::Rain,
            BaseSymbol::HeavyRain,
            BaseSymbol::HeavyRainShowers,
            BaseSymbol::Sleet,
            BaseSymbol::SleetShowers,
            BaseSymbol::Snow,
            BaseSymbol::SnowShowers,
            BaseSymbol::HeavySnow,
            BaseSymbol::HeavySnowShowers,
            BaseSymbol::LightSnow,
            BaseSymbol::LightSnowShowers,
            BaseSymbol::Thunder,
            BaseSymbol::Thunderstorm,
        ]
    }

    fn parse(base_code: &str) -> Option<BaseSymbol> {
        BaseSymbol::all()
            .iter()
            .copied()
            .find(|symbol| symbol.as_str().eq_ignore_ascii_case(base_code))
    }

    pub fn icon(self, is_night: bool) -> IconCategory {
        match self {
            BaseSymbol::ClearSky if is_night => IconCategory::ClearNight,
            BaseSymbol::ClearSky => IconCategory::ClearDay,
            BaseSymbol::Fair | BaseSymbol::PartlyCloudy if is_night => {
                IconCategory::PartlyCloudyNight
            }
            BaseSymbol::Fair | BaseSymbol::PartlyCloudy => IconCategory::PartlyCloudyDay,
            BaseSymbol::Cloudy => IconCategory::Cloudy,
            BaseSymbol::LightRain | BaseSymbol::LightRainShowers | BaseSymbol::RainShowers => {
                IconCategory::LightRain
            }
            BaseSymbol::Rain | BaseSymbol::HeavyRain | BaseSymbol::HeavyRainShowers => {
                IconCategory::HeavyRain
            }
            BaseSymbol::Sleet | BaseSymbol::SleetShowers => IconCategory::MixedRainSnow,
            BaseSymbol::Snow
            | BaseSymbol::SnowShowers
            | BaseSymbol::HeavySnow
            | BaseSymbol::HeavySnowShowers => IconCategory::HeavySnow,
            BaseSymbol::LightSnow | BaseSymbol::LightSnowShowers => IconCategory::LightSnow,
            BaseSymbol::Thunder | BaseSymbol::Thunderstorm => IconCategory::Thunderstorm,
        }
    }
}

/// Whether the unstripped symbol code carries the night qualifier.
/// Must be evaluated before [`strip_qualifier`].
pub fn is_night_symbol(symbol_code: &str) -> bool {
    symbol_code.to_ascii_lowercase().contains(NIGHT_QUALIFIER)
}

/// Drop a trailing `_day` / `_night` qualifier.
pub fn strip_qualifier(symbol_code: &str) -> &str {
    let lower = symbol_code.to_ascii_lowercase();
    QUALIFIERS
        .iter()
        .find(|q| lower.ends_with(*q))
        .map(|q| &symbol_code[..symbol_code.len() - q.len()])
        .unwrap_or(symbol_code)
}

/// Classify a provider symbol code. Total: unknown codes become `Generic`.
pub fn classify(symbol_code: &str, is_night: bool) -> IconCategory {
    match BaseSymbol::parse(strip_qualifier(symbol_code)) {
        Some(base) => base.icon(is_night),
        None => IconCategory::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_base_symbol_maps_to_documented_category() {
        let table = [
            ("clearsky", IconCategory::ClearDay),
            ("fair", IconCategory::PartlyCloudyDay),
            ("partlycloudy", IconCategory::PartlyCloudyDay),
            ("cloudy", IconCategory::Cloudy),
            ("lightrain", IconCategory::LightRain),
            ("lightrainshowers", IconCategory::LightRain),
            ("rainshowers", IconCategory::LightRain),
            ("rain", IconCategory::HeavyRain),
            ("heavyrain", IconCategory::HeavyRain),
            ("heavyrainshowers", IconCategory::HeavyRain),
            ("sleet", IconCategory::MixedRainSnow),
            ("sleetshowers", IconCategory::MixedRainSnow),
            ("snow", IconCategory::HeavySnow),
            ("snowshowers", IconCategory::HeavySnow),
            ("heavysnow", IconCategory::HeavySnow),
            ("heavysnowshowers", IconCategory::HeavySnow),
            ("lightsnow", IconCategory::LightSnow),
            ("lightsnowshowers", IconCategory::LightSnow),
            ("thunder", IconCategory::Thunderstorm),
            ("thunderstorm", IconCategory::Thunderstorm),
        ];

        assert_eq!(table.len(), BaseSymbol::all().len());
        for (code, expected) in table {
            assert_eq!(classify(code, false), expected, "symbol {code}");
        }
    }

    #[test]
    fn night_variants_only_for_clear_and_partly_cloudy() {
        assert_eq!(classify("clearsky_night", true), IconCategory::ClearNight);
        assert_eq!(classify("clearsky_day", false), IconCategory::ClearDay);
        assert_eq!(classify("fair", true), IconCategory::PartlyCloudyNight);
        assert_eq!(classify("partlycloudy_night", true), IconCategory::PartlyCloudyNight);

        assert_eq!(classify("cloudy", true), IconCategory::Cloudy);
        assert_eq!(classify("rainshowers_night", true), IconCategory::LightRain);
    }

    #[test]
    fn unknown_codes_fall_back_to_generic() {
        for code in ["fog", "", "_night", "rainandthunder", "clear sky", "sunny_day"] {
            assert_eq!(classify(code, false), IconCategory::Generic, "symbol {code:?}");
        }
    }

    #[test]
    fn polar_twilight_codes_are_generic() {
        assert_eq!(classify("clearsky_polartwilight", false), IconCategory::Generic);
        assert_eq!(classify("rainshowers_polartwilight", false), IconCategory::Generic);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("HeavyRain", false), IconCategory::HeavyRain);
        assert_eq!(classify("ClearSky_Night", true), IconCategory::ClearNight);
    }

    #[test]
    fn strip_qualifier_only_removes_trailing_qualifier() {
        assert_eq!(strip_qualifier("clearsky_day"), "clearsky");
        assert_eq!(strip_qualifier("fair_night"), "fair");
        assert_eq!(strip_qualifier("lightsnowshowers_polartwilight"), "lightsnowshowers_polartwilight");
        assert_eq!(strip_qualifier("cloudy"), "cloudy");
        assert_eq!(strip_qualifier("day_rain"), "day_rain");
    }

    #[test]
    fn night_flag_is_read_from_unstripped_code() {
        assert!(is_night_symbol("clearsky_night"));
        assert!(!is_night_symbol("clearsky_day"));
        assert!(!is_night_symbol("clearsky"));
        assert!(!is_night_symbol(strip_qualifier("clearsky_night")));
    }

    #[test]
    fn device_codes_are_unique_and_dense() {
        for (idx, icon) in IconCategory::all().iter().enumerate() {
            assert_eq!(icon.device_code() as usize, idx);
        }
    }
}
