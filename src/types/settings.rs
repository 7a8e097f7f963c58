use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use serde_valid::Validate;

/// `GET/POST /api/timezone` payload (POSIX TZ string, e.g. "CET-1CEST,M3.5.0,M10.5.0/3")
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimezoneConfig {
    pub timezone: String,
}

/// Display font scale presets - the device sends numeric values (serde_repr)
#[derive(Debug, Clone, Copy, Default, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum FontSizePreset {
    Small = 0,
    #[default]
    Normal = 1,
    Medium = 2,
    Large = 3,
    XLarge = 4,
    XxLarge = 5,
    Huge = 6,
}

/// `GET/POST /api/font-size` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FontSizeConfig {
    pub font_size: FontSizePreset,
}

/// `GET/POST /api/weather/zip-code` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct WeatherZipCode {
    #[validate(max_length = 10)]
    pub zip_code: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// `GET/POST /api/weather/temp-unit` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WeatherTempUnit {
    pub temp_unit: TempUnit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_round_trips_as_number() {
        let config: FontSizeConfig = serde_json::from_str(r#"{"font_size": 3}"#).unwrap();
        assert_eq!(config.font_size, FontSizePreset::Large);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"font_size":3}"#);
    }

    #[test]
    fn temp_unit_uses_lowercase_names() {
        let unit: WeatherTempUnit = serde_json::from_str(r#"{"temp_unit":"fahrenheit"}"#).unwrap();
        assert_eq!(unit.temp_unit, TempUnit::Fahrenheit);
    }
}
