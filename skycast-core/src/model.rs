use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Place a record refers to. Coordinates are present when the upstream
/// response carried them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    /// Label for a location known only by its coordinates.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            city: format!("{latitude:.4}, {longitude:.4}"),
            country: String::new(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

/// Normalized observation of current (or historical) conditions.
///
/// Sunrise/sunset and the timezone label are absent for historical records,
/// which the time-indexed upstream endpoint does not report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub location: Location,
    /// Air temperature, °C.
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Free-text description, e.g. "light rain".
    pub description: String,
    /// Coarse condition tag, e.g. "Rain", "Clear".
    pub main_condition: String,
    /// Relative humidity, 0-100 %.
    pub humidity: u8,
    /// Atmospheric pressure, hPa.
    pub pressure: f64,
    /// Wind speed, m/s.
    pub wind_speed: f64,
    /// Wind direction, degrees in [0, 360).
    pub wind_direction: u16,
    pub wind_gust: Option<f64>,
    /// Visibility, meters.
    pub visibility: u32,
    /// Cloud cover, 0-100 %.
    pub cloud_cover: u8,
    pub uv_index: Option<f64>,
    pub observed_at: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// Signed offset label, e.g. "+02:00".
    pub timezone: Option<String>,
}

/// One 3-hour forecast slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub main_condition: String,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub cloud_cover: u8,
    /// Chance of precipitation, 0-100 %.
    pub precipitation_probability: Option<f64>,
    /// Rain volume over the slot, mm.
    pub rain_volume: Option<f64>,
    /// Snow volume over the slot, mm.
    pub snow_volume: Option<f64>,
}

/// Forecast points in the order the upstream returned them
/// (chronological, one per 3-hour slot).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSeries {
    pub location: Location,
    pub points: Vec<ForecastPoint>,
}

/// Qualitative air-quality level derived from the upstream AQI ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    Unknown,
}

impl AqiLevel {
    /// Deterministic mapping from the upstream 1-5 index; anything else is
    /// `Unknown`.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::VeryPoor,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Unknown => "Unknown",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Good => "🟢",
            Self::Fair => "🟡",
            Self::Moderate => "🟠",
            Self::Poor => "🔴",
            Self::VeryPoor => "🟣",
            Self::Unknown => "⚪",
        }
    }

    /// Fixed health-recommendation sentence per level.
    pub fn health_recommendation(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory, enjoy outdoor activities!",
            Self::Fair => "Air quality is acceptable for most people.",
            Self::Moderate => "Sensitive groups should limit prolonged outdoor activities.",
            Self::Poor => "Everyone should limit outdoor activities.",
            Self::VeryPoor => "Avoid outdoor activities and keep windows closed.",
            Self::Unknown => "Unable to provide recommendation.",
        }
    }
}

impl std::fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pollutant concentrations, µg/m³.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantLevels {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualitySnapshot {
    pub location: Location,
    /// Upstream AQI ordinal, 1 (Good) to 5 (Very Poor).
    pub index: u8,
    pub level: AqiLevel,
    pub health_recommendation: String,
    pub pollutants: PollutantLevels,
    pub observed_at: DateTime<Utc>,
}

/// Alert urgency band. Always derived from the event name, never read from
/// the upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Extreme,
}

impl Severity {
    /// Case-insensitive keyword match against the event name; the most
    /// urgent matching band wins ("Tornado Watch" is Extreme, not Medium).
    pub fn from_event(event: &str) -> Self {
        let event = event.to_lowercase();
        if event.contains("tornado") || event.contains("hurricane") {
            Self::Extreme
        } else if event.contains("severe") || event.contains("warning") {
            Self::High
        } else if event.contains("watch") || event.contains("advisory") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Low => "🔵",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Extreme => "🔴",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub event: String,
    pub description: String,
    pub severity: Severity,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Issuing body, e.g. "NWS Philadelphia".
    pub source: String,
    pub areas: Vec<String>,
}

/// Alerts for a location. An empty list is a valid result meaning "no
/// active alerts", distinct from a failed lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSet {
    pub location: Location,
    pub alerts: Vec<Alert>,
}

/// Composition produced by the summary operation. Optional sections are
/// absent when their upstream leg failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub current: CurrentConditions,
    pub forecast: Option<ForecastSeries>,
    pub air_quality: Option<AirQualitySnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_keywords_map_to_bands() {
        assert_eq!(Severity::from_event("Severe Thunderstorm Warning"), Severity::High);
        assert_eq!(Severity::from_event("Flood Warning"), Severity::High);
        assert_eq!(Severity::from_event("Winter Storm Watch"), Severity::Medium);
        assert_eq!(Severity::from_event("Dense Fog Advisory"), Severity::Medium);
        assert_eq!(Severity::from_event("Hurricane Warning"), Severity::Extreme);
        assert_eq!(Severity::from_event("Special Weather Statement"), Severity::Low);
    }

    #[test]
    fn tornado_keyword_outranks_watch() {
        assert_eq!(Severity::from_event("Tornado Watch"), Severity::Extreme);
        assert_eq!(Severity::from_event("TORNADO WARNING"), Severity::Extreme);
    }

    #[test]
    fn aqi_index_pairing_is_stable() {
        let expected = [
            (1, AqiLevel::Good),
            (2, AqiLevel::Fair),
            (3, AqiLevel::Moderate),
            (4, AqiLevel::Poor),
            (5, AqiLevel::VeryPoor),
        ];
        for (index, level) in expected {
            assert_eq!(AqiLevel::from_index(index), level);
            assert!(!level.health_recommendation().is_empty());
        }
    }

    #[test]
    fn aqi_index_out_of_scale_is_unknown() {
        assert_eq!(AqiLevel::from_index(0), AqiLevel::Unknown);
        assert_eq!(AqiLevel::from_index(6), AqiLevel::Unknown);
        assert_eq!(
            AqiLevel::from_index(42).health_recommendation(),
            "Unable to provide recommendation."
        );
    }

    #[test]
    fn coordinate_location_label() {
        let loc = Location::from_coordinates(55.7558, 37.6176);
        assert_eq!(loc.city, "55.7558, 37.6176");
        assert_eq!(loc.latitude, Some(55.7558));
    }
}
