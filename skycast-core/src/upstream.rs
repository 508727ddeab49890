//! Deserialization schemas for the upstream JSON shapes.
//!
//! One struct family per endpoint, parsed exactly once at the mapper
//! boundary. Fields the upstream occasionally omits carry explicit serde
//! defaults so a sparse document never fails the whole query.

use serde::Deserialize;

fn default_visibility() -> u32 {
    10_000
}

#[derive(Debug, Deserialize)]
pub struct OwCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct OwWeather {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct OwWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: u16,
    pub gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OwClouds {
    pub all: u8,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwSys {
    #[serde(default)]
    pub country: String,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// `GET /weather` response.
#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    pub coord: OwCoord,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub main: OwMain,
    #[serde(default = "default_visibility")]
    pub visibility: u32,
    pub wind: OwWind,
    pub clouds: OwClouds,
    pub dt: i64,
    #[serde(default)]
    pub sys: OwSys,
    #[serde(default)]
    pub timezone: i32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct OwVolume {
    #[serde(rename = "3h", default)]
    pub three_h: f64,
}

#[derive(Debug, Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub clouds: OwClouds,
    pub wind: OwWind,
    /// Precipitation probability as a fraction in [0, 1].
    #[serde(default)]
    pub pop: f64,
    pub rain: Option<OwVolume>,
    pub snow: Option<OwVolume>,
}

#[derive(Debug, Deserialize)]
pub struct OwCity {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub coord: OwCoord,
}

/// `GET /forecast` response, one entry per 3-hour slot.
#[derive(Debug, Deserialize)]
pub struct OwForecastResponse {
    pub list: Vec<OwForecastEntry>,
    pub city: OwCity,
}

#[derive(Debug, Deserialize)]
pub struct OwAirMain {
    pub aqi: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwComponents {
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub no: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub o3: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub pm10: f64,
    #[serde(default)]
    pub nh3: f64,
}

#[derive(Debug, Deserialize)]
pub struct OwAirEntry {
    pub main: OwAirMain,
    #[serde(default)]
    pub components: OwComponents,
    pub dt: i64,
}

/// `GET /air_pollution` response.
#[derive(Debug, Deserialize)]
pub struct OwAirPollutionResponse {
    pub list: Vec<OwAirEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OwAlert {
    #[serde(default)]
    pub sender_name: String,
    pub event: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// `GET /onecall` response, reduced to the alert feed.
#[derive(Debug, Deserialize)]
pub struct OwOneCallResponse {
    #[serde(default)]
    pub alerts: Vec<OwAlert>,
}

#[derive(Debug, Deserialize)]
pub struct OwTimePoint {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: u16,
    #[serde(default = "default_visibility")]
    pub visibility: u32,
    pub clouds: u8,
    pub uvi: Option<f64>,
}

/// `GET /onecall/timemachine` response.
#[derive(Debug, Deserialize)]
pub struct OwTimeMachineResponse {
    pub current: OwTimePoint,
}
