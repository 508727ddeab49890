//! Pure conversions from upstream response shapes into domain records.
//!
//! Each function consumes one parsed upstream document and produces exactly
//! one record. Nothing here touches the network or panics on a sparse
//! document.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::WeatherError;
use crate::model::{
    AirQualitySnapshot, Alert, AlertSet, AqiLevel, CurrentConditions, ForecastPoint,
    ForecastSeries, Location, PollutantLevels, Severity,
};
use crate::upstream::{
    OwAirPollutionResponse, OwCurrentResponse, OwForecastResponse, OwOneCallResponse,
    OwTimeMachineResponse, OwWeather,
};

pub fn current_conditions(res: OwCurrentResponse) -> CurrentConditions {
    let (main_condition, description) = primary_condition(&res.weather);

    CurrentConditions {
        location: Location {
            city: res.name,
            country: res.sys.country,
            latitude: Some(res.coord.lat),
            longitude: Some(res.coord.lon),
        },
        temperature: res.main.temp,
        feels_like: res.main.feels_like,
        temp_min: res.main.temp_min,
        temp_max: res.main.temp_max,
        description,
        main_condition,
        humidity: res.main.humidity.min(100),
        pressure: res.main.pressure,
        wind_speed: res.wind.speed,
        wind_direction: res.wind.deg % 360,
        wind_gust: res.wind.gust,
        visibility: res.visibility,
        cloud_cover: res.clouds.all.min(100),
        uv_index: None,
        observed_at: unix_to_utc(res.dt).unwrap_or_else(Utc::now),
        sunrise: res.sys.sunrise.and_then(unix_to_utc),
        sunset: res.sys.sunset.and_then(unix_to_utc),
        timezone: Some(timezone_label(res.timezone)),
    }
}

pub fn forecast_series(res: OwForecastResponse) -> ForecastSeries {
    let location = Location {
        city: res.city.name,
        country: res.city.country,
        latitude: Some(res.city.coord.lat),
        longitude: Some(res.city.coord.lon),
    };

    let points = res
        .list
        .into_iter()
        .map(|entry| {
            let (main_condition, description) = primary_condition(&entry.weather);
            ForecastPoint {
                timestamp: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
                temperature: entry.main.temp,
                feels_like: entry.main.feels_like,
                temp_min: entry.main.temp_min,
                temp_max: entry.main.temp_max,
                description,
                main_condition,
                humidity: entry.main.humidity.min(100),
                pressure: entry.main.pressure,
                wind_speed: entry.wind.speed,
                wind_direction: entry.wind.deg % 360,
                cloud_cover: entry.clouds.all.min(100),
                // Upstream reports a fraction in [0, 1].
                precipitation_probability: Some(entry.pop * 100.0),
                rain_volume: entry.rain.map(|volume| volume.three_h),
                snow_volume: entry.snow.map(|volume| volume.three_h),
            }
        })
        .collect();

    ForecastSeries { location, points }
}

/// Only the first sample of the upstream list is meaningful; an empty list
/// is a mapping failure, not a default snapshot.
pub fn air_quality(
    res: OwAirPollutionResponse,
    location: Location,
) -> Result<AirQualitySnapshot, WeatherError> {
    let entry = res.list.into_iter().next().ok_or_else(|| {
        WeatherError::MalformedResponse("air pollution response contained no samples".to_string())
    })?;

    let index = u8::try_from(entry.main.aqi).unwrap_or(0);
    let level = AqiLevel::from_index(index);

    Ok(AirQualitySnapshot {
        location,
        index,
        level,
        health_recommendation: level.health_recommendation().to_string(),
        pollutants: PollutantLevels {
            co: entry.components.co,
            no: entry.components.no,
            no2: entry.components.no2,
            o3: entry.components.o3,
            so2: entry.components.so2,
            pm2_5: entry.components.pm2_5,
            pm10: entry.components.pm10,
            nh3: entry.components.nh3,
        },
        observed_at: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
    })
}

pub fn alert_set(res: OwOneCallResponse, location: Location) -> AlertSet {
    let alerts = res
        .alerts
        .into_iter()
        .map(|alert| {
            let severity = Severity::from_event(&alert.event);
            let areas = if alert.tags.is_empty() {
                vec![alert.event.clone()]
            } else {
                alert.tags
            };

            Alert {
                severity,
                description: alert.description,
                start: unix_to_utc(alert.start).unwrap_or_else(Utc::now),
                end: unix_to_utc(alert.end).unwrap_or_else(Utc::now),
                source: alert.sender_name,
                areas,
                event: alert.event,
            }
        })
        .collect();

    AlertSet { location, alerts }
}

/// The time-indexed endpoint reports no sunrise/sunset or place name; the
/// record is stamped with the requested date and the caller's city.
pub fn historical_conditions(
    res: OwTimeMachineResponse,
    city: &str,
    date: NaiveDate,
) -> CurrentConditions {
    let point = res.current;
    let (main_condition, description) = primary_condition(&point.weather);

    CurrentConditions {
        location: Location {
            city: city.to_string(),
            country: String::new(),
            latitude: None,
            longitude: None,
        },
        temperature: point.temp,
        feels_like: point.feels_like,
        temp_min: point.temp,
        temp_max: point.temp,
        description,
        main_condition,
        humidity: point.humidity.min(100),
        pressure: point.pressure,
        wind_speed: point.wind_speed,
        wind_direction: point.wind_deg % 360,
        wind_gust: None,
        visibility: point.visibility,
        cloud_cover: point.clouds.min(100),
        uv_index: point.uvi,
        observed_at: date.and_time(NaiveTime::MIN).and_utc(),
        sunrise: None,
        sunset: None,
        timezone: None,
    }
}

/// Condition tag and description from the first entry of the upstream
/// weather list, or the literal "Unknown" when the list is empty.
fn primary_condition(weather: &[OwWeather]) -> (String, String) {
    weather.first().map_or_else(
        || ("Unknown".to_string(), "Unknown".to_string()),
        |w| (w.main.clone(), w.description.clone()),
    )
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Offset in seconds rendered as a signed duration label, e.g. `+02:00`.
fn timezone_label(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let total = offset_seconds.unsigned_abs();
    format!("{sign}{:02}:{:02}", total / 3600, (total % 3600) / 60)
}
