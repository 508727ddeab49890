//! Query orchestration against the upstream weather API.
//!
//! One service instance owns the shared HTTP client and the resolved
//! configuration. Every operation validates its inputs before the network
//! layer is touched, issues at most the calls its contract names, and maps
//! responses into domain records at the boundary.

use chrono::{NaiveDate, NaiveTime, Utc};
use futures::future;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::WeatherError;
use crate::mapper;
use crate::model::{
    AirQualitySnapshot, AlertSet, CurrentConditions, ForecastSeries, Location, WeatherSummary,
};
use crate::upstream::{
    OwAirPollutionResponse, OwCurrentResponse, OwForecastResponse, OwOneCallResponse,
    OwTimeMachineResponse,
};

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherService {
    http: Client,
    config: Config,
}

impl WeatherService {
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| WeatherError::RequestFailed(err.to_string()))?;

        Ok(Self { http, config })
    }

    pub async fn current_by_city(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<CurrentConditions, WeatherError> {
        let query = city_query(city, country);
        let res: OwCurrentResponse = self.get_json("weather", &[("q", query)]).await?;
        Ok(mapper::current_conditions(res))
    }

    pub async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let res: OwCurrentResponse = self
            .get_json(
                "weather",
                &[("lat", latitude.to_string()), ("lon", longitude.to_string())],
            )
            .await?;
        Ok(mapper::current_conditions(res))
    }

    /// Forecast in 3-hour slots; `days` in 1..=5 requests `days × 8` slots.
    pub async fn forecast_by_city(
        &self,
        city: &str,
        days: u8,
    ) -> Result<ForecastSeries, WeatherError> {
        validate_days(days)?;

        let query = city_query(city, None);
        let res: OwForecastResponse = self
            .get_json(
                "forecast",
                &[("q", query), ("cnt", (u16::from(days) * 8).to_string())],
            )
            .await?;
        Ok(mapper::forecast_series(res))
    }

    pub async fn forecast_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<ForecastSeries, WeatherError> {
        validate_coordinates(latitude, longitude)?;
        validate_days(days)?;

        let res: OwForecastResponse = self
            .get_json(
                "forecast",
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("cnt", (u16::from(days) * 8).to_string()),
                ],
            )
            .await?;
        Ok(mapper::forecast_series(res))
    }

    /// An empty alert list is a valid result, distinct from a failed lookup.
    pub async fn alerts(&self, latitude: f64, longitude: f64) -> Result<AlertSet, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let res: OwOneCallResponse = self
            .get_json(
                "onecall",
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("exclude", "minutely,hourly,daily".to_string()),
                ],
            )
            .await?;
        Ok(mapper::alert_set(
            res,
            Location::from_coordinates(latitude, longitude),
        ))
    }

    pub async fn air_quality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirQualitySnapshot, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let res: OwAirPollutionResponse = self
            .get_json(
                "air_pollution",
                &[("lat", latitude.to_string()), ("lon", longitude.to_string())],
            )
            .await?;
        mapper::air_quality(res, Location::from_coordinates(latitude, longitude))
    }

    /// Fetch 2-5 cities concurrently. Individual failures are logged and
    /// dropped; the result keeps the input order and the operation fails
    /// only when every city fails.
    #[instrument(skip(self))]
    pub async fn compare(&self, cities: &[String]) -> Result<Vec<CurrentConditions>, WeatherError> {
        validate_city_count(cities.len())?;

        let fetches = cities.iter().map(|city| self.current_by_city(city, None));
        let settled = future::join_all(fetches).await;

        let mut results = Vec::with_capacity(cities.len());
        for (city, outcome) in cities.iter().zip(settled) {
            match outcome {
                Ok(weather) => results.push(weather),
                Err(err) => warn!(%city, error = %err, "dropping city from comparison"),
            }
        }

        if results.is_empty() {
            return Err(WeatherError::AllCitiesFailed);
        }
        Ok(results)
    }

    /// Two-call flow: resolve the city to coordinates through a current
    /// lookup, then query the time-indexed endpoint for the requested date
    /// (midnight UTC). The date window is checked before any network call.
    #[instrument(skip(self))]
    pub async fn historical(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<CurrentConditions, WeatherError> {
        validate_historical_date(Utc::now().date_naive(), date)?;

        let reference = self.current_by_city(city, None).await?;
        let (latitude, longitude) = reference
            .location
            .latitude
            .zip(reference.location.longitude)
            .ok_or_else(|| {
                WeatherError::MalformedResponse(
                    "current weather response carried no coordinates".to_string(),
                )
            })?;

        let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        let res: OwTimeMachineResponse = self
            .get_json(
                "onecall/timemachine",
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("dt", timestamp.to_string()),
                ],
            )
            .await?;

        Ok(mapper::historical_conditions(res, city, date))
    }

    /// Current conditions plus a 3-day forecast and air quality at the
    /// resolved coordinates. The optional legs degrade to absence on
    /// failure; only the current lookup is required.
    pub async fn summary(&self, city: &str) -> Result<WeatherSummary, WeatherError> {
        let (current, forecast) = future::join(
            self.current_by_city(city, None),
            self.forecast_by_city(city, 3),
        )
        .await;
        let current = current?;

        let forecast = match forecast {
            Ok(series) => Some(series),
            Err(err) => {
                warn!(%city, error = %err, "dropping forecast section from summary");
                None
            }
        };

        let air_quality = match (current.location.latitude, current.location.longitude) {
            (Some(latitude), Some(longitude)) => {
                match self.air_quality(latitude, longitude).await {
                    Ok(snapshot) => Some(snapshot),
                    Err(err) => {
                        warn!(%city, error = %err, "dropping air quality section from summary");
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(WeatherSummary {
            current,
            forecast,
            air_quality,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        debug!(%url, "requesting upstream endpoint");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[
                ("appid", self.config.api_key.as_str()),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await
            .map_err(|err| WeatherError::RequestFailed(err.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| WeatherError::RequestFailed(err.to_string()))?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| WeatherError::MalformedResponse(err.to_string()))
    }
}

fn city_query(city: &str, country: Option<&str>) -> String {
    match country {
        Some(country) if !country.is_empty() => format!("{city},{country}"),
        _ => city.to_string(),
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(WeatherError::InvalidLatitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(WeatherError::InvalidLongitude(longitude));
    }
    Ok(())
}

fn validate_days(days: u8) -> Result<(), WeatherError> {
    if !(1..=5).contains(&days) {
        return Err(WeatherError::InvalidDayCount(days));
    }
    Ok(())
}

fn validate_city_count(count: usize) -> Result<(), WeatherError> {
    if !(2..=5).contains(&count) {
        return Err(WeatherError::InvalidCityCount(count));
    }
    Ok(())
}

fn validate_historical_date(today: NaiveDate, date: NaiveDate) -> Result<(), WeatherError> {
    let days_back = (today - date).num_days();
    if !(1..=5).contains(&days_back) {
        return Err(WeatherError::DateOutOfRange);
    }
    Ok(())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i <= MAX)
            .last()
            .map_or(0, |(i, _)| i);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_outside_ranges_are_rejected() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(matches!(
            validate_coordinates(90.5, 0.0),
            Err(WeatherError::InvalidLatitude(_))
        ));
        assert!(matches!(
            validate_coordinates(0.0, -180.5),
            Err(WeatherError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn day_count_window() {
        assert!(validate_days(1).is_ok());
        assert!(validate_days(5).is_ok());
        assert!(matches!(validate_days(0), Err(WeatherError::InvalidDayCount(0))));
        assert!(matches!(validate_days(6), Err(WeatherError::InvalidDayCount(6))));
    }

    #[test]
    fn city_count_window() {
        assert!(validate_city_count(2).is_ok());
        assert!(validate_city_count(5).is_ok());
        assert!(validate_city_count(1).is_err());
        assert!(validate_city_count(6).is_err());
    }

    #[test]
    fn historical_window_is_one_to_five_days_back() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).expect("valid date");
        let days_ago = |n: i64| today - chrono::Duration::days(n);

        assert!(validate_historical_date(today, days_ago(1)).is_ok());
        assert!(validate_historical_date(today, days_ago(5)).is_ok());
        assert!(validate_historical_date(today, days_ago(0)).is_err());
        assert!(validate_historical_date(today, days_ago(6)).is_err());
        // Future dates are not historical either.
        assert!(validate_historical_date(today, days_ago(-1)).is_err());
    }

    #[test]
    fn city_query_appends_country_hint() {
        assert_eq!(city_query("London", None), "London");
        assert_eq!(city_query("London", Some("GB")), "London,GB");
        assert_eq!(city_query("London", Some("")), "London");
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
