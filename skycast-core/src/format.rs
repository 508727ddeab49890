//! Rendering of domain records into human-readable text and JSON.
//!
//! Every function here is pure: records in, string out. Sections whose
//! source data is absent are omitted entirely, never rendered as a
//! placeholder.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

use crate::advice::{self, Activity};
use crate::model::{
    AirQualitySnapshot, AlertSet, CurrentConditions, ForecastPoint, ForecastSeries, WeatherSummary,
};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass label for a wind direction in degrees. Inputs outside
/// [0, 360) are normalized first.
pub fn compass(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / 22.5).round() as usize % 16;
    COMPASS_POINTS[index]
}

pub fn current(weather: &CurrentConditions) -> String {
    let location = &weather.location;
    let gust = weather
        .wind_gust
        .map(|gust| format!(" (gusts: {gust:.1} m/s)"))
        .unwrap_or_default();

    let mut out = format!(
        "🌤️ **Current Weather in {}, {}**\n\n",
        location.city, location.country
    );
    out.push_str(&format!(
        "🌡️ **Temperature:** {:.1}°C (feels like {:.1}°C)\n",
        weather.temperature, weather.feels_like
    ));
    out.push_str(&format!(
        "📊 **Range:** {:.1}°C - {:.1}°C\n",
        weather.temp_min, weather.temp_max
    ));
    out.push_str(&format!(
        "☁️ **Conditions:** {}\n\n",
        capitalize_first(&weather.description)
    ));
    out.push_str(&format!(
        "💨 **Wind:** {:.1} m/s ({}){gust}\n",
        weather.wind_speed,
        compass(f64::from(weather.wind_direction))
    ));
    out.push_str(&format!("💧 **Humidity:** {}%\n", weather.humidity));
    out.push_str(&format!("📊 **Pressure:** {:.0} hPa\n", weather.pressure));
    out.push_str(&format!(
        "👁️ **Visibility:** {:.1} km\n",
        f64::from(weather.visibility) / 1000.0
    ));
    out.push_str(&format!("☁️ **Cloud Cover:** {}%\n", weather.cloud_cover));

    if let Some(uv) = weather.uv_index {
        out.push_str(&format!(
            "🔆 **UV Index:** {uv:.1} - {}\n",
            advice::uv_advisory(uv)
        ));
    }

    if let (Some(sunrise), Some(sunset)) = (weather.sunrise, weather.sunset) {
        out.push_str(&format!(
            "\n🌅 **Sunrise:** {} | 🌇 **Sunset:** {}\n",
            sunrise.format("%H:%M"),
            sunset.format("%H:%M")
        ));
    }

    out.push_str(&format!(
        "\n⏰ **Updated:** {} UTC\n",
        weather.observed_at.format("%Y-%m-%d %H:%M")
    ));

    if let (Some(lat), Some(lon)) = (location.latitude, location.longitude) {
        out.push_str(&format!("📍 **Coordinates:** {lat:.4}, {lon:.4}\n"));
    }
    if let Some(timezone) = &weather.timezone {
        out.push_str(&format!("🕒 **Timezone:** UTC{timezone}\n"));
    }

    out
}

/// Per-day aggregate over the 3-hour forecast slots of one calendar date.
#[derive(Debug)]
pub(crate) struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub mean_humidity: f64,
    pub max_wind: f64,
    pub mean_precipitation: f64,
    pub dominant_condition: String,
}

/// Group points by calendar date (in received order) and aggregate each
/// day. The dominant condition is the most frequent main tag, ties going to
/// the first one encountered.
pub(crate) fn summarize_days(points: &[ForecastPoint], days: usize) -> Vec<DailySummary> {
    let mut grouped: Vec<(NaiveDate, Vec<&ForecastPoint>)> = Vec::new();
    for point in points {
        let date = point.timestamp.date_naive();
        match grouped.iter_mut().find(|(day, _)| *day == date) {
            Some((_, slots)) => slots.push(point),
            None => grouped.push((date, vec![point])),
        }
    }

    grouped
        .into_iter()
        .take(days)
        .map(|(date, slots)| {
            let count = slots.len() as f64;
            let temp_min = slots.iter().map(|p| p.temp_min).fold(f64::INFINITY, f64::min);
            let temp_max = slots.iter().map(|p| p.temp_max).fold(f64::NEG_INFINITY, f64::max);
            let mean_humidity = slots.iter().map(|p| f64::from(p.humidity)).sum::<f64>() / count;
            let max_wind = slots.iter().map(|p| p.wind_speed).fold(0.0, f64::max);
            let mean_precipitation = slots
                .iter()
                .map(|p| p.precipitation_probability.unwrap_or(0.0))
                .sum::<f64>()
                / count;

            DailySummary {
                date,
                temp_min,
                temp_max,
                mean_humidity,
                max_wind,
                mean_precipitation,
                dominant_condition: dominant_condition(&slots),
            }
        })
        .collect()
}

fn dominant_condition(slots: &[&ForecastPoint]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for point in slots {
        match counts.iter_mut().find(|(tag, _)| *tag == point.main_condition) {
            Some((_, n)) => *n += 1,
            None => counts.push((&point.main_condition, 1)),
        }
    }

    // Strict comparison keeps the first-encountered tag on ties.
    let mut best: Option<(&str, usize)> = None;
    for (tag, n) in counts {
        if best.is_none_or(|(_, count)| n > count) {
            best = Some((tag, n));
        }
    }

    best.map_or_else(|| "Unknown".to_string(), |(tag, _)| tag.to_string())
}

/// "Today"/"Tomorrow" for the first two calendar days relative to the
/// reference date, otherwise the weekday name.
fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.succ_opt() {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    }
}

pub fn forecast(series: &ForecastSeries, days: usize, today: NaiveDate) -> String {
    let mut out = format!(
        "📅 **{days}-Day Weather Forecast for {}, {}**\n\n",
        series.location.city, series.location.country
    );

    for day in summarize_days(&series.points, days) {
        out.push_str(&format!(
            "**{} ({})**\n",
            day_label(day.date, today),
            day.date.format("%b %d")
        ));
        out.push_str(&format!(
            "🌡️ {:.0}°C - {:.0}°C | ☁️ {}\n",
            day.temp_min, day.temp_max, day.dominant_condition
        ));
        out.push_str(&format!(
            "💧 Humidity: {:.0}% | 💨 Wind: {:.1} m/s\n",
            day.mean_humidity, day.max_wind
        ));
        if day.mean_precipitation > 0.0 {
            out.push_str(&format!("🌧️ Rain chance: {:.0}%\n", day.mean_precipitation));
        }
        out.push('\n');
    }

    out
}

pub fn alerts(set: &AlertSet) -> String {
    if set.alerts.is_empty() {
        return format!("✅ No active weather alerts for {}.", set.location.city);
    }

    let mut out = format!("⚠️ **Weather Alerts for {}**\n\n", set.location.city);
    for alert in &set.alerts {
        out.push_str(&format!(
            "{} **{}** ({})\n",
            alert.severity.icon(),
            alert.event,
            alert.severity
        ));
        out.push_str(&format!(
            "📅 {} - {}\n",
            alert.start.format("%b %d, %H:%M"),
            alert.end.format("%b %d, %H:%M")
        ));
        if !alert.description.is_empty() {
            out.push_str(&format!("📝 {}\n", alert.description));
        }
        out.push_str(&format!("📡 Source: {}\n", alert.source));
        if !alert.areas.is_empty() {
            out.push_str(&format!("📍 Areas: {}\n", alert.areas.join(", ")));
        }
        out.push('\n');
    }

    out
}

pub fn air_quality(snapshot: &AirQualitySnapshot) -> String {
    let pollutants = &snapshot.pollutants;

    let mut out = format!("🌬️ **Air Quality for {}**\n\n", snapshot.location.city);
    out.push_str(&format!(
        "{} **Overall Quality:** {} (AQI: {})\n",
        snapshot.level.icon(),
        snapshot.level,
        snapshot.index
    ));
    out.push_str(&format!(
        "💡 **Health Advice:** {}\n\n",
        snapshot.health_recommendation
    ));
    out.push_str("**Pollutant Levels (µg/m³):**\n");
    out.push_str(&format!(
        "• PM2.5: {:.1} | PM10: {:.1}\n",
        pollutants.pm2_5, pollutants.pm10
    ));
    out.push_str(&format!(
        "• NO₂: {:.1} | O₃: {:.1}\n",
        pollutants.no2, pollutants.o3
    ));
    out.push_str(&format!(
        "• SO₂: {:.1} | CO: {:.1}\n\n",
        pollutants.so2, pollutants.co
    ));
    out.push_str(&format!(
        "⏰ **Measured:** {} UTC\n",
        snapshot.observed_at.format("%Y-%m-%d %H:%M")
    ));

    out
}

/// Comparison rendering: stable descending temperature ranking with medal
/// markers, then wind and humidity bands per city in input order.
pub fn comparison(cities: &[CurrentConditions]) -> String {
    let mut out = String::from("🌍 **Weather Comparison**\n\n");

    let mut ranked: Vec<&CurrentConditions> = cities.iter().collect();
    ranked.sort_by(|a, b| {
        b.temperature
            .partial_cmp(&a.temperature)
            .unwrap_or(Ordering::Equal)
    });

    out.push_str("🌡️ **Temperature Ranking:**\n");
    for (rank, weather) in ranked.iter().enumerate() {
        let medal = match rank {
            0 => "🥇",
            1 => "🥈",
            2 => "🥉",
            _ => "🔹",
        };
        out.push_str(&format!(
            "{medal} {}: {:.1}°C ({})\n",
            weather.location.city, weather.temperature, weather.description
        ));
    }

    out.push_str("\n💨 **Wind Conditions:**\n");
    for weather in cities {
        let (icon, label) = advice::wind_band(weather.wind_speed);
        out.push_str(&format!(
            "{icon} {}: {:.1} m/s ({label})\n",
            weather.location.city, weather.wind_speed
        ));
    }

    out.push_str("\n💧 **Humidity Levels:**\n");
    for weather in cities {
        let (icon, label) = advice::humidity_band(weather.humidity);
        out.push_str(&format!(
            "{icon} {}: {}% ({label})\n",
            weather.location.city, weather.humidity
        ));
    }

    out
}

pub fn historical(weather: &CurrentConditions, date: NaiveDate) -> String {
    let mut out = format!(
        "📊 **Historical Weather for {}**\n",
        weather.location.city
    );
    out.push_str(&format!("📅 **Date:** {}\n\n", date.format("%A, %B %d, %Y")));
    out.push_str(&format!(
        "🌡️ **Temperature:** {:.1}°C (felt like {:.1}°C)\n",
        weather.temperature, weather.feels_like
    ));
    out.push_str(&format!(
        "☁️ **Conditions:** {}\n",
        capitalize_first(&weather.description)
    ));
    out.push_str(&format!(
        "💨 **Wind:** {:.1} m/s ({})\n",
        weather.wind_speed,
        compass(f64::from(weather.wind_direction))
    ));
    out.push_str(&format!("💧 **Humidity:** {}%\n", weather.humidity));
    out.push_str(&format!("📊 **Pressure:** {:.0} hPa\n", weather.pressure));
    out.push_str(&format!("☁️ **Cloud Cover:** {}%\n", weather.cloud_cover));
    if let Some(uv) = weather.uv_index {
        out.push_str(&format!("🔆 **UV Index:** {uv:.1}\n"));
    }

    out
}

pub fn with_recommendations(weather: &CurrentConditions, activity: Activity) -> String {
    format!(
        "{}\n🎯 **{} Recommendations:**\n{}\n",
        current(weather),
        activity.label(),
        advice::recommendations(weather, activity)
    )
}

/// Current conditions plus whichever optional sections the summary query
/// managed to fetch.
pub fn comprehensive_summary(summary: &WeatherSummary, today: NaiveDate) -> String {
    let mut out = String::from("📋 **Comprehensive Weather Summary**\n\n");
    out.push_str(&current(&summary.current));

    if let Some(series) = &summary.forecast {
        out.push('\n');
        out.push_str(&forecast(series, 3, today));
    }

    if let Some(snapshot) = &summary.air_quality {
        out.push('\n');
        out.push_str(&air_quality(snapshot));
    }

    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeatherDocument<'a> {
    current: &'a CurrentConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast: Option<&'a ForecastSeries>,
}

/// Structured JSON document for downstream consumers.
pub fn to_json(
    current: &CurrentConditions,
    forecast: Option<&ForecastSeries>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&WeatherDocument { current, forecast })
}

fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
