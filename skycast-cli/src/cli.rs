use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use skycast_core::{Activity, Config, ConfigFile, WeatherError, WeatherService, format};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather tools backed by OpenWeatherMap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key in the local configuration file.
    Configure,

    /// Current weather conditions for a city, with temperature, humidity,
    /// wind and more.
    Current {
        /// City name, e.g. "London" or "New York".
        city: String,

        /// Optional country code for more precise results, e.g. "US" or "GB".
        #[arg(long)]
        country: Option<String>,
    },

    /// Current weather conditions at a latitude/longitude pair.
    Locate {
        /// Latitude in degrees, -90 to 90.
        #[arg(value_parser = parse_latitude, allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in degrees, -180 to 180.
        #[arg(value_parser = parse_longitude, allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Weather forecast for a city or a coordinate pair, up to 5 days.
    Forecast {
        /// City name; omit when querying by coordinates.
        city: Option<String>,

        /// Latitude in degrees, -90 to 90.
        #[arg(long, requires = "longitude", conflicts_with = "city",
              value_parser = parse_latitude, allow_negative_numbers = true)]
        latitude: Option<f64>,

        /// Longitude in degrees, -180 to 180.
        #[arg(long, requires = "latitude", conflicts_with = "city",
              value_parser = parse_longitude, allow_negative_numbers = true)]
        longitude: Option<f64>,

        /// Number of days to forecast, 1-5.
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
        days: u8,
    },

    /// Active weather alerts and warnings at a latitude/longitude pair.
    Alerts {
        #[arg(value_parser = parse_latitude, allow_negative_numbers = true)]
        latitude: f64,

        #[arg(value_parser = parse_longitude, allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Air quality, pollutant levels and health advice at a
    /// latitude/longitude pair.
    AirQuality {
        #[arg(value_parser = parse_latitude, allow_negative_numbers = true)]
        latitude: f64,

        #[arg(value_parser = parse_longitude, allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Compare current weather between 2-5 cities.
    Compare {
        /// City names, e.g. `skycast compare London Paris Berlin`.
        #[arg(num_args = 2..=5)]
        cities: Vec<String>,
    },

    /// Historical weather for a city on a date 1-5 days in the past.
    History {
        city: String,

        /// Date in YYYY-MM-DD format.
        date: String,
    },

    /// Current weather with activity-specific recommendations.
    Recommend {
        city: String,

        /// Activity: outdoor, sports, travel, photography or general.
        #[arg(long, default_value = "general")]
        activity: String,
    },

    /// Comprehensive summary: current conditions, 3-day forecast and air
    /// quality.
    Summary {
        city: String,
    },

    /// Current weather (optionally with forecast) as a JSON document.
    Json {
        city: String,

        /// Include 3-day forecast data in the document.
        #[arg(long)]
        include_forecast: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if let Command::Configure = self.command {
            return configure();
        }

        let service = WeatherService::new(Config::resolve())?;
        let today = Utc::now().date_naive();

        match self.command {
            Command::Configure => unreachable!("handled above"),

            Command::Current { city, country } => {
                match service.current_by_city(&city, country.as_deref()).await {
                    Ok(weather) => println!("{}", format::current(&weather)),
                    Err(err) => println!(
                        "{}",
                        failure_message(&err, &format!("weather information for '{city}'"))
                    ),
                }
            }

            Command::Locate {
                latitude,
                longitude,
            } => match service.current_by_coordinates(latitude, longitude).await {
                Ok(weather) => println!("{}", format::current(&weather)),
                Err(err) => println!(
                    "{}",
                    failure_message(
                        &err,
                        &format!("weather information for coordinates {latitude:.4}, {longitude:.4}")
                    )
                ),
            },

            Command::Forecast {
                city,
                latitude,
                longitude,
                days,
            } => {
                let result = match (&city, latitude, longitude) {
                    (Some(city), _, _) => service.forecast_by_city(city, days).await,
                    (None, Some(lat), Some(lon)) => {
                        service.forecast_by_coordinates(lat, lon, days).await
                    }
                    _ => {
                        println!("❌ Provide a city name or a --latitude/--longitude pair.");
                        return Ok(());
                    }
                };

                let target = city.unwrap_or_else(|| "the requested location".to_string());
                match result {
                    Ok(series) => {
                        println!("{}", format::forecast(&series, usize::from(days), today));
                    }
                    Err(err) => println!(
                        "{}",
                        failure_message(&err, &format!("weather forecast for '{target}'"))
                    ),
                }
            }

            Command::Alerts {
                latitude,
                longitude,
            } => match service.alerts(latitude, longitude).await {
                Ok(set) => println!("{}", format::alerts(&set)),
                Err(err) => println!(
                    "{}",
                    failure_message(&err, "weather alerts for the specified location")
                ),
            },

            Command::AirQuality {
                latitude,
                longitude,
            } => match service.air_quality(latitude, longitude).await {
                Ok(snapshot) => println!("{}", format::air_quality(&snapshot)),
                Err(err) => println!(
                    "{}",
                    failure_message(&err, "air quality information for the specified location")
                ),
            },

            Command::Compare { cities } => match service.compare(&cities).await {
                Ok(results) => println!("{}", format::comparison(&results)),
                Err(err) => println!(
                    "{}",
                    failure_message(&err, "weather data for any of the specified cities")
                ),
            },

            Command::History { city, date } => {
                let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
                    println!("❌ Invalid date format. Please use YYYY-MM-DD.");
                    return Ok(());
                };

                match service.historical(&city, date).await {
                    Ok(weather) => println!("{}", format::historical(&weather, date)),
                    Err(err) => println!(
                        "{}",
                        failure_message(
                            &err,
                            &format!("historical weather for '{city}' on {date}")
                        )
                    ),
                }
            }

            Command::Recommend { city, activity } => {
                let activity = Activity::parse(&activity);
                match service.current_by_city(&city, None).await {
                    Ok(weather) => {
                        println!("{}", format::with_recommendations(&weather, activity));
                    }
                    Err(err) => println!(
                        "{}",
                        failure_message(&err, &format!("weather information for '{city}'"))
                    ),
                }
            }

            Command::Summary { city } => match service.summary(&city).await {
                Ok(summary) => println!("{}", format::comprehensive_summary(&summary, today)),
                Err(err) => println!(
                    "{}",
                    failure_message(&err, &format!("weather information for '{city}'"))
                ),
            },

            Command::Json {
                city,
                include_forecast,
            } => match service.current_by_city(&city, None).await {
                Ok(current) => {
                    let forecast = if include_forecast {
                        service.forecast_by_city(&city, 3).await.ok()
                    } else {
                        None
                    };
                    println!("{}", format::to_json(&current, forecast.as_ref())?);
                }
                Err(err) => {
                    println!(
                        "{}",
                        serde_json::json!({
                            "error": failure_message(&err, &format!("weather for '{city}'"))
                        })
                    );
                }
            },
        }

        Ok(())
    }
}

/// Validation errors carry their own explanation; anything upstream becomes
/// a generic "could not retrieve" line so a bad query never looks fatal.
fn failure_message(err: &WeatherError, what: &str) -> String {
    if err.is_validation() {
        format!("❌ {err}.")
    } else {
        tracing::error!(error = %err, "query failed");
        format!("❌ Could not retrieve {what}. Please check the input and try again.")
    }
}

fn parse_latitude(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| format!("'{input}' is not a number"))?;
    if (-90.0..=90.0).contains(&value) {
        Ok(value)
    } else {
        Err("latitude must be between -90 and 90 degrees".to_string())
    }
}

fn parse_longitude(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| format!("'{input}' is not a number"))?;
    if (-180.0..=180.0).contains(&value) {
        Ok(value)
    } else {
        Err("longitude must be between -180 and 180 degrees".to_string())
    }
}

fn configure() -> anyhow::Result<()> {
    let api_key = inquire::Text::new("OpenWeatherMap API key:").prompt()?;

    let file = ConfigFile {
        api_key: Some(api_key.trim().to_string()),
    };
    let path = file.save()?;
    println!("✅ API key saved to {}", path.display());

    Ok(())
}
