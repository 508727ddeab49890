use thiserror::Error;

/// Errors surfaced by the query service.
///
/// Validation variants are produced before any network traffic; the
/// remaining variants describe an upstream call that could not produce a
/// usable response. Callers render the latter as a "could not retrieve"
/// message rather than propagating them.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("latitude must be between -90 and 90 degrees, got {0}")]
    InvalidLatitude(f64),

    #[error("longitude must be between -180 and 180 degrees, got {0}")]
    InvalidLongitude(f64),

    #[error("forecast days must be between 1 and 5, got {0}")]
    InvalidDayCount(u8),

    #[error("between 2 and 5 cities are required for a comparison, got {0}")]
    InvalidCityCount(usize),

    #[error("historical weather is only available for dates 1 to 5 days in the past")]
    DateOutOfRange,

    /// The request never produced a response (connect error, timeout, ...).
    #[error("request to the weather service failed: {0}")]
    RequestFailed(String),

    #[error("weather service returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("failed to parse weather service response: {0}")]
    MalformedResponse(String),

    /// Every city in a comparison failed to resolve.
    #[error("could not retrieve weather data for any of the requested cities")]
    AllCitiesFailed,
}

impl WeatherError {
    /// True for caller-input errors that were rejected before the network
    /// layer was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidLatitude(_)
                | Self::InvalidLongitude(_)
                | Self::InvalidDayCount(_)
                | Self::InvalidCityCount(_)
                | Self::DateOutOfRange
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_split() {
        assert!(WeatherError::InvalidLatitude(91.0).is_validation());
        assert!(WeatherError::DateOutOfRange.is_validation());
        assert!(!WeatherError::RequestFailed("timeout".into()).is_validation());
        assert!(!WeatherError::AllCitiesFailed.is_validation());
    }

    #[test]
    fn messages_name_the_allowed_range() {
        let err = WeatherError::InvalidDayCount(9);
        assert!(err.to_string().contains("between 1 and 5"));

        let err = WeatherError::InvalidCityCount(1);
        assert!(err.to_string().contains("between 2 and 5"));
    }
}
