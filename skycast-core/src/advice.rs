//! Qualitative banding and the activity recommendation rules.
//!
//! Each activity category owns an ordered list of independent
//! (predicate, note) rules. Every matching rule contributes its note, in
//! definition order; a category with no match falls back to a single
//! neutral sentence. One generic collector evaluates all categories.

use crate::model::CurrentConditions;

/// Activity category a recommendation is tailored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Outdoor,
    Sports,
    Travel,
    Photography,
    General,
}

impl Activity {
    /// Unrecognized input falls back to the general category.
    pub fn parse(input: &str) -> Self {
        match input.to_lowercase().as_str() {
            "outdoor" => Self::Outdoor,
            "sports" => Self::Sports,
            "travel" => Self::Travel,
            "photography" => Self::Photography,
            _ => Self::General,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Outdoor => "Outdoor",
            Self::Sports => "Sports",
            Self::Travel => "Travel",
            Self::Photography => "Photography",
            Self::General => "General",
        }
    }
}

struct Rule {
    applies: fn(&CurrentConditions) -> bool,
    note: &'static str,
}

static OUTDOOR_RULES: &[Rule] = &[
    Rule {
        applies: |w| w.temperature > 25.0,
        note: "🌞 Great for outdoor activities! Stay hydrated.",
    },
    Rule {
        applies: |w| w.temperature < 5.0,
        note: "🧥 Bundle up warmly for outdoor activities.",
    },
    Rule {
        applies: |w| w.wind_speed > 10.0,
        note: "💨 Windy conditions - secure loose items.",
    },
    Rule {
        applies: |w| w.humidity > 80,
        note: "💦 High humidity - take frequent breaks.",
    },
    Rule {
        applies: |w| w.cloud_cover < 30,
        note: "☀️ Clear skies - perfect for outdoor fun!",
    },
];

static SPORTS_RULES: &[Rule] = &[
    Rule {
        applies: |w| (15.0..=25.0).contains(&w.temperature),
        note: "🏃 Perfect temperature for sports activities!",
    },
    Rule {
        applies: |w| w.temperature > 30.0,
        note: "🥵 Hot weather - exercise early morning or evening.",
    },
    Rule {
        applies: |w| w.wind_speed > 15.0,
        note: "💨 Strong winds may affect ball sports.",
    },
    Rule {
        applies: |w| w.description.to_lowercase().contains("rain"),
        note: "🏠 Consider indoor sports due to rain.",
    },
];

static TRAVEL_RULES: &[Rule] = &[
    Rule {
        applies: |w| w.visibility < 5_000,
        note: "🌫️ Low visibility - drive carefully.",
    },
    Rule {
        applies: |w| w.wind_speed > 20.0,
        note: "✈️ Strong winds may affect flights.",
    },
    Rule {
        applies: |w| w.description.to_lowercase().contains("storm"),
        note: "⛈️ Severe weather - consider delaying travel.",
    },
];

static PHOTOGRAPHY_RULES: &[Rule] = &[
    Rule {
        applies: |w| (50..=80).contains(&w.cloud_cover),
        note: "📸 Great for portrait photography - soft natural light!",
    },
    Rule {
        applies: |w| w.cloud_cover < 20,
        note: "🌅 Perfect for landscape photography during golden hour.",
    },
    Rule {
        applies: |w| w.description.to_lowercase().contains("storm"),
        note: "⚡ Dramatic storm photography opportunities (stay safe!).",
    },
];

static GENERAL_RULES: &[Rule] = &[
    Rule {
        applies: |w| w.temperature < 0.0,
        note: "🧊 Freezing temperatures - watch for ice.",
    },
    Rule {
        applies: |w| w.humidity < 30,
        note: "💧 Low humidity - moisturize skin.",
    },
    Rule {
        applies: |w| w.pressure < 1000.0,
        note: "📉 Low pressure - weather may change soon.",
    },
];

fn ruleset(activity: Activity) -> (&'static [Rule], &'static str) {
    match activity {
        Activity::Outdoor => (OUTDOOR_RULES, "🌤️ Suitable conditions for outdoor activities."),
        Activity::Sports => (SPORTS_RULES, "⚽ Good conditions for sports."),
        Activity::Travel => (TRAVEL_RULES, "🚗 Good conditions for travel."),
        Activity::Photography => (PHOTOGRAPHY_RULES, "📷 Good lighting conditions for photography."),
        Activity::General => (GENERAL_RULES, "🌤️ Pleasant weather conditions."),
    }
}

/// Collect the notes of every matching rule in definition order, or the
/// category's fallback sentence when none match.
pub fn recommendations(weather: &CurrentConditions, activity: Activity) -> String {
    let (rules, fallback) = ruleset(activity);
    let notes: Vec<&str> = rules
        .iter()
        .filter(|rule| (rule.applies)(weather))
        .map(|rule| rule.note)
        .collect();

    if notes.is_empty() {
        fallback.to_string()
    } else {
        notes.join("\n")
    }
}

/// Fixed advisory sentence per UV band.
pub fn uv_advisory(uv_index: f64) -> &'static str {
    if uv_index < 3.0 {
        "☀️ Low UV - Safe for outdoor activities"
    } else if uv_index < 6.0 {
        "⚡ Moderate UV - Use sunscreen"
    } else if uv_index < 8.0 {
        "🔥 High UV - Seek shade during midday"
    } else if uv_index < 11.0 {
        "⚠️ Very High UV - Avoid sun exposure"
    } else {
        "🚨 Extreme UV - Stay indoors"
    }
}

/// Icon and label for a wind-speed band (m/s).
pub fn wind_band(speed: f64) -> (&'static str, &'static str) {
    if speed < 3.0 {
        ("🍃", "calm")
    } else if speed < 8.0 {
        ("💨", "breezy")
    } else if speed < 15.0 {
        ("🌬️", "windy")
    } else {
        ("🌪️", "very windy")
    }
}

/// Icon and label for a relative-humidity band (%).
pub fn humidity_band(humidity: u8) -> (&'static str, &'static str) {
    if humidity < 30 {
        ("🏜️", "dry")
    } else if humidity < 60 {
        ("🌤️", "comfortable")
    } else if humidity < 80 {
        ("💧", "humid")
    } else {
        ("💦", "very humid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::model::Location;

    fn weather() -> CurrentConditions {
        CurrentConditions {
            location: Location::default(),
            temperature: 18.0,
            feels_like: 18.0,
            temp_min: 15.0,
            temp_max: 20.0,
            description: "scattered clouds".to_string(),
            main_condition: "Clouds".to_string(),
            humidity: 55,
            pressure: 1015.0,
            wind_speed: 4.0,
            wind_direction: 90,
            wind_gust: None,
            visibility: 10_000,
            cloud_cover: 45,
            uv_index: None,
            observed_at: Utc::now(),
            sunrise: None,
            sunset: None,
            timezone: None,
        }
    }

    #[test]
    fn all_matching_rules_concatenate_in_order() {
        let mut w = weather();
        w.temperature = 28.0;
        w.wind_speed = 12.0;
        w.cloud_cover = 10;

        let text = recommendations(&w, Activity::Outdoor);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Stay hydrated"));
        assert!(lines[1].contains("secure loose items"));
        assert!(lines[2].contains("Clear skies"));
    }

    #[test]
    fn no_match_returns_single_fallback() {
        let mut w = weather();
        w.cloud_cover = 40;
        assert_eq!(
            recommendations(&w, Activity::Outdoor),
            "🌤️ Suitable conditions for outdoor activities."
        );
    }

    #[test]
    fn sports_rules_react_to_rain_description() {
        let mut w = weather();
        w.description = "Light Rain".to_string();
        let text = recommendations(&w, Activity::Sports);
        assert!(text.contains("indoor sports"));
        // 18 °C also sits in the positive band.
        assert!(text.contains("Perfect temperature"));
    }

    #[test]
    fn unknown_activity_falls_back_to_general() {
        assert_eq!(Activity::parse("gardening"), Activity::General);
        assert_eq!(Activity::parse("PHOTOGRAPHY"), Activity::Photography);
    }

    #[test]
    fn uv_bands_have_fixed_boundaries() {
        assert!(uv_advisory(0.0).contains("Low UV"));
        assert!(uv_advisory(2.9).contains("Low UV"));
        assert!(uv_advisory(3.0).contains("Moderate UV"));
        assert!(uv_advisory(6.0).contains("High UV"));
        assert!(uv_advisory(7.9).contains("High UV"));
        assert!(uv_advisory(8.0).contains("Very High UV"));
        assert!(uv_advisory(11.0).contains("Extreme UV"));
    }

    #[test]
    fn wind_and_humidity_bands_are_distinct() {
        assert_eq!(wind_band(1.0).1, "calm");
        assert_eq!(wind_band(7.9).1, "breezy");
        assert_eq!(wind_band(14.9).1, "windy");
        assert_eq!(wind_band(15.0).1, "very windy");

        assert_eq!(humidity_band(10).1, "dry");
        assert_eq!(humidity_band(59).1, "comfortable");
        assert_eq!(humidity_band(79).1, "humid");
        assert_eq!(humidity_band(80).1, "very humid");
    }
}
