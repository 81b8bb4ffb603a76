use serde_json::Value;

use crate::models::{CurrentConditions, ResolvedLocation};

const NOT_AVAILABLE: &str = "N/A";

/// Formats current conditions into a human-readable weather report
pub fn format_report(location: &ResolvedLocation, current: &CurrentConditions) -> String {
    let condition = current
        .wmo_code()
        .and_then(weather_code_to_description)
        .unwrap_or("Unknown conditions");

    let mut lines = vec![
        format!("\u{1f324}\u{fe0f} Weather in {}:", location_label(location)),
        format!("\u{2022} Condition: {}", condition),
        format!("\u{2022} Temperature: {}\u{00b0}C", measurement(current.temperature.as_ref())),
        format!("\u{2022} Feels like: {}\u{00b0}C", measurement(current.apparent_temperature.as_ref())),
        format!("\u{2022} Humidity: {}%", measurement(current.relative_humidity.as_ref())),
        format!("\u{2022} Wind: {} m/s", measurement(current.wind_speed.as_ref())),
        format!("\u{2022} Precipitation: {} mm", measurement(current.precipitation.as_ref())),
    ];

    if let Some(is_day) = current.is_daytime() {
        let time = if is_day { "Day" } else { "Night" };
        lines.push(format!("\u{2022} Time: {}", time));
    }

    lines.join("\n")
}

/// Header label: name, then region, then country unless it is the placeholder
fn location_label(location: &ResolvedLocation) -> String {
    let mut label = location.name.clone();
    if let Some(region) = &location.admin1 {
        label.push_str(&format!(", {}", region));
    }
    if !location.country.is_empty() && location.country != "Unknown" {
        label.push_str(&format!(", {}", location.country));
    }
    label
}

/// Renders a measurement the way the API wrote it, so `10.0` stays `10.0`
fn measurement(value: Option<&Value>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Converts WMO weather code to human-readable description
pub fn weather_code_to_description(code: i64) -> Option<&'static str> {
    let description = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => return None,
    };
    Some(description)
}
