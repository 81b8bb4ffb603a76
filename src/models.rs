use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Open-Meteo Geocoding API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    /// Omitted entirely by the API when nothing matches
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: Option<String>,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

// ============================================================================
// Open-Meteo Forecast API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: CurrentConditions,
}

/// Present-moment measurements, kept as the API sent them.
///
/// Measurements treat `null` as absent. `weather_code` and `is_day` keep a
/// present `null` as `Some(Value::Null)`, since it reads differently from a
/// missing key.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<Value>,
    pub apparent_temperature: Option<Value>,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub weather_code: Option<Value>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Option<Value>,
    pub precipitation: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub is_day: Option<Value>,
}

impl CurrentConditions {
    /// WMO code used for the table lookup. A missing key reads as 0;
    /// integral floats and booleans are accepted, anything else has no code.
    pub fn wmo_code(&self) -> Option<i64> {
        match &self.weather_code {
            None => Some(0),
            Some(Value::Bool(flag)) => Some(i64::from(*flag)),
            Some(Value::Number(n)) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Some(_) => None,
        }
    }

    /// Day/night flag, `None` when the key is missing
    pub fn is_daytime(&self) -> Option<bool> {
        self.is_day.as_ref().map(|flag| match flag {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        })
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

// ============================================================================
// Tavily Search API Models
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TavilySearchRequest<'a> {
    pub query: &'a str,
    pub max_results: usize,
}

#[derive(Debug, Deserialize)]
pub struct TavilySearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

// ============================================================================
// Resolved Domain Models
// ============================================================================

/// A geographic point with the labels used in the report header
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub country: String,
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    /// Builds a location straight from literal coordinates
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            name: format!("{:.2}\u{00b0}N, {:.2}\u{00b0}E", latitude, longitude),
            country: "Coordinates".to_string(),
            admin1: None,
            latitude,
            longitude,
        }
    }

    /// Builds a location from a geocoding hit, filling the gaps the API leaves
    pub fn from_geocoding(query: &str, result: GeocodingResult) -> Self {
        Self {
            name: result.name.unwrap_or_else(|| query.to_string()),
            country: result.country.unwrap_or_else(|| "Unknown".to_string()),
            admin1: result.admin1.filter(|region| !region.is_empty()),
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ArithmeticRequest {
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    /// City name or coordinates (e.g., "New York", "Tokyo", "52.52,13.41")
    pub location: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct WebSearchRequest {
    /// Search query
    pub query: String,
}
