use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::Endpoints;
use crate::constants::CURRENT_FIELDS;
use crate::error::WeatherError;
use crate::formatters::format_report;
use crate::models::{CurrentConditions, ForecastResponse, GeocodingResponse, ResolvedLocation};

/// How a free-form location string is resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationQuery<'a> {
    Coordinates { latitude: f64, longitude: f64 },
    Place(&'a str),
}

impl<'a> LocationQuery<'a> {
    /// A comma with no whitespace is tried as `lat,lon` first; anything that
    /// fails to parse is geocoded as written.
    pub fn classify(input: &'a str) -> Self {
        if !input.contains(',') || input.chars().any(char::is_whitespace) {
            return Self::Place(input);
        }

        let mut parts = input.split(',');
        let coordinates = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => lat.parse::<f64>().ok().zip(lon.parse::<f64>().ok()),
            _ => None,
        };

        match coordinates {
            Some((latitude, longitude)) => Self::Coordinates {
                latitude,
                longitude,
            },
            None => Self::Place(input),
        }
    }
}

/// Resolves locations and renders current-conditions reports
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    client: Arc<Client>,
    geocoding_base: String,
    forecast_base: String,
}

impl WeatherLookup {
    pub fn new(client: Arc<Client>, endpoints: &Endpoints) -> Self {
        Self {
            client,
            geocoding_base: endpoints.geocoding.clone(),
            forecast_base: endpoints.forecast.clone(),
        }
    }

    /// Looks up current weather for a place name or `lat,lon` pair.
    ///
    /// Failures come back as a marker-prefixed message rather than an error.
    pub async fn get_weather(&self, location: &str) -> String {
        tracing::info!("Getting weather for location: {}", location);

        match self.lookup(location).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Weather lookup for '{}' failed: {}", location, e);
                e.render()
            }
        }
    }

    async fn lookup(&self, location: &str) -> Result<String, WeatherError> {
        let resolved = match LocationQuery::classify(location) {
            LocationQuery::Coordinates {
                latitude,
                longitude,
            } => ResolvedLocation::from_coordinates(latitude, longitude),
            LocationQuery::Place(name) => self.geocode(name).await?,
        };

        let current = self
            .fetch_forecast(resolved.latitude, resolved.longitude)
            .await?;

        Ok(format_report(&resolved, &current))
    }

    /// Resolves a place name to its single best match
    pub async fn geocode(&self, name: &str) -> Result<ResolvedLocation, WeatherError> {
        let url = format!("{}/search", self.geocoding_base);
        let query = [
            ("name", name),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ];

        let response = self
            .make_request::<GeocodingResponse>(&url, &query)
            .await
            .map_err(WeatherError::GeocodingFailed)?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(name.to_string()))?;

        tracing::debug!(
            "Geocoded '{}' to {}, {}",
            name,
            result.latitude,
            result.longitude
        );

        Ok(ResolvedLocation::from_geocoding(name, result))
    }

    /// Fetches present-moment conditions in metric units
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/forecast", self.forecast_base);
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let query = [
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", CURRENT_FIELDS),
            ("temperature_unit", "celsius"),
            ("wind_speed_unit", "ms"),
            ("timezone", "auto"),
        ];

        let forecast = self
            .make_request::<ForecastResponse>(&url, &query)
            .await
            .map_err(|e| {
                if e.is_decode() {
                    WeatherError::DataParsing(e.to_string())
                } else if e.is_builder() {
                    WeatherError::Unexpected(e.to_string())
                } else {
                    WeatherError::WeatherFetchFailed(e)
                }
            })?;

        Ok(forecast.current)
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> reqwest::Result<T> {
        tracing::debug!("GET {}", url);

        self.client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lookup_for(server: &MockServer) -> WeatherLookup {
        let endpoints = Endpoints {
            geocoding: format!("{}/geo", server.uri()),
            forecast: format!("{}/wx", server.uri()),
            search: server.uri(),
        };
        WeatherLookup::new(Arc::new(Client::new()), &endpoints)
    }

    fn forecast_body() -> serde_json::Value {
        json!({
            "latitude": 52.52,
            "longitude": 13.41,
            "current": {
                "temperature_2m": 18.5,
                "apparent_temperature": 17.2,
                "relative_humidity_2m": 60,
                "weather_code": 3,
                "wind_speed_10m": 4.1,
                "wind_direction_10m": 270,
                "is_day": 1,
                "precipitation": 0.2
            }
        })
    }

    async fn mount_geocoding(server: &MockServer, body: serde_json::Value, expected: u64) {
        Mock::given(method("GET"))
            .and(path("/geo/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected)
            .mount(server)
            .await;
    }

    #[test]
    fn test_classify_coordinates() {
        assert_eq!(
            LocationQuery::classify("52.52,13.41"),
            LocationQuery::Coordinates {
                latitude: 52.52,
                longitude: 13.41
            }
        );
        assert_eq!(
            LocationQuery::classify("-33.87,151.21"),
            LocationQuery::Coordinates {
                latitude: -33.87,
                longitude: 151.21
            }
        );
    }

    #[test]
    fn test_classify_place_names() {
        assert_eq!(LocationQuery::classify("Tokyo"), LocationQuery::Place("Tokyo"));
        assert_eq!(
            LocationQuery::classify("Paris,France"),
            LocationQuery::Place("Paris,France")
        );
        assert_eq!(
            LocationQuery::classify("52.52, 13.41"),
            LocationQuery::Place("52.52, 13.41")
        );
        assert_eq!(LocationQuery::classify("1,2,3"), LocationQuery::Place("1,2,3"));
        assert_eq!(LocationQuery::classify("1,"), LocationQuery::Place("1,"));
    }

    #[tokio::test]
    async fn test_coordinates_skip_geocoding() {
        let server = MockServer::start().await;
        mount_geocoding(&server, json!({ "results": [] }), 0).await;

        Mock::given(method("GET"))
            .and(path("/wx/forecast"))
            .and(query_param("latitude", "52.52"))
            .and(query_param("longitude", "13.41"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("52.52,13.41").await;
        assert!(report.contains("Weather in 52.52°N, 13.41°E, Coordinates:"));
        assert!(report.contains("• Condition: Overcast"));
    }

    #[tokio::test]
    async fn test_place_name_full_report() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/search"))
            .and(query_param("name", "Berlin"))
            .and(query_param("count", "1"))
            .and(query_param("language", "en"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "name": "Berlin",
                    "country": "Germany",
                    "admin1": "Land Berlin",
                    "latitude": 52.52,
                    "longitude": 13.41
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/wx/forecast"))
            .and(query_param("current", CURRENT_FIELDS))
            .and(query_param("temperature_unit", "celsius"))
            .and(query_param("wind_speed_unit", "ms"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("Berlin").await;
        let expected = [
            "\u{1f324}\u{fe0f} Weather in Berlin, Land Berlin, Germany:",
            "• Condition: Overcast",
            "• Temperature: 18.5°C",
            "• Feels like: 17.2°C",
            "• Humidity: 60%",
            "• Wind: 4.1 m/s",
            "• Precipitation: 0.2 mm",
            "• Time: Day",
        ]
        .join("\n");
        assert_eq!(report, expected);
    }

    #[tokio::test]
    async fn test_unparseable_coordinates_fall_back_to_geocoding() {
        let server = MockServer::start().await;
        mount_geocoding(
            &server,
            json!({
                "results": [{
                    "name": "Paris",
                    "country": "France",
                    "latitude": 48.85,
                    "longitude": 2.35
                }]
            }),
            1,
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/wx/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("Paris,France").await;
        assert!(report.contains("Weather in Paris, France:"));
    }

    #[tokio::test]
    async fn test_location_not_found() {
        let server = MockServer::start().await;
        mount_geocoding(&server, json!({ "generationtime_ms": 0.5 }), 1).await;

        let report = lookup_for(&server).get_weather("Nowhereville").await;
        assert_eq!(
            report,
            "\u{274c} Geocoding failed: Location 'Nowhereville' not found"
        );
    }

    #[tokio::test]
    async fn test_missing_wind_speed_renders_not_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wx/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": {
                    "temperature_2m": 10.0,
                    "weather_code": 61
                }
            })))
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("1.5,2.5").await;
        assert!(report.contains("• Wind: N/A m/s"));
        assert!(report.contains("• Temperature: 10.0°C"));
        assert!(report.contains("• Condition: Slight rain"));
        assert!(!report.contains("Time:"));
    }

    #[tokio::test]
    async fn test_unmapped_weather_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wx/forecast"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "current": { "weather_code": 1234 } })),
            )
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("0,0").await;
        assert!(report.contains("• Condition: Unknown conditions"));
    }

    #[tokio::test]
    async fn test_geocoding_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("London").await;
        assert!(report.starts_with("\u{274c} Geocoding failed:"));
    }

    #[tokio::test]
    async fn test_forecast_http_failure_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wx/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("10,20").await;
        assert!(report.starts_with("\u{1f310} Network error: Weather API failed:"));
    }

    #[tokio::test]
    async fn test_malformed_forecast_is_parsing_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wx/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "current": "not an object" })),
            )
            .mount(&server)
            .await;

        let report = lookup_for(&server).get_weather("10,20").await;
        assert!(report.starts_with("\u{1f4ca} Data parsing error:"));
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_unexpected_error() {
        let endpoints = Endpoints {
            geocoding: "not a url".to_string(),
            forecast: "not a url".to_string(),
            search: "not a url".to_string(),
        };
        let lookup = WeatherLookup::new(Arc::new(Client::new()), &endpoints);

        let report = lookup.get_weather("10,20").await;
        assert!(report.starts_with("\u{26a0}\u{fe0f} Unexpected error:"));
    }
}
