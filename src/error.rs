use rmcp::ErrorData as McpError;

/// Arithmetic tool errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("Cannot divide by zero")]
    DivisionByZero,
}

/// Weather pipeline errors. Never leave `get_weather`; each one is rendered
/// into a prefixed message instead.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Location '{0}' not found")]
    LocationNotFound(String),
    #[error("Geocoding failed: {0}")]
    GeocodingFailed(#[source] reqwest::Error),
    #[error("Weather API failed: {0}")]
    WeatherFetchFailed(#[source] reqwest::Error),
    #[error("{0}")]
    DataParsing(String),
    #[error("{0}")]
    Unexpected(String),
}

impl WeatherError {
    /// Marker glyph that prefixes the rendered message
    pub fn marker(&self) -> &'static str {
        match self {
            Self::LocationNotFound(_) | Self::GeocodingFailed(_) => "\u{274c}",
            Self::WeatherFetchFailed(_) => "\u{1f310}",
            Self::DataParsing(_) => "\u{1f4ca}",
            Self::Unexpected(_) => "\u{26a0}\u{fe0f}",
        }
    }

    /// Renders the error as the text returned to the caller
    pub fn render(&self) -> String {
        match self {
            // Not-found surfaces from the geocoding step and reads as such
            Self::LocationNotFound(_) => format!("{} Geocoding failed: {}", self.marker(), self),
            Self::GeocodingFailed(_) => format!("{} {}", self.marker(), self),
            Self::WeatherFetchFailed(_) => format!("{} Network error: {}", self.marker(), self),
            Self::DataParsing(_) => format!("{} Data parsing error: {}", self.marker(), self),
            Self::Unexpected(_) => format!("{} Unexpected error: {}", self.marker(), self),
        }
    }
}

/// Web search errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Errors raised while dispatching a registered tool
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("Failed to encode tool output: {0}")]
    Output(#[source] serde_json::Error),
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Search(_) | ToolError::Output(_) => {
                McpError::internal_error(err.to_string(), None)
            }
            _ => McpError::invalid_params(err.to_string(), None),
        }
    }
}
