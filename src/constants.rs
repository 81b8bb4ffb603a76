/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-toolbox/0.1.0";

/// Open-Meteo geocoding API base URL
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Open-Meteo forecast API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Tavily search API base URL
pub const TAVILY_API_BASE: &str = "https://api.tavily.com";

/// Per-request timeout for every outbound call
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fields requested from the forecast endpoint's `current` block
pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
weather_code,wind_speed_10m,wind_direction_10m,is_day,precipitation";

/// Maximum number of web search results returned to the agent
pub const SEARCH_MAX_RESULTS: usize = 3;
