use reqwest::Client;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Number, Value};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{MathError, ToolError};
use crate::math;
use crate::models::{ArithmeticRequest, GetWeatherRequest, WebSearchRequest};
use crate::search::WebSearch;
use crate::weather::WeatherLookup;

type ArithmeticFn = fn(f64, f64) -> Result<f64, MathError>;

/// What a registered tool runs when called
#[derive(Clone)]
pub enum ToolFunction {
    Arithmetic(ArithmeticFn),
    Weather(Arc<WeatherLookup>),
    Search(Arc<WebSearch>),
}

/// Result of a successful tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Number(f64),
    Text(String),
}

impl ToolOutput {
    /// Text content; numbers keep their float form (`8.0`)
    pub fn text(&self) -> String {
        match self {
            Self::Number(value) => {
                Number::from_f64(*value).map_or_else(|| value.to_string(), |n| n.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }

    /// Structured content, only for numeric results
    pub fn structured(&self) -> Option<Value> {
        match self {
            Self::Number(value) => Some(json!({ "result": value })),
            Self::Text(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct ToolEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
    pub function: ToolFunction,
}

/// Tools exposed by a server, in registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
}

impl ToolRegistry {
    /// The plain arithmetic toolset
    pub fn math() -> Self {
        let mut registry = Self::default();
        registry.register_arithmetic("add", "Add two numbers together.", math::add);
        registry.register_arithmetic(
            "subtract",
            "Subtract second number from first number.",
            math::subtract,
        );
        registry.register_arithmetic("multiply", "Multiply two numbers together.", math::multiply);
        registry.register_arithmetic(
            "divide",
            "Divide first number by second number.",
            math::divide,
        );
        registry
    }

    /// Arithmetic, weather and, when an API key is configured, web search
    pub fn agent(config: &Config, client: Arc<Client>) -> Self {
        let mut registry = Self::default();
        registry.register_arithmetic(
            "add",
            "Add two numbers together. Use this for addition operations.",
            math::add,
        );
        registry.register_arithmetic(
            "subtract",
            "Subtract second number from first number. Use this for subtraction operations.",
            math::subtract,
        );
        registry.register_arithmetic(
            "multiply",
            "Multiply two numbers together. Use this for multiplication operations.",
            math::multiply,
        );
        registry.register_arithmetic(
            "divide",
            "Divide first number by second number. Use this for division operations.",
            math::divide,
        );

        registry.register::<GetWeatherRequest>(
            "get_weather",
            "Get current weather conditions for a location. Accepts a city name or \
            coordinates (e.g., \"New York\", \"Tokyo\", \"52.52,13.41\") and returns a \
            formatted weather report or error message.",
            ToolFunction::Weather(Arc::new(WeatherLookup::new(
                client.clone(),
                &config.endpoints,
            ))),
        );

        if let Some(api_key) = &config.tavily_api_key {
            registry.register::<WebSearchRequest>(
                "web_search",
                "Use this tool to search for current events, recent developments, \
                real-time information, or facts that might change over time.",
                ToolFunction::Search(Arc::new(WebSearch::new(
                    client,
                    config.endpoints.search.clone(),
                    api_key.clone(),
                ))),
            );
        } else {
            tracing::info!("TAVILY_API_KEY not set, web search disabled");
        }

        registry
    }

    fn register_arithmetic(
        &mut self,
        name: &'static str,
        description: &'static str,
        function: ArithmeticFn,
    ) {
        self.register::<ArithmeticRequest>(name, description, ToolFunction::Arithmetic(function));
    }

    fn register<T: JsonSchema>(
        &mut self,
        name: &'static str,
        description: &'static str,
        function: ToolFunction,
    ) {
        self.entries.push(ToolEntry {
            name,
            description,
            input_schema: schema_for::<T>(),
            function,
        });
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// MCP descriptors for every registered tool
    pub fn tools(&self) -> Vec<Tool> {
        self.entries
            .iter()
            .map(|entry| Tool::new(entry.name, entry.description, entry.input_schema.clone()))
            .collect()
    }

    /// Runs a tool by name
    pub async fn call(&self, name: &str, arguments: JsonObject) -> Result<ToolOutput, ToolError> {
        let entry = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tracing::info!("Calling tool: {}", name);

        match &entry.function {
            ToolFunction::Arithmetic(function) => {
                let ArithmeticRequest { a, b } = parse_arguments(name, arguments)?;
                Ok(ToolOutput::Number(function(a, b)?))
            }
            ToolFunction::Weather(lookup) => {
                let GetWeatherRequest { location } = parse_arguments(name, arguments)?;
                Ok(ToolOutput::Text(lookup.get_weather(&location).await))
            }
            ToolFunction::Search(search) => {
                let WebSearchRequest { query } = parse_arguments(name, arguments)?;
                let results = search.search(&query).await?;
                serde_json::to_string(&results)
                    .map(ToolOutput::Text)
                    .map_err(ToolError::Output)
            }
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

fn schema_for<T: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(schema)) => Arc::new(schema),
        _ => Arc::new(JsonObject::new()),
    }
}
