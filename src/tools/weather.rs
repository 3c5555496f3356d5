use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::{json, Value};
use tracing::debug;

use super::ToolHandler;
use crate::configs::WeatherConfig;
use crate::errors::{AgentError, AgentResult, ToolError, ToolResult};
use crate::providers::types::tool::Tool;

pub const WEATHER_TOOL_NAME: &str = "get_weather";

/// Live airport weather (METAR) for an ICAO station code
pub struct WeatherTool {
    client: Client,
    host: String,
}

impl WeatherTool {
    pub fn new(config: WeatherConfig) -> AgentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            host: config.host,
        })
    }

    fn metar_url(&self, station: &str) -> ToolResult<Url> {
        let mut url = Url::parse(&self.host)
            .map_err(|e| ToolError::ExecutionError(format!("bad METAR host {}: {}", self.host, e)))?;
        url.path_segments_mut()
            .map_err(|_| ToolError::ExecutionError(format!("bad METAR host {}", self.host)))?
            .pop_if_empty()
            .extend(["v1", "metars", station]);
        Ok(url)
    }

    fn fetch(&self, station: &str) -> ToolResult<Value> {
        let url = self.metar_url(station)?;
        debug!(%url, "fetching METAR");

        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => return Ok(fetch_failed(e)),
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(fetch_failed(format!("HTTP {}", status.as_u16())));
        }

        let body = match response.text() {
            Ok(body) => body,
            Err(e) => return Ok(fetch_failed(e)),
        };
        Ok(serde_json::from_str(&body).unwrap_or_else(|_| fetch_failed("invalid JSON body")))
    }
}

fn fetch_failed(reason: impl std::fmt::Display) -> Value {
    json!({"error": format!("METAR fetch failed: {}", reason)})
}

impl ToolHandler for WeatherTool {
    fn tool(&self) -> Tool {
        Tool::new(
            WEATHER_TOOL_NAME,
            "Get live airport weather (METAR). Returns temp, wind, visibility, clouds, and raw METAR text.",
            json!({
                "type": "object",
                "properties": {
                    "station": {
                        "type": "string",
                        "description": "ICAO airport code, e.g. KJFK, KORD, KLAX, EGLL",
                    },
                },
                "required": ["station"],
            }),
        )
    }

    fn call(&self, input: &Value) -> ToolResult<Value> {
        let station = input
            .get("station")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ToolError::InvalidParameters("'station' must be a non-empty string".to_string())
            })?;

        self.fetch(station)
    }
}
