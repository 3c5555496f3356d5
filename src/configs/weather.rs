use super::base::EnvConfig;
use anyhow::Result;
use std::time::Duration;

pub const METAR_HOST: &str = "https://echo.2fsk.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub host: String,
    pub timeout: Duration,
}

impl WeatherConfig {
    pub fn new(host: String) -> Self {
        Self {
            host,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::new(METAR_HOST.to_string())
    }
}

impl EnvConfig for WeatherConfig {
    fn from_env() -> Result<Self> {
        let host = Self::get_env("METAR_HOST", false, Some(METAR_HOST.to_string()))?
            .unwrap_or_else(|| METAR_HOST.to_string());
        let timeout = Self::get_env_timeout("METAR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self { host, timeout })
    }
}
