use super::base::EnvConfig;
use anyhow::Result;
use std::time::Duration;

pub const ANTHROPIC_HOST: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct AnthropicProviderConfig {
    pub host: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl AnthropicProviderConfig {
    pub fn new(host: String, api_key: String) -> Self {
        Self {
            host,
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl AnthropicProviderConfig {
    /// Everything but the key comes from the environment
    pub fn from_env_with_api_key(api_key: String) -> Result<Self> {
        let host = Self::get_env("ANTHROPIC_HOST", false, Some(ANTHROPIC_HOST.to_string()))?
            .unwrap_or_else(|| ANTHROPIC_HOST.to_string());

        let timeout = Self::get_env_timeout("ANTHROPIC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self::new(host, api_key).with_timeout(timeout))
    }
}

impl EnvConfig for AnthropicProviderConfig {
    fn from_env() -> Result<Self> {
        let api_key = Self::get_env("ANTHROPIC_API_KEY", true, None)?
            .ok_or_else(|| anyhow::anyhow!("Anthropic API key should be present"))?;

        Self::from_env_with_api_key(api_key)
    }
}
