use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub trait EnvConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Helper function to get environment variables with error handling
    fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) if !required => Ok(default),
            Err(env::VarError::NotPresent) => Err(anyhow!(
                "Environment variable '{}' is required but not set.",
                key
            )),
            Err(e) => Err(e).with_context(|| format!("Could not read '{}'", key)),
        }
    }

    /// Parse an optional variable, falling back to `default` when it is unset.
    fn get_env_parsed<T>(key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match Self::get_env(key, false, None)? {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Environment variable '{}' is not valid: {}", key, raw)),
            None => Ok(default),
        }
    }

    fn get_env_timeout(key: &str, default_secs: u64) -> Result<Duration> {
        Self::get_env_parsed(key, default_secs).map(Duration::from_secs)
    }
}
