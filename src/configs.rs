pub mod anthropic;
pub mod base;
pub mod weather;

pub use anthropic::AnthropicProviderConfig;
pub use base::EnvConfig;
pub use weather::WeatherConfig;
