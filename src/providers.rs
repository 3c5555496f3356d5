pub mod anthropic;
pub mod base;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod mock;
