//! Process configuration read from environment variables.

use std::env;
use std::str::FromStr;

use thiserror::Error;

pub mod game;
pub mod server;

pub use game::GameConfig;
pub use server::ServerConfig;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key}: {detail}")]
    Invalid { key: &'static str, detail: String },
}

/// Source of raw configuration values. The process environment in
/// production, a map in tests.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from `std::env`.
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl<F> ConfigSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Parse `key` if set, otherwise fall back to `default`.
pub(crate) fn parse_or<T, S>(source: &S, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    S: ConfigSource + ?Sized,
{
    match source.get(key) {
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            detail: format!("cannot parse {raw:?}: {err}"),
        }),
        None => Ok(default),
    }
}
