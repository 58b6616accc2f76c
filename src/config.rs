use std::{env, fmt::Display, str::FromStr};

use anyhow::{anyhow, Context};
use tracing::{info, warn};

pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: var("DATABASE_URL"),
            port: try_load("PORT", var("PORT"), 3000)?,
            max_connections: try_load(
                "DATABASE_MAX_CONNECTIONS",
                var("DATABASE_MAX_CONNECTIONS"),
                5,
            )?,
        })
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set to a Postgres instance")
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("invalid {key} value {raw:?}: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let port: u16 = try_load("PORT", None, 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn present_values_are_parsed() {
        let port: u16 = try_load("PORT", Some(" 8080 ".to_string()), 3000).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn invalid_values_are_errors() {
        let result: anyhow::Result<u16> = try_load("PORT", Some("eighty".to_string()), 3000);
        assert!(result.is_err());
    }

    #[test]
    fn database_url_is_required_on_demand() {
        let config = Config {
            database_url: None,
            port: 3000,
            max_connections: 5,
        };
        assert!(config.database_url().is_err());
    }
}
