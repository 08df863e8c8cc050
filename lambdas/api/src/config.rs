use std::env;

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 8000;

/// Process configuration, read once at startup.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let port = match read("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: read("DATABASE_URL"),
            database_name: read("DATABASE_NAME"),
            port,
        })
    }
}
