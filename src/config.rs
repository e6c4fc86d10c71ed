use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

const DEFAULT_PORT: &str = "3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://jobs.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let server_address = match env::var("SERVER_ADDRESS") {
            Ok(address) => address,
            Err(_) => format!("0.0.0.0:{}", get_env_or("PORT", DEFAULT_PORT)),
        };

        Ok(Self {
            server_address,
            database_url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            database_max_connections: get_env_parse_or(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
        })
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
