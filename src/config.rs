use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub tariff: TariffConfig,
    pub predictor: PredictorConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct TariffConfig {
    /// Currency cost per kWh applied when a reading is ingested.
    pub unit_rate: f64,
}

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub command: String,
    pub script: String,
    pub timeout_secs: u64,
}

impl PredictorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let unit_rate = env::var("UNIT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.15);

        let predictor_command =
            env::var("PREDICTOR_COMMAND").unwrap_or_else(|_| "python3".to_string());

        let predictor_script =
            env::var("PREDICTOR_SCRIPT").unwrap_or_else(|_| "ml/predict.py".to_string());

        let predictor_timeout_secs = env::var("PREDICTOR_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Config {
            database: DatabaseConfig {
                url: database_url,
                max_connections: Some(max_connections),
            },
            server: ServerConfig { host, port },
            tariff: TariffConfig { unit_rate },
            predictor: PredictorConfig {
                command: predictor_command,
                script: predictor_script,
                timeout_secs: predictor_timeout_secs,
            },
        })
    }
}
