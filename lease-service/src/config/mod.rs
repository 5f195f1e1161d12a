use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use serde::Deserialize;
use service_core::config::Config as CoreConfig;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct LeaseConfig {
    pub common: CoreConfig,
    pub database: DatabaseConfig,
    pub service_name: String,
    pub log_level: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl LeaseConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let common = CoreConfig::load("LEASE")?;

        let db_url = env::var("LEASE_DATABASE_URL").expect("LEASE_DATABASE_URL must be set");
        let max_connections = env::var("LEASE_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()?;
        let min_connections = env::var("LEASE_DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()?;

        let log_level = env::var("LEASE_LOG_LEVEL")
            .unwrap_or_else(|_| "info,lease_service=debug".to_string());

        Ok(Self {
            common,
            database: DatabaseConfig {
                url: Secret::new(db_url),
                max_connections,
                min_connections,
            },
            service_name: "lease-service".to_string(),
            log_level,
        })
    }
}
