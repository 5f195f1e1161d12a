//! Layered service configuration shared by every service in the workspace.
//!
//! Values come from an optional `configuration` file, overridden by
//! environment variables under a per-service prefix (`LEASE__PORT` for the
//! lease service). Service crates wrap this as their `common` section and
//! layer their own settings on top.

use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Listen port used when nothing is configured. Port 0 asks the OS for a
/// random port, which test harnesses rely on.
pub const DEFAULT_PORT: u16 = 3005;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Load with the service's environment prefix, e.g. `LEASE`.
    pub fn load(env_prefix: &str) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
