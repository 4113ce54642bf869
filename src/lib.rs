pub mod api;
pub mod config;
pub mod platform;
pub mod provisioning;

use anyhow::{Context, Result};
use config::Config;
use std::sync::Arc;

use crate::platform::SupabaseClient;
use crate::provisioning::Provisioner;

pub struct AppState {
    pub config: Config,
    pub provisioner: Provisioner,
}

impl AppState {
    pub fn new(config: Config, provisioner: Provisioner) -> Self {
        Self {
            config,
            provisioner,
        }
    }

    /// Wire the platform HTTP client into a provisioner using `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = Arc::new(
            SupabaseClient::new(&config.platform).context("Failed to build platform HTTP client")?,
        );
        let provisioner = Provisioner::new(
            client.clone(),
            client,
            config.platform.profiles_table.clone(),
        );
        Ok(Self::new(config, provisioner))
    }
}
