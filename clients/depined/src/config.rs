use anyhow::Result;
use ::config::{Config, File};
use core_logic::config::PollConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DepinedConfig {
    pub base_url: String,
    pub tokens_file: String,
    pub proxy_file: String,
    pub interval_secs: u64,
}

impl DepinedConfig {
    /// Loads the TOML config; a missing file falls back to the defaults,
    /// matching the zero-config behavior of the stock CLI.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("base_url", "https://api.depined.org")?
            .set_default("tokens_file", "tokens.txt")?
            .set_default("proxy_file", "proxy.txt")?
            .set_default("interval_secs", 30_i64)?
            .add_source(File::with_name(path).required(false))
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    pub fn to_poll_config(&self) -> PollConfig {
        PollConfig {
            base_url: self.base_url.clone(),
            interval_secs: self.interval_secs,
        }
    }
}
