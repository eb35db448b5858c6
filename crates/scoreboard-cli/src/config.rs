use serde::Deserialize;

use scoreboard_client::ClientConfig;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "scoreboard.toml";

/// Top-level CLI configuration, loaded from `scoreboard.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub client: ClientConfig,
}

impl CliConfig {
    /// Load config from `path` (or `scoreboard.toml`) if it exists, then
    /// apply env var overrides.
    pub fn load(path: Option<&str>) -> Self {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<CliConfig>(&content) {
                Ok(cfg) => {
                    tracing::debug!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    CliConfig::default()
                },
            },
            Err(_) => {
                tracing::debug!("No {path} found, using defaults");
                CliConfig::default()
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Environment variable overrides. Empty or unparsable values are
    /// ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SCOREBOARD_API_URL")
            && !url.is_empty()
        {
            self.client.base_url = url;
        }
        if let Some(token) = var("SCOREBOARD_TOKEN")
            && !token.is_empty()
        {
            self.client.token = Some(token);
        }
        if let Some(val) = var("SCOREBOARD_POLL_INTERVAL_SECS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.client.poll_interval_secs = n;
        }
        if let Some(val) = var("SCOREBOARD_TIMEOUT_SECS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.client.request_timeout_secs = n;
        }
    }
}
