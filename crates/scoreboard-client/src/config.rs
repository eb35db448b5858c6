use serde::Deserialize;

/// Shortest poll interval allowed, in seconds.
pub const MIN_POLL_INTERVAL_SECS: u64 = 5;
/// Longest poll interval allowed, in seconds.
pub const MAX_POLL_INTERVAL_SECS: u64 = 30;

/// Configuration for the API client and leaderboard poller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the scoreboard API, without the `/api` suffix.
    pub base_url: String,
    /// Bearer token restored into the session at startup.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Interval between leaderboard refreshes, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            token: None,
            request_timeout_secs: 10,
            poll_interval_secs: MIN_POLL_INTERVAL_SECS,
        }
    }
}

impl ClientConfig {
    /// Poll interval clamped to the supported range.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(
            self.poll_interval_secs
                .clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS),
        )
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// Problems that make the configuration unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            problems.push(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            ));
        }
        if self.request_timeout_secs == 0 {
            problems.push("request_timeout_secs must be > 0".to_string());
        }
        if self.poll_interval_secs == 0 {
            problems.push("poll_interval_secs must be > 0".to_string());
        }
        problems
    }
}
