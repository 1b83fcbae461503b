use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Page holding the standings table.
    pub standings_url: String,
    /// Base used to absolutize team links found in the table.
    pub standings_base_url: String,
    pub youtube_api_key: Option<String>,
    pub youtube_playlist_id: Option<String>,
    pub youtube_api_base_url: String,
    pub highlights_default_limit: u32,
    pub highlights_default_days: u32,
    /// Upper bound for automatic window expansion in a pagination session.
    pub highlights_max_window_days: u32,
    /// Highlights endpoint the CLI session talks to.
    pub highlights_endpoint: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("standings_url", &self.standings_url)
            .field("standings_base_url", &self.standings_base_url)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_playlist_id", &self.youtube_playlist_id)
            .field("youtube_api_base_url", &self.youtube_api_base_url)
            .field("highlights_default_limit", &self.highlights_default_limit)
            .field("highlights_default_days", &self.highlights_default_days)
            .field(
                "highlights_max_window_days",
                &self.highlights_max_window_days,
            )
            .field("highlights_endpoint", &self.highlights_endpoint)
            .finish()
    }
}
