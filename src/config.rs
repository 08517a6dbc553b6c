use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// User directory service base URL
    #[serde(default = "default_user_service_url")]
    pub user_service_url: String,

    /// Order history service base URL
    #[serde(default = "default_order_service_url")]
    pub order_service_url: String,

    /// Timeout for peer service requests, in seconds
    #[serde(default = "default_peer_timeout_secs")]
    pub peer_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_user_service_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_order_service_url() -> String {
    "http://localhost:8003".to_string()
}

fn default_peer_timeout_secs() -> u64 {
    3
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
