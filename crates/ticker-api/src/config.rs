use anyhow::{Context, Result};
use yahoo_client::YahooConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub yahoo: YahooConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let yahoo_defaults = YahooConfig::default();

        let port = match var("TICKER_API_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("TICKER_API_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("TICKER_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            yahoo: YahooConfig {
                base_url: var("YAHOO_BASE_URL").unwrap_or(yahoo_defaults.base_url),
                cookie_url: yahoo_defaults.cookie_url,
                user_agent: var("YAHOO_USER_AGENT").unwrap_or(yahoo_defaults.user_agent),
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
