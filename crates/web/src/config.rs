use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Unset selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a number")?,
            None => DEFAULT_PORT,
        };
        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections,
            api_keys: lookup("API_KEYS").unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
