use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, match scores persist in PostgreSQL instead of process memory.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub match_default_limit: usize,
    pub match_max_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            match_default_limit: 10,
            match_max_limit: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: parse_env("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            match_default_limit: parse_env("MATCH_DEFAULT_LIMIT", defaults.match_default_limit)
                .context("MATCH_DEFAULT_LIMIT must be a non-negative integer")?,
            match_max_limit: parse_env("MATCH_MAX_LIMIT", defaults.match_max_limit)
                .context("MATCH_MAX_LIMIT must be a non-negative integer")?,
        })
    }

    /// Resolves the `limit` query parameter of the ranking endpoints.
    pub fn match_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.match_default_limit)
            .min(self.match_max_limit)
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}
