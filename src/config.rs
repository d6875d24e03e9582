use anyhow::{anyhow, Result};

use crate::time::parse_tz;

#[derive(Debug, Clone)]
pub struct Config {
    // Listener
    pub bind_addr: String,
    pub port: u16,

    // Dates
    pub default_tz: String,
    pub cache_max_age_secs: u64,

    // Preview pages. Without it, image URLs are built from `Host` and `X-Forwarded-Proto`.
    pub public_url: Option<String>,

    // Logging
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            default_tz: "America/Chicago".to_string(),
            cache_max_age_secs: 600,
            public_url: None,
            log_json: false,
        }
    }
}

fn env_bool(value: Option<String>, default: bool) -> bool {
    match value.map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value.map(|s| s.trim().to_string()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse().map_err(|_| anyhow!("{key}: cannot parse {v:?}")),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        // Listener
        let bind_addr = get("DWI_BIND_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.bind_addr);
        let port = env_parse("PORT", get("PORT"), defaults.port)?;

        // Dates
        let default_tz = get("DWI_DEFAULT_TZ")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.default_tz);
        parse_tz(&default_tz).map_err(|e| anyhow!("DWI_DEFAULT_TZ: {e}"))?;
        let cache_max_age_secs =
            env_parse("DWI_CACHE_MAX_AGE_SECS", get("DWI_CACHE_MAX_AGE_SECS"), defaults.cache_max_age_secs)?;

        // Preview pages
        let public_url = get("DWI_PUBLIC_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let log_json = env_bool(get("DWI_LOG_JSON"), defaults.log_json);

        Ok(Self {
            bind_addr,
            port,
            default_tz,
            cache_max_age_secs,
            public_url,
            log_json,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
