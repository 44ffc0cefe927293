//! Session configuration.

use serde::{Deserialize, Serialize};

/// Cookie-session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the cookie is marked Secure (HTTPS only).
    #[serde(default)]
    pub cookie_secure: bool,
    /// Interval in seconds between expired-session sweeps.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_sweep_interval() -> u64 {
    3600
}
