//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// SMTP settings for verification mail.
///
/// When `enabled` is false the mailer logs the verification code instead
/// of sending, which is the default for development and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether mail sending is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay hostname.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// From address for outbound mail.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Email domain new accounts must belong to. Empty disables the check.
    #[serde(default)]
    pub allowed_signup_domain: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from(),
            allowed_signup_domain: String::new(),
        }
    }
}

fn default_from() -> String {
    "noreply@teamhub.local".to_string()
}
