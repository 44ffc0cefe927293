//! Real-time socket configuration.

use serde::{Deserialize, Serialize};

/// Real-time connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-connection outbound message buffer size.
    #[serde(default = "default_buffer_size")]
    pub channel_buffer_size: usize,
    /// Maximum chat message length in characters.
    #[serde(default = "default_max_message_len")]
    pub max_message_length: usize,
    /// Number of chat messages returned by default when loading history.
    #[serde(default = "default_history_limit")]
    pub default_history_limit: i64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_buffer_size(),
            max_message_length: default_max_message_len(),
            default_history_limit: default_history_limit(),
        }
    }
}

fn default_buffer_size() -> usize {
    64
}

fn default_max_message_len() -> usize {
    4000
}

fn default_history_limit() -> i64 {
    50
}
