//! Session configuration.

use super::theme::{Theme, THEME_PREFERENCE_KEY};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Delay before the error sentinel is cleared automatically.
pub const DEFAULT_RECOVERY_DELAY_MS: u64 = 2_000;

/// Longest recovery delay a session accepts (one day).
pub const MAX_RECOVERY_DELAY_MS: u64 = 86_400_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid session configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for a [`Session`](super::Session).
///
/// Every field has a default, so a partial JSON document is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub recovery_delay_ms: u64,
    pub preference_key: String,
    pub initial_theme: Theme,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recovery_delay_ms: DEFAULT_RECOVERY_DELAY_MS,
            preference_key: THEME_PREFERENCE_KEY.to_string(),
            initial_theme: Theme::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn recovery_delay(&self) -> Duration {
        Duration::from_millis(self.recovery_delay_ms)
    }
}
