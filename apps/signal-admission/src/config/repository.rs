//! Repository access configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Collaborator store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Timeout applied to every store call (milliseconds).
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl RepositoryConfig {
    /// Read timeout as a duration.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

const fn default_read_timeout_ms() -> u64 {
    2000
}
