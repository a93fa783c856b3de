use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_ttl_secs() -> u64 {
    60 * 60
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Idle time after which every pending save-token is dropped
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}
