use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_timeout_secs() -> u64 {
    10
}

/// Outbound HTTP settings shared by dictionary providers
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}
