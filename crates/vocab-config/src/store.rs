use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "./db/vocab.json".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding lookup history and saved units
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: default_path() }
    }
}
