use serde::{Deserialize, Serialize};

fn default_max_block_len() -> usize {
    4096
}

fn default_max_senses() -> usize {
    5
}

fn default_max_examples() -> usize {
    3
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RenderConfig {
    /// Chat transport message limit, in UTF-16 code units
    #[serde(default = "default_max_block_len")]
    pub max_block_len: usize,
    #[serde(default = "default_max_senses")]
    pub max_senses: usize,
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_block_len: default_max_block_len(),
            max_senses: default_max_senses(),
            max_examples: default_max_examples(),
        }
    }
}
