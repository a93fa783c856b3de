use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    LinguaRobot,
    MerriamWebster,
    Xf,
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lingua_robot" => Some(Self::LinguaRobot),
            "merriam_webster" => Some(Self::MerriamWebster),
            "xf" => Some(Self::Xf),
            _ => None,
        }
    }
}

fn default_order() -> Vec<ProviderKind> {
    vec![ProviderKind::LinguaRobot]
}

fn default_lr_host() -> String {
    "lingua-robot.p.rapidapi.com".to_string()
}

fn default_lr_base_url() -> String {
    "https://lingua-robot.p.rapidapi.com".to_string()
}

fn default_xf_host() -> String {
    "xf-english-dictionary1.p.rapidapi.com".to_string()
}

fn default_xf_base_url() -> String {
    "https://xf-english-dictionary1.p.rapidapi.com".to_string()
}

fn default_mw_base_url() -> String {
    "https://dictionaryapi.com/api/v3/references/collegiate/json".to_string()
}

fn default_mw_audio_url() -> String {
    "https://media.merriam-webster.com/audio/prons/en/us/mp3".to_string()
}

/// Which dictionary providers to query, in order, and their credentials
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProvidersConfig {
    #[serde(default = "default_order")]
    pub order: Vec<ProviderKind>,
    pub lingua_robot: LinguaRobotConfig,
    pub merriam_webster: MerriamWebsterConfig,
    pub xf: XfConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            lingua_robot: LinguaRobotConfig::default(),
            merriam_webster: MerriamWebsterConfig::default(),
            xf: XfConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LinguaRobotConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_lr_host")]
    pub api_host: String,
    #[serde(default = "default_lr_base_url")]
    pub base_url: String,
}

impl Default for LinguaRobotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_host: default_lr_host(),
            base_url: default_lr_base_url(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MerriamWebsterConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_mw_base_url")]
    pub base_url: String,
    #[serde(default = "default_mw_audio_url")]
    pub audio_url: String,
}

impl Default for MerriamWebsterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_mw_base_url(),
            audio_url: default_mw_audio_url(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct XfConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_xf_host")]
    pub api_host: String,
    #[serde(default = "default_xf_base_url")]
    pub base_url: String,
}

impl Default for XfConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_host: default_xf_host(),
            base_url: default_xf_base_url(),
        }
    }
}
