use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "eu-central-1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub default_region: String,
    #[serde(rename = "config_wizard_run", alias = "wizard_completed")]
    pub wizard_completed: bool,
    #[serde(rename = "prefer_local_configs", alias = "prefer_local_config")]
    pub prefer_local_config: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self { default_region: DEFAULT_REGION.into(), wizard_completed: false, prefer_local_config: true }
    }
}
