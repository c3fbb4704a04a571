pub mod env;
pub mod error;
pub mod general;
pub mod legacy;
pub mod namespace;
pub mod pattern;
pub mod profile;
pub mod store;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub use env::EnvConfig;
pub use error::ConfigError;
pub use general::{GlobalSettings, DEFAULT_REGION};
pub use legacy::{ContextMapping, LegacyTables};
pub use namespace::{derive_namespace, NamespaceMiss};
pub use pattern::WildcardPattern;
pub use profile::ProfileConfig;
pub use store::ConfigStore;

/// The durable document: every known profile plus global settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FancyConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_configs: IndexMap<String, ProfileConfig>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: GlobalSettings,
}

impl FancyConfig {
    pub fn from_yaml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: FancyConfig = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::Parse { path: path.to_path_buf(), message: e.to_string() })?;
        config.normalize();
        Ok(config)
    }

    /// Always writes the normalized form, so what a later load returns
    /// serializes to the same text.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        let mut normalized = self.clone();
        normalized.normalize();
        serde_yaml::to_string(&normalized).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Reconciles each entry with its map key. Missing keys are already
    /// defaulted by serde; a present but empty `default_region` stays empty.
    pub fn normalize(&mut self) {
        for (key, profile) in self.profile_configs.iter_mut() {
            profile.normalize(key);
        }
    }

    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profile_configs.get(name)
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.profile_configs.contains_key(name)
    }

    pub fn insert_profile(&mut self, profile: ProfileConfig) {
        self.profile_configs.insert(profile.name.clone(), profile);
    }

    pub fn is_empty(&self) -> bool {
        self.profile_configs.is_empty()
    }

    /// Region for registry login: the profile's own, else the global default.
    /// Empty when neither is set.
    pub fn ecr_region_for(&self, profile: &ProfileConfig) -> String {
        if !profile.ecr_region.is_empty() {
            return profile.ecr_region.clone();
        }
        self.settings.default_region.clone()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests;
