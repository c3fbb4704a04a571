use std::path::{Path, PathBuf};

use crate::env::EnvConfig;
use crate::error::ConfigError;
use crate::FancyConfig;

pub const CONFIG_FILE_NAME: &str = ".fancy-config.yaml";

/// Loads and saves the whole document. A config file in the working
/// directory shadows the one in the home directory; the choice is made on
/// every call so a change of directory is picked up.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    local_path: PathBuf,
    home_path: PathBuf,
}

impl ConfigStore {
    pub fn new(env: &EnvConfig) -> Self {
        Self::with_paths(PathBuf::from(CONFIG_FILE_NAME), env.home_dir.join(CONFIG_FILE_NAME))
    }

    pub fn with_paths(local_path: impl Into<PathBuf>, home_path: impl Into<PathBuf>) -> Self {
        Self { local_path: local_path.into(), home_path: home_path.into() }
    }

    pub fn path(&self) -> PathBuf {
        if self.local_path.is_file() {
            return std::path::absolute(&self.local_path).unwrap_or_else(|_| self.local_path.clone());
        }
        self.home_path.clone()
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// A missing document is not an error: defaults apply. A document that
    /// exists but does not parse is reported as `ConfigError::Parse`.
    pub fn load(&self) -> Result<FancyConfig, ConfigError> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(FancyConfig::default());
        }
        let contents =
            std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        FancyConfig::from_yaml(&contents, &path)
    }

    /// Whole-document overwrite through a sibling temp file and a rename.
    pub fn save(&self, config: &FancyConfig) -> Result<PathBuf, ConfigError> {
        let path = self.path();
        let contents = config.to_yaml()?;
        write_replacing(&path, &contents)?;
        tracing::debug!("saved {} profiles to {}", config.profile_configs.len(), path.display());
        Ok(path)
    }
}

fn write_replacing(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, contents).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp);
        write_err(source)
    })
}
