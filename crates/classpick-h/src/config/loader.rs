use super::schema::ClasspickConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Config files in lookup order: `./classpick.yaml`, then
    /// `~/.classpick/config.yaml`.
    pub fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./classpick.yaml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".classpick").join("config.yaml"));
        }
        paths
    }

    /// Load the first existing candidate, or the defaults.
    pub async fn load_default() -> Result<ClasspickConfig, ConfigError> {
        match Self::candidates().into_iter().find(|path| path.exists()) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from(&path).await
            }
            None => Ok(ClasspickConfig::default()),
        }
    }

    /// An empty file yields the defaults.
    pub async fn load_from(path: &Path) -> Result<ClasspickConfig, ConfigError> {
        let raw = tokio::fs::read_to_string(path).await?;
        if raw.trim().is_empty() {
            return Ok(ClasspickConfig::default());
        }
        Ok(serde_yaml::from_str(&raw)?)
    }
}
