use crate::config::ConfigError;
use classpick_common::ProtocolError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host not launched")]
    NotReady,

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Picker injection failed: {0}")]
    Injection(String),

    #[error("Failed to read picker bundle {path}: {source}")]
    Bundle {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No selection within {0:?}")]
    Timeout(Duration),

    #[error("Picker window closed before an element was selected")]
    Closed,

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<chromiumoxide::error::CdpError> for HostError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        HostError::Cdp(err.to_string())
    }
}
