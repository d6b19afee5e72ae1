pub mod cdp;
pub mod config;
pub mod error;
pub mod host;
pub mod inject;

pub use error::HostError;
pub use host::{CdpHost, PickSession, PickerHost};
