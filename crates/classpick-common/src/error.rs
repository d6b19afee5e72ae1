use thiserror::Error;

/// Errors raised by a picker session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("Element selector is already active")]
    AlreadyActive,
}

/// Errors raised while handing a selection to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("No opener window to deliver the selection to")]
    NoOpener,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to encode message: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed picker message: {0}")]
    Malformed(#[from] serde_json::Error),
}
