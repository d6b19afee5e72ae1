pub mod error;
pub mod protocol;

pub use error::{DeliveryError, PickerError, ProtocolError};
pub use protocol::{ElementInfo, ElementSelection, PickerMessage};
