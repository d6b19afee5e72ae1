pub mod activation;
pub mod config;
pub mod delivery;
pub mod dom;
pub mod highlight;
pub mod picker;
pub mod selector;

pub use activation::{ActivationGate, GateAction};
pub use config::PickerConfig;
pub use delivery::{Delivery, DialogDelivery, OpenerDelivery};
pub use dom::{ClassName, ElementTree, PickerPage, StyleProperty};
pub use highlight::{Highlight, StyleSnapshot};
pub use picker::{Disposition, Picker, PickerEvent};
pub use selector::{SelectorPath, derive_class_path};

pub use classpick_common::{DeliveryError, ElementInfo, ElementSelection, PickerError, PickerMessage};
