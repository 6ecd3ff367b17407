pub mod active;
pub mod event;
pub mod merged;
pub mod mode;
pub mod picker;
pub mod store;
pub mod submit;
pub mod value;

pub use active::{ActiveController, LastOperation, OpenConfig};
pub use event::{PickerEvent, PickerValueSource};
pub use merged::MergedState;
pub use mode::{PanelMode, PanelModeController, ParseModeError};
pub use picker::{FocusHandle, Picker, PickerConfig, Preset};
pub use store::{CommitOutcome, CommitPolicy, ValueStore};
pub use submit::SubmitGate;
pub use value::{FieldFormat, PickerValue, RangeSlot, ValueShape};
