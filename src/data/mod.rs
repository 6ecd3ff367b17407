pub mod locale;
pub mod persistence;
pub mod settings;

pub use locale::Locale;
pub use persistence::Persistable;
pub use settings::{PickerSettings, PresetEntry};
