pub mod boundary;
pub mod chrono_engine;
pub mod compare;
pub mod engine;

pub use boundary::{DateRules, DisabledDate, DisabledInfo};
pub use chrono_engine::ChronoEngine;
pub use engine::DateEngine;
