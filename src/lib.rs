//! Date/time picker state machine.
//!
//! [`state::Picker`] ties together the committed/calendar value store, the
//! active-field controller, the submit gate and the per-field panel modes.
//! Hosts feed it inbound events and drain outbound [`state::PickerEvent`]s.
//! The `ui` module is a ratatui host for it; `cmd` holds the CLI entry
//! points.

pub mod calc;
pub mod cmd;
pub mod data;
pub mod panel;
pub mod state;
pub mod ui;
