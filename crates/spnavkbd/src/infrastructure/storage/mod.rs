//! Runtime settings storage.

pub mod settings;

pub use settings::{Settings, SettingsError};
