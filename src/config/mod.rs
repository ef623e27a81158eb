//! Operator settings for the passable terrain system

pub mod settings_data;
pub mod settings_operations;

pub use settings_data::{PassableSettings, SettingsFile};
pub use settings_operations::{
    load_settings_file, parse_settings, sanitize_settings, save_settings_file, settings_to_toml,
    validate_settings,
};
