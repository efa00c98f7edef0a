//! CLI library for testing purposes

pub mod settings;
pub mod validation;

pub use settings::{DEFAULT_SETTINGS_FILE, Settings, load_settings, parse_settings};
pub use validation::{parse_export_format, validate_language_code, validate_output_path};
