//! User configuration: file locations and `settings.conf`.

mod parsing;
pub mod paths;
mod settings;

pub use paths::{config_dir, logs_dir, preferences_path, settings_path};
pub use settings::{DEFAULT_CATALOG_RETRIES, Settings, load_settings, parse_settings};
