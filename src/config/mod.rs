//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{FileSettings, create_template_config, load_config_from_xml, load_config_from_xml_path};

/// Environment variable naming an explicit config file (or a directory holding `config.xml`).
pub const CONFIG_ENV: &str = "IMAGE_SORT_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.xml";
pub const LOG_FILE_NAME: &str = "image_sort.log";
