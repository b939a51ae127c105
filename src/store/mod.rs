mod config_file;
mod log_file;

pub use config_file::{CONFIG_FILE_NAME, CONFIG_SEPARATOR, config_path, load_config, parse_config};
pub use log_file::{LOG_FILE_NAME, parse_log, parse_log_from};
