mod config;
mod epoch;
mod trial;

pub use config::{ConfigValue, Configuration};
pub use epoch::EpochRecord;
pub use trial::{Trial, trial_folder_prefix};
