pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod monitor;
pub mod process;
pub mod search;
pub mod store;

pub use error::{Result, SearchError};
pub use models::{ConfigValue, Configuration, EpochRecord, Trial};
