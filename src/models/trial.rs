use std::path::PathBuf;

use crate::models::Configuration;

/// One randomized training run and everything the monitor needs to track it.
#[derive(Debug)]
pub struct Trial<P> {
    /// Trial number within the session, starting at 1.
    pub id: u64,

    /// Configuration the trainer was launched with.
    pub config: Configuration,

    /// Handle to the running trainer.
    pub process: P,

    /// Output folder created by the trainer, once discovered.
    pub folder: Option<PathBuf>,
}

impl<P> Trial<P> {
    pub fn new(id: u64, config: Configuration, process: P) -> Self {
        Self {
            id,
            config,
            process,
            folder: None,
        }
    }
}

/// Directory-name prefix the trainer is expected to create for a trial.
pub fn trial_folder_prefix(search_name: &str, id: u64) -> String {
    format!("{}_{}_", search_name, id)
}
