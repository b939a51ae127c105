use std::path::PathBuf;
use std::time::Duration;

use crate::search::constants::{
    DEFAULT_EXPERIENCES_DIR, DEFAULT_POLL_SECS, DEFAULT_TRAINER, DEFAULT_WARMUP_SECS,
    MAX_EPOCH_INDEX, OVERFIT_WINDOW, UNDERPERFORM_MIN_EPOCH,
};

/// Runtime settings for a search session.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Folder holding baseline experiments.
    pub experiences_dir: PathBuf,
    /// Trainer entry point.
    pub trainer: PathBuf,
    /// Directory the trainer writes its run folders into.
    pub workdir: PathBuf,
    /// Stop after this many trials. `None` runs until interrupted.
    pub max_trials: Option<u64>,
    pub monitor: MonitorSettings,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            experiences_dir: PathBuf::from(DEFAULT_EXPERIENCES_DIR),
            trainer: PathBuf::from(DEFAULT_TRAINER),
            workdir: PathBuf::from("."),
            max_trials: None,
            monitor: MonitorSettings::default(),
        }
    }
}

/// Timing and early-stop thresholds used by the log monitor.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub warmup: Duration,
    pub poll_interval: Duration,
    pub underperform_min_epoch: usize,
    pub overfit_window: usize,
    pub max_epoch_index: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            warmup: Duration::from_secs(DEFAULT_WARMUP_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            underperform_min_epoch: UNDERPERFORM_MIN_EPOCH,
            overfit_window: OVERFIT_WINDOW,
            max_epoch_index: MAX_EPOCH_INDEX,
        }
    }
}
