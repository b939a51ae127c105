use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::search::constants::{
    DEFAULT_EXPERIENCES_DIR, DEFAULT_POLL_SECS, DEFAULT_TRAINER, DEFAULT_WARMUP_SECS,
};
use crate::search::{MonitorSettings, SearchSettings};

/// Random hyperparameter search around a baseline language-model experiment.
#[derive(Parser, Debug)]
#[command(name = "random_search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the base experiment folder (inside the experiences folder) to improve on.
    pub base_xp_name: String,

    /// Folder holding baseline experiments.
    #[arg(long, default_value = DEFAULT_EXPERIENCES_DIR)]
    pub experiences_dir: PathBuf,

    /// Trainer entry point launched for each trial.
    #[arg(long, default_value = DEFAULT_TRAINER)]
    pub trainer: PathBuf,

    /// Directory the trainer creates its run folders in.
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Seconds to wait after launch before looking for the run folder.
    #[arg(long, default_value_t = DEFAULT_WARMUP_SECS)]
    pub warmup_secs: u64,

    /// Seconds between log polls.
    #[arg(long, default_value_t = DEFAULT_POLL_SECS)]
    pub poll_secs: u64,

    /// Stop after this many trials instead of running until interrupted.
    #[arg(long)]
    pub max_trials: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            experiences_dir: self.experiences_dir.clone(),
            trainer: self.trainer.clone(),
            workdir: self.workdir.clone(),
            max_trials: self.max_trials,
            monitor: MonitorSettings {
                warmup: Duration::from_secs(self.warmup_secs),
                poll_interval: Duration::from_secs(self.poll_secs),
                ..MonitorSettings::default()
            },
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
