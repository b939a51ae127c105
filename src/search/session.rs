use std::path::Path;

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::Result;
use crate::models::{Configuration, EpochRecord};
use crate::search::constants::{SEARCH_NAME_PREFIX, SEARCH_TIMESTAMP_FORMAT};
use crate::store::{load_config, parse_log};

/// Baseline state shared by every trial of one search.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SearchSession {
    base_name: String,
    search_name: String,
    baseline_config: Configuration,
    baseline_records: Vec<EpochRecord>,
}

impl SearchSession {
    pub fn new(
        base_name: impl Into<String>,
        search_name: impl Into<String>,
        baseline_config: Configuration,
        baseline_records: Vec<EpochRecord>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            search_name: search_name.into(),
            baseline_config,
            baseline_records,
        }
    }

    /// Load the baseline experiment `{experiences_dir}/{base_name}` and name
    /// the search after it and `started_at`.
    pub fn load<P: AsRef<Path>>(
        experiences_dir: P,
        base_name: &str,
        started_at: DateTime<Local>,
    ) -> Result<Self> {
        let experiences_dir = experiences_dir.as_ref();
        let baseline_config = load_config(experiences_dir, base_name)?;
        let baseline_records = parse_log(experiences_dir.join(base_name))?;

        let session = Self::new(
            base_name,
            search_name(base_name, started_at),
            baseline_config,
            baseline_records,
        );

        info!(
            base = %session.base_name,
            search = %session.search_name,
            keys = session.baseline_config.len(),
            epochs = session.baseline_records.len(),
            "Loaded baseline experiment"
        );

        Ok(session)
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Prefix shared by every trial folder of this search.
    pub fn search_name(&self) -> &str {
        &self.search_name
    }

    pub fn baseline_config(&self) -> &Configuration {
        &self.baseline_config
    }

    pub fn baseline_records(&self) -> &[EpochRecord] {
        &self.baseline_records
    }

    /// Baseline record for an epoch index, if the baseline ran that long.
    pub fn baseline_epoch(&self, epoch: usize) -> Option<&EpochRecord> {
        self.baseline_records.get(epoch)
    }
}

/// `random_search_{base}_{YYYY-mm-dd_HH-MM-SS}`.
pub fn search_name(base_name: &str, started_at: DateTime<Local>) -> String {
    format!(
        "{}_{}_{}",
        SEARCH_NAME_PREFIX,
        base_name,
        started_at.format(SEARCH_TIMESTAMP_FORMAT)
    )
}
