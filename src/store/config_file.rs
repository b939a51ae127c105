use std::fs;
use std::path::{Path, PathBuf};

use strsim::jaro_winkler;

use crate::error::{Result, SearchError};
use crate::models::Configuration;

/// File holding an experiment's hyperparameters.
pub const CONFIG_FILE_NAME: &str = "exp_config.txt";

/// Separator between key and value on each config line.
pub const CONFIG_SEPARATOR: &str = "    ";

/// Minimum similarity for a "did you mean" hint.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Path of the config file for an experiment.
pub fn config_path<P: AsRef<Path>>(experiences_dir: P, experiment: &str) -> PathBuf {
    experiences_dir.as_ref().join(experiment).join(CONFIG_FILE_NAME)
}

/// Load an experiment's configuration from `{experiences_dir}/{experiment}/exp_config.txt`.
///
/// Every value is kept as text; numeric interpretation happens at perturbation time.
pub fn load_config<P: AsRef<Path>>(experiences_dir: P, experiment: &str) -> Result<Configuration> {
    let experiences_dir = experiences_dir.as_ref();
    let path = config_path(experiences_dir, experiment);

    if !path.is_file() {
        return Err(SearchError::ConfigNotFound {
            suggestion: closest_experiment(experiences_dir, experiment),
            path,
        });
    }

    let content = fs::read_to_string(&path)?;
    parse_config(&content, &path)
}

/// Parse `key<4 spaces>value` lines.
///
/// The value is everything after the first separator, so values may
/// themselves contain runs of spaces.
pub fn parse_config(content: &str, path: &Path) -> Result<Configuration> {
    let mut config = Configuration::new();

    for (idx, line) in content.lines().enumerate() {
        let (key, value) =
            line.split_once(CONFIG_SEPARATOR)
                .ok_or_else(|| SearchError::ConfigParse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: format!("missing separator in {:?}", line),
                })?;
        config.insert(key, value);
    }

    Ok(config)
}

/// Name of the existing experiment folder closest to `name`, if any is close enough.
fn closest_experiment(experiences_dir: &Path, name: &str) -> Option<String> {
    let entries = fs::read_dir(experiences_dir).ok()?;

    let mut candidates: Vec<(String, f64)> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .map(|candidate| {
            let score = jaro_winkler(&candidate.to_lowercase(), &name.to_lowercase());
            (candidate, score)
        })
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().next().map(|(candidate, _)| candidate)
}
