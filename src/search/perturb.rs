use rand::Rng;
use rand_distr::StandardNormal;
use tracing::{debug, info};

use crate::error::{Result, SearchError};
use crate::models::{ConfigValue, Configuration, trial_folder_prefix};
use crate::search::constants::{
    DP_KEEP_PROB_MAX, DP_KEEP_PROB_MIN, MIN_INITIAL_LR, MIN_NUM_LAYERS, MIN_SIZE, NOISE_SCALE,
    NUMERIC_KEYS, PASS_THROUGH_KEYS, SAVE_BEST_KEY, SAVE_DIR_KEY, SIZE_KEYS, TRANSFORMER_HEADS,
    TRANSFORMER_MODEL,
};

/// Generate a randomized configuration for one trial.
///
/// Every numeric key of `base` is moved by Gaussian noise whose standard
/// deviation is half of the baseline value, then forced back into its valid
/// domain. `model` and `optimizer` are copied as-is; any other baseline key
/// is dropped. `save_dir` and `save_best` are added for the trainer.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    base: &Configuration,
    search_name: &str,
    trial_id: u64,
) -> Result<Configuration> {
    let transformer = base.get_text("model") == Some(TRANSFORMER_MODEL);
    let mut config = Configuration::new();

    for (key, value) in base {
        if NUMERIC_KEYS.contains(&key.as_str()) {
            let base_value = value.as_f64().ok_or_else(|| SearchError::InvalidValue {
                key: key.clone(),
                value: value.to_string(),
            })?;
            let noise: f64 = rng.sample(StandardNormal);
            let perturbed = base_value + noise * base_value * NOISE_SCALE;
            config.insert(key.as_str(), constrain(key, perturbed, transformer));
        } else if PASS_THROUGH_KEYS.contains(&key.as_str()) {
            config.insert(key.as_str(), value.clone());
        } else {
            debug!(key = %key, "Dropping unrecognized baseline key");
        }
    }

    config.insert(SAVE_DIR_KEY, trial_folder_prefix(search_name, trial_id));
    config.insert(SAVE_BEST_KEY, "");

    info!(
        trial = trial_id,
        config = %serde_json::to_string(&config)?,
        "Generated config"
    );

    Ok(config)
}

/// Force a perturbed value into the domain of `key`.
pub fn constrain(key: &str, value: f64, transformer: bool) -> ConfigValue {
    match key {
        "num_layers" => ConfigValue::Int((value.round() as i64).max(MIN_NUM_LAYERS)),
        "dp_keep_prob" => ConfigValue::Float(value.clamp(DP_KEEP_PROB_MIN, DP_KEEP_PROB_MAX)),
        "initial_lr" => ConfigValue::Float(value.max(MIN_INITIAL_LR)),
        k if SIZE_KEYS.contains(&k) => {
            let size = (value.round() as i64).max(MIN_SIZE);
            if transformer && k == "hidden_size" {
                ConfigValue::Int(round_to_heads(size))
            } else {
                ConfigValue::Int(size)
            }
        }
        _ => ConfigValue::Float(value),
    }
}

/// Round to the nearest multiple of the head count, ties going up. Never 0.
pub fn round_to_heads(size: i64) -> i64 {
    let remainder = size.rem_euclid(TRANSFORMER_HEADS);
    let rounded = if remainder >= TRANSFORMER_HEADS / 2 {
        size + TRANSFORMER_HEADS - remainder
    } else {
        size - remainder
    };

    if rounded == 0 { TRANSFORMER_HEADS } else { rounded }
}
