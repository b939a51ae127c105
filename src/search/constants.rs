// ─────────────────────────────────────────────────────────────────────────────
// Hyperparameter keys
// ─────────────────────────────────────────────────────────────────────────────

/// Keys whose values are perturbed.
pub const NUMERIC_KEYS: [&str; 7] = [
    "batch_size",
    "dp_keep_prob",
    "emb_size",
    "hidden_size",
    "initial_lr",
    "num_layers",
    "seq_len",
];

/// Keys copied verbatim from the baseline.
pub const PASS_THROUGH_KEYS: [&str; 2] = ["model", "optimizer"];

/// Integer keys that must stay at or above `MIN_SIZE`.
pub const SIZE_KEYS: [&str; 4] = ["batch_size", "emb_size", "hidden_size", "seq_len"];

pub const SAVE_DIR_KEY: &str = "save_dir";
pub const SAVE_BEST_KEY: &str = "save_best";

// ─────────────────────────────────────────────────────────────────────────────
// Domain rules
// ─────────────────────────────────────────────────────────────────────────────

/// Standard deviation of the perturbation, as a fraction of the baseline value.
pub const NOISE_SCALE: f64 = 0.5;

pub const MIN_NUM_LAYERS: i64 = 1;
pub const MIN_SIZE: i64 = 10;

/// Transformer hidden sizes must split evenly across this many heads.
pub const TRANSFORMER_HEADS: i64 = 16;
pub const TRANSFORMER_MODEL: &str = "TRANSFORMER";

pub const DP_KEEP_PROB_MIN: f64 = 0.1;
pub const DP_KEEP_PROB_MAX: f64 = 0.9;

pub const MIN_INITIAL_LR: f64 = 0.00001;

// ─────────────────────────────────────────────────────────────────────────────
// Monitoring
// ─────────────────────────────────────────────────────────────────────────────

/// Seconds to wait for the trainer to create its output folder.
pub const DEFAULT_WARMUP_SECS: u64 = 30;

/// Seconds between log polls.
pub const DEFAULT_POLL_SECS: u64 = 30;

/// First epoch index at which a run is compared against the baseline.
pub const UNDERPERFORM_MIN_EPOCH: usize = 2;

/// Number of recent epochs that must fail to improve before a run counts as overfitting.
pub const OVERFIT_WINDOW: usize = 5;

/// Last epoch index the monitor waits for (the 40th epoch).
pub const MAX_EPOCH_INDEX: usize = 39;

// ─────────────────────────────────────────────────────────────────────────────
// Paths
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_EXPERIENCES_DIR: &str = "experiences";
pub const DEFAULT_TRAINER: &str = "./ptb-lm.py";
pub const SEARCH_NAME_PREFIX: &str = "random_search";
pub const SEARCH_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
