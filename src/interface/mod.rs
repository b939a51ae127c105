pub mod render;

pub use render::{display_config, display_epoch, display_outcome, display_trial_header};
