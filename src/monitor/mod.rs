pub mod clock;
pub mod discovery;
pub mod heuristics;
mod log_monitor;

pub use clock::{Clock, SystemClock};
pub use discovery::{discover_folder, list_entries};
pub use heuristics::{EpochVerdict, evaluate_epoch, is_overfitting, is_underperforming};
pub use log_monitor::{LogMonitor, MonitorState, StopReason, TrialOutcome};
