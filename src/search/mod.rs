pub mod constants;
pub mod perturb;
pub mod runner;
pub mod session;
pub mod settings;

pub use perturb::{constrain, generate, round_to_heads};
pub use runner::{reap_finished, run_search};
pub use session::{SearchSession, search_name};
pub use settings::{MonitorSettings, SearchSettings};
