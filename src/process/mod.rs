mod launcher;

pub use launcher::{Launcher, TrainerLauncher, TrialProcess, build_trainer_args};
