use std::path::PathBuf;
use std::process::{Child, Command};

use tracing::{info, warn};

use crate::error::{Result, SearchError};
use crate::models::Configuration;

/// A running trainer that the monitor may need to stop.
pub trait TrialProcess {
    /// OS process id, for diagnostics.
    fn id(&self) -> u32;

    /// Forcibly terminate the process.
    fn kill(&mut self) -> Result<()>;

    /// Collect the exit status if the process has finished, without blocking.
    /// Returns whether it was reaped.
    fn try_reap(&mut self) -> Result<bool>;
}

impl TrialProcess for Child {
    fn id(&self) -> u32 {
        Child::id(self)
    }

    fn kill(&mut self) -> Result<()> {
        match Child::kill(self) {
            Ok(()) => {}
            // Already exited on its own
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {
                warn!(pid = Child::id(self), "Trainer already exited before kill");
            }
            Err(e) => return Err(e.into()),
        }
        // Reap so the killed trainer does not linger as a zombie.
        self.wait()?;
        Ok(())
    }

    fn try_reap(&mut self) -> Result<bool> {
        Ok(self.try_wait()?.is_some())
    }
}

/// Starts trainer processes for generated configurations.
pub trait Launcher {
    type Process: TrialProcess;

    fn launch(&mut self, config: &Configuration) -> Result<Self::Process>;
}

/// Launches the trainer executable as a child process.
#[derive(Debug, Clone)]
pub struct TrainerLauncher {
    program: PathBuf,
    workdir: PathBuf,
}

impl TrainerLauncher {
    /// A `program` with a directory part is resolved against the current
    /// directory, not `workdir`. Bare names are left for a `PATH` lookup.
    pub fn new(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Result<Self> {
        let program = program.into();
        let program = if program.components().count() > 1 {
            std::path::absolute(&program)?
        } else {
            program
        };

        Ok(Self {
            program,
            workdir: workdir.into(),
        })
    }
}

impl Launcher for TrainerLauncher {
    type Process = Child;

    fn launch(&mut self, config: &Configuration) -> Result<Child> {
        let args = build_trainer_args(config);

        let child = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.workdir)
            .spawn()
            .map_err(|source| SearchError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;

        info!(
            pid = child.id(),
            program = %self.program.display(),
            args = %args.join(" "),
            "Started trainer"
        );
        Ok(child)
    }
}

/// Translate a configuration into `--key value` pairs.
///
/// Keys with an empty value become bare flags.
pub fn build_trainer_args(config: &Configuration) -> Vec<String> {
    let mut args = Vec::with_capacity(config.len() * 2);
    for (key, value) in config {
        args.push(format!("--{}", key));
        if !value.is_empty() {
            args.push(value.to_string());
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigValue;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    #[test]
    fn test_build_args_pairs_and_flags() {
        let mut config = Configuration::new();
        config.insert("batch_size", 32_i64);
        config.insert("initial_lr", 0.0005);
        config.insert("model", "LSTM");
        config.insert("save_best", ConfigValue::from(""));

        let args = build_trainer_args(&config);
        assert_eq!(
            args,
            vec![
                "--batch_size",
                "32",
                "--initial_lr",
                "0.0005",
                "--model",
                "LSTM",
                "--save_best",
            ]
        );
    }

    #[test]
    fn test_empty_config_has_no_args() {
        assert!(build_trainer_args(&Configuration::new()).is_empty());
    }

    #[test]
    fn test_launch_missing_program_fails() {
        let dir = TempDir::new().unwrap();
        let mut launcher =
            TrainerLauncher::new(dir.path().join("no-such-trainer"), dir.path()).unwrap();

        let err = launcher.launch(&Configuration::new()).unwrap_err();
        assert!(matches!(err, SearchError::Launch { .. }));
    }

    #[test]
    fn test_relative_trainer_ignores_workdir() {
        let launcher = TrainerLauncher::new("./ptb-lm.py", "runs").unwrap();
        let expected = std::env::current_dir().unwrap().join("ptb-lm.py");
        assert!(launcher.program.is_absolute());
        assert!(launcher.program.ends_with("ptb-lm.py"));
        assert_eq!(launcher.program.parent(), expected.parent());

        let launcher = TrainerLauncher::new("python3", "runs").unwrap();
        assert_eq!(launcher.program, PathBuf::from("python3"));
    }

    #[cfg(unix)]
    fn script_launcher(dir: &TempDir, body: &str) -> TrainerLauncher {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("trainer.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        TrainerLauncher::new(path, dir.path()).unwrap()
    }

    #[cfg(unix)]
    fn reap_within(child: &mut Child, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if TrialProcess::try_reap(child).unwrap() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }

    #[cfg(unix)]
    #[test]
    fn test_kill_stops_and_reaps_running_trainer() {
        let dir = TempDir::new().unwrap();
        let mut launcher = script_launcher(&dir, "exec sleep 30");
        let mut child = launcher.launch(&Configuration::new()).unwrap();

        let started = Instant::now();
        TrialProcess::kill(&mut child).unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));

        let status = child.try_wait().unwrap();
        assert!(status.is_some_and(|s| !s.success()));
    }

    #[cfg(unix)]
    #[test]
    fn test_kill_after_exit_is_harmless() {
        let dir = TempDir::new().unwrap();
        let mut launcher = script_launcher(&dir, "exit 0");
        let mut child = launcher.launch(&Configuration::new()).unwrap();

        assert!(reap_within(&mut child, Duration::from_secs(10)));
        TrialProcess::kill(&mut child).unwrap();
        assert!(child.try_wait().unwrap().is_some_and(|s| s.success()));
    }

    #[cfg(unix)]
    #[test]
    fn test_try_reap_leaves_running_trainer_alone() {
        let dir = TempDir::new().unwrap();
        let mut launcher = script_launcher(&dir, "exec sleep 30");
        let mut child = launcher.launch(&Configuration::new()).unwrap();

        assert!(!TrialProcess::try_reap(&mut child).unwrap());
        TrialProcess::kill(&mut child).unwrap();
    }
}
