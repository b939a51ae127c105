use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, SearchError};
use crate::interface::display_epoch;
use crate::models::{EpochRecord, Trial, trial_folder_prefix};
use crate::monitor::clock::Clock;
use crate::monitor::discovery::{discover_folder, list_entries};
use crate::monitor::heuristics::evaluate_epoch;
use crate::process::TrialProcess;
use crate::search::{MonitorSettings, SearchSession};
use crate::store::parse_log;

/// Why monitoring of a trial ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Train and val perplexity both behind the baseline.
    Underperform,
    /// Val perplexity stopped improving.
    Overfit,
    /// The last monitored epoch was reached. The trainer is left running.
    CompletedNaturally,
}

impl StopReason {
    /// Whether this reason terminates the trainer.
    pub fn kills(&self) -> bool {
        matches!(self, Self::Underperform | Self::Overfit)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underperform => write!(f, "stopped: underperforming baseline"),
            Self::Overfit => write!(f, "stopped: overfitting"),
            Self::CompletedNaturally => write!(f, "completed"),
        }
    }
}

/// Lifecycle of the monitor for a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    WaitingForFolder,
    Polling,
    Stopped(StopReason),
}

/// Final result of monitoring a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    pub reason: StopReason,
    /// Index of the last epoch evaluated.
    pub epoch: usize,
}

/// Watches a trial's log and stops the trainer when it falls behind.
pub struct LogMonitor<'a, C> {
    session: &'a SearchSession,
    settings: &'a MonitorSettings,
    workdir: PathBuf,
    clock: C,
    state: MonitorState,
}

impl<'a, C: Clock> LogMonitor<'a, C> {
    pub fn new(
        session: &'a SearchSession,
        settings: &'a MonitorSettings,
        workdir: impl Into<PathBuf>,
        clock: C,
    ) -> Self {
        Self {
            session,
            settings,
            workdir: workdir.into(),
            clock,
            state: MonitorState::Idle,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Block until the trial is stopped or reaches the last monitored epoch.
    ///
    /// Polls forever if the trainer never logs enough epochs.
    pub fn run<P: TrialProcess>(&mut self, trial: &mut Trial<P>) -> Result<TrialOutcome> {
        let prefix = trial_folder_prefix(self.session.search_name(), trial.id);

        self.transition(MonitorState::WaitingForFolder);
        self.clock.sleep(self.settings.warmup);

        trial.folder = locate(&self.workdir, &prefix, true)?;
        self.transition(MonitorState::Polling);

        let mut last_epoch: Option<usize> = None;
        loop {
            if trial.folder.is_none() {
                trial.folder = locate(&self.workdir, &prefix, false)?;
            }

            let records = match &trial.folder {
                Some(dir) => parse_log(dir)?,
                None => Vec::new(),
            };

            match records.len().checked_sub(1) {
                Some(current) if last_epoch != Some(current) => {
                    last_epoch = Some(current);
                    let baseline = self.session.baseline_epoch(current);
                    display_epoch(current, &records[current], baseline);

                    if let Some(reason) = self.check_epoch(trial, &records, current)? {
                        self.transition(MonitorState::Stopped(reason));
                        return Ok(TrialOutcome {
                            reason,
                            epoch: current,
                        });
                    }
                }
                _ => debug!(trial = trial.id, "No new epoch"),
            }

            self.clock.sleep(self.settings.poll_interval);
        }
    }

    /// Apply the early-stop rules to a newly completed epoch, killing the
    /// trainer when one fires.
    fn check_epoch<P: TrialProcess>(
        &self,
        trial: &mut Trial<P>,
        records: &[EpochRecord],
        current: usize,
    ) -> Result<Option<StopReason>> {
        let verdict = evaluate_epoch(records, self.session.baseline_records(), self.settings);

        if verdict.underperforming {
            if let Some(base) = self.session.baseline_epoch(current) {
                warn!(
                    trial = trial.id,
                    epoch = current,
                    base_train_ppl = base.train_ppl,
                    base_val_ppl = base.val_ppl,
                    "Perplexities did not beat the baseline"
                );
            }
        } else if current >= self.settings.underperform_min_epoch
            && self.session.baseline_epoch(current).is_none()
        {
            debug!(epoch = current, "Baseline has no record for this epoch");
        }
        if verdict.overfitting {
            warn!(trial = trial.id, epoch = current, "Run is overfitting");
        }

        if verdict.should_kill() {
            warn!(trial = trial.id, pid = trial.process.id(), "Killing trainer");
            trial.process.kill()?;

            let reason = if verdict.underperforming {
                StopReason::Underperform
            } else {
                StopReason::Overfit
            };
            return Ok(Some(reason));
        }

        if current >= self.settings.max_epoch_index {
            info!(trial = trial.id, epoch = current, "Reached last monitored epoch");
            return Ok(Some(StopReason::CompletedNaturally));
        }

        Ok(None)
    }

    fn transition(&mut self, next: MonitorState) {
        debug!(from = ?self.state, to = ?next, "Monitor state");
        self.state = next;
    }
}

/// Look up the trial folder, tolerating a miss. `report` logs the miss with
/// a listing of the working directory.
fn locate(workdir: &Path, prefix: &str, report: bool) -> Result<Option<PathBuf>> {
    match discover_folder(workdir, prefix) {
        Ok(dir) => {
            info!(folder = %dir.display(), "Found run folder");
            Ok(Some(dir))
        }
        Err(err @ SearchError::FolderNotFound { .. }) => {
            if report {
                warn!(entries = ?list_entries(workdir), "{}", err);
            } else {
                debug!("{}", err);
            }
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
