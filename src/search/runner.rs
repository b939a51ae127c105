use rand::Rng;
use tracing::{debug, info};

use crate::error::Result;
use crate::interface::{display_config, display_outcome, display_trial_header};
use crate::models::Trial;
use crate::monitor::{Clock, LogMonitor};
use crate::process::{Launcher, TrialProcess};
use crate::search::perturb::generate;
use crate::search::session::SearchSession;
use crate::search::settings::SearchSettings;

/// Run trials one after another: generate, launch, monitor.
///
/// Loops until interrupted unless `settings.max_trials` is set. Returns the
/// number of trials run.
pub fn run_search<L, C, R>(
    session: &SearchSession,
    settings: &SearchSettings,
    launcher: &mut L,
    clock: C,
    rng: &mut R,
) -> Result<u64>
where
    L: Launcher,
    C: Clock,
    R: Rng + ?Sized,
{
    let mut monitor = LogMonitor::new(session, &settings.monitor, &settings.workdir, clock);
    let mut trial_id = 0;
    // Trainers left running at the epoch ceiling, reaped once they exit.
    let mut unreaped: Vec<L::Process> = Vec::new();

    info!(
        search = session.search_name(),
        max_trials = ?settings.max_trials,
        "Starting random search"
    );

    while settings.max_trials.is_none_or(|max| trial_id < max) {
        trial_id += 1;
        display_trial_header(trial_id);

        let config = generate(rng, session.baseline_config(), session.search_name(), trial_id)?;
        display_config(&config);

        reap_finished(&mut unreaped)?;
        let process = launcher.launch(&config)?;
        let mut trial = Trial::new(trial_id, config, process);

        let outcome = monitor.run(&mut trial)?;
        display_outcome(trial_id, &outcome);

        if !outcome.reason.kills() {
            unreaped.push(trial.process);
        }
    }

    reap_finished(&mut unreaped)?;
    if !unreaped.is_empty() {
        debug!(running = unreaped.len(), "Leaving trainers running");
    }

    Ok(trial_id)
}

/// Reap every process in `pending` that has exited, keeping the rest.
/// Returns how many were reaped.
pub fn reap_finished<P: TrialProcess>(pending: &mut Vec<P>) -> Result<usize> {
    let mut reaped = 0;
    let mut i = 0;
    while i < pending.len() {
        if pending[i].try_reap()? {
            let process = pending.swap_remove(i);
            debug!(pid = process.id(), "Reaped finished trainer");
            reaped += 1;
        } else {
            i += 1;
        }
    }
    Ok(reaped)
}
