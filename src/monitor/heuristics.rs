use crate::models::EpochRecord;
use crate::search::MonitorSettings;

/// Early-stop findings for one epoch.
///
/// Both checks are always evaluated, so both flags can be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochVerdict {
    pub underperforming: bool,
    pub overfitting: bool,
}

impl EpochVerdict {
    pub fn should_kill(&self) -> bool {
        self.underperforming || self.overfitting
    }
}

/// Evaluate the most recent epoch of `records` against the baseline.
pub fn evaluate_epoch(
    records: &[EpochRecord],
    baseline: &[EpochRecord],
    settings: &MonitorSettings,
) -> EpochVerdict {
    let Some(current) = records.len().checked_sub(1) else {
        return EpochVerdict::default();
    };

    EpochVerdict {
        underperforming: current >= settings.underperform_min_epoch
            && is_underperforming(records, baseline, current),
        overfitting: current >= settings.overfit_window
            && is_overfitting(records, current, settings.overfit_window),
    }
}

/// Train and val perplexity at `epoch` are both worse than the baseline's.
///
/// A baseline that never reached `epoch` cannot be beaten or lost to.
pub fn is_underperforming(
    records: &[EpochRecord],
    baseline: &[EpochRecord],
    epoch: usize,
) -> bool {
    match (records.get(epoch), baseline.get(epoch)) {
        (Some(trial), Some(base)) => trial.is_worse_than(base),
        _ => false,
    }
}

/// None of the last `window` epochs improved on the val perplexity from
/// `window` epochs before `epoch`.
pub fn is_overfitting(records: &[EpochRecord], epoch: usize, window: usize) -> bool {
    if window == 0 || epoch < window || epoch >= records.len() {
        return false;
    }

    let reference = records[epoch - window].val_ppl;
    !(0..window).any(|t| records[epoch - t].val_ppl < reference)
}
