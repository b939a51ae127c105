use crate::models::{Configuration, EpochRecord};
use crate::monitor::TrialOutcome;

/// Print the banner that opens a trial.
pub fn display_trial_header(trial_id: u64) {
    println!();
    println!("=== Trial {} ===", trial_id);
}

/// Display a generated configuration as an aligned key/value table.
pub fn display_config(config: &Configuration) {
    if config.is_empty() {
        println!("(empty configuration)");
        return;
    }

    let width = config.keys().map(str::len).max().unwrap_or(10);

    for (key, value) in config {
        let shown = if value.is_empty() {
            "(flag)".to_string()
        } else {
            value.to_string()
        };
        println!("  {:<width$}  {}", key, shown, width = width);
    }
    println!();
}

/// Display one epoch's perplexities next to the baseline's, when known.
pub fn display_epoch(epoch: usize, record: &EpochRecord, baseline: Option<&EpochRecord>) {
    match baseline {
        Some(base) => println!(
            "Epoch {:>2}  train ppl {:>9.2} (base {:>9.2})  val ppl {:>9.2} (base {:>9.2})",
            epoch, record.train_ppl, base.train_ppl, record.val_ppl, base.val_ppl
        ),
        None => println!(
            "Epoch {:>2}  train ppl {:>9.2}  val ppl {:>9.2}",
            epoch, record.train_ppl, record.val_ppl
        ),
    }
}

/// Display how a trial ended.
pub fn display_outcome(trial_id: u64, outcome: &TrialOutcome) {
    println!(
        "Trial {} {} at epoch {}",
        trial_id, outcome.reason, outcome.epoch
    );
}
