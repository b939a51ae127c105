/// Perplexities reported by the trainer for one completed epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochRecord {
    /// Epoch number as written in the log.
    pub epoch: u32,

    /// Training perplexity.
    pub train_ppl: f64,

    /// Validation perplexity.
    pub val_ppl: f64,

    /// Best validation perplexity seen so far.
    pub best_val: f64,
}

impl EpochRecord {
    pub fn new(epoch: u32, train_ppl: f64, val_ppl: f64, best_val: f64) -> Self {
        Self {
            epoch,
            train_ppl,
            val_ppl,
            best_val,
        }
    }

    /// True when both train and val perplexity are strictly worse than `other`.
    pub fn is_worse_than(&self, other: &EpochRecord) -> bool {
        self.train_ppl > other.train_ppl && self.val_ppl > other.val_ppl
    }
}
