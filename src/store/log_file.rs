use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Result, SearchError};
use crate::models::EpochRecord;

/// Per-run progress log written by the trainer.
pub const LOG_FILE_NAME: &str = "log.txt";

const EPOCH_LABEL: &str = "epoch: ";
const TRAIN_LABEL: &str = "train ppl: ";
const VAL_LABEL: &str = "val ppl: ";
const BEST_VAL_LABEL: &str = "best val: ";

/// Parse `{dir}/log.txt` into epoch records, in file order.
///
/// A missing file means the run has not finished an epoch yet and yields an
/// empty list.
pub fn parse_log<P: AsRef<Path>>(dir: P) -> Result<Vec<EpochRecord>> {
    let path = dir.as_ref().join(LOG_FILE_NAME);
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let file = File::open(&path)?;
    parse_log_from(file, &path)
}

/// Parse tab-separated epoch lines from any reader. `path` is only used in errors.
pub fn parse_log_from<R: Read>(reader: R, path: &Path) -> Result<Vec<EpochRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
        let record = parse_row(&row).map_err(|reason| SearchError::LogParse {
            path: path.to_path_buf(),
            line,
            reason,
        })?;
        records.push(record);
    }

    Ok(records)
}

fn parse_row(row: &StringRecord) -> std::result::Result<EpochRecord, String> {
    if row.len() < 4 {
        return Err(format!("expected 4 tab-separated fields, found {}", row.len()));
    }

    Ok(EpochRecord {
        epoch: labelled_value(&row[0], EPOCH_LABEL)?,
        train_ppl: labelled_value(&row[1], TRAIN_LABEL)?,
        val_ppl: labelled_value(&row[2], VAL_LABEL)?,
        best_val: labelled_value(&row[3], BEST_VAL_LABEL)?,
    })
}

/// Extract and parse the text following `label` in `field`.
fn labelled_value<T: std::str::FromStr>(field: &str, label: &str) -> std::result::Result<T, String> {
    let (_, raw) = field
        .split_once(label)
        .ok_or_else(|| format!("field {:?} lacks label {:?}", field, label.trim_end()))?;
    raw.trim()
        .parse()
        .map_err(|_| format!("cannot parse {:?} after {:?}", raw.trim(), label.trim_end()))
}
