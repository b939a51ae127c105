#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use ptb_random_search::models::{Configuration, EpochRecord};
use ptb_random_search::monitor::Clock;
use ptb_random_search::process::{Launcher, TrialProcess};
use ptb_random_search::search::SearchSession;
use ptb_random_search::store::LOG_FILE_NAME;

pub const SEARCH_NAME: &str = "random_search_base_2024-01-01_00-00-00";

/// Clock that never blocks. Each sleep runs the next scripted action, which
/// is how tests simulate the trainer writing to disk between polls.
pub struct ScriptedClock {
    steps: VecDeque<Box<dyn FnMut()>>,
    pub slept: Vec<Duration>,
    max_sleeps: usize,
}

impl ScriptedClock {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            slept: Vec::new(),
            max_sleeps: 1000,
        }
    }

    pub fn then(mut self, step: impl FnMut() + 'static) -> Self {
        self.steps.push_back(Box::new(step));
        self
    }

    pub fn idle(self) -> Self {
        self.then(|| {})
    }
}

impl Clock for ScriptedClock {
    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
        assert!(
            self.slept.len() <= self.max_sleeps,
            "monitor kept polling past the script"
        );
        if let Some(mut step) = self.steps.pop_front() {
            step();
        }
    }
}

/// Trainer stand-in that counts kill and reap requests. It reports itself as
/// exited unless `running` is set.
#[derive(Debug, Clone, Default)]
pub struct FakeProcess {
    pub kills: Rc<Cell<u32>>,
    pub reaps: Rc<Cell<u32>>,
    pub running: bool,
}

impl TrialProcess for FakeProcess {
    fn id(&self) -> u32 {
        4242
    }

    fn kill(&mut self) -> ptb_random_search::Result<()> {
        self.kills.set(self.kills.get() + 1);
        Ok(())
    }

    fn try_reap(&mut self) -> ptb_random_search::Result<bool> {
        if self.running {
            return Ok(false);
        }
        self.reaps.set(self.reaps.get() + 1);
        Ok(true)
    }
}

/// Launcher that plays the trainer: it creates the run folder named after
/// `save_dir` and writes a fixed log into it.
pub struct FakeLauncher {
    pub workdir: PathBuf,
    pub log: Vec<EpochRecord>,
    pub launched: Vec<Configuration>,
    pub kills: Rc<Cell<u32>>,
    pub reaps: Rc<Cell<u32>>,
}

impl FakeLauncher {
    pub fn new(workdir: &Path, log: Vec<EpochRecord>) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            log,
            launched: Vec::new(),
            kills: Rc::new(Cell::new(0)),
            reaps: Rc::new(Cell::new(0)),
        }
    }
}

impl Launcher for FakeLauncher {
    type Process = FakeProcess;

    fn launch(&mut self, config: &Configuration) -> ptb_random_search::Result<FakeProcess> {
        let prefix = config.get_text("save_dir").expect("save_dir is always set");
        let dir = self.workdir.join(format!("{}lr_run", prefix));
        fs::create_dir_all(&dir)?;
        write_log(&dir, &self.log);

        self.launched.push(config.clone());
        Ok(FakeProcess {
            kills: Rc::clone(&self.kills),
            reaps: Rc::clone(&self.reaps),
            running: false,
        })
    }
}

pub fn record(epoch: u32, train: f64, val: f64) -> EpochRecord {
    EpochRecord::new(epoch, train, val, val)
}

/// Records with the given val perplexities and train = val - 10.
pub fn val_history(vals: &[f64]) -> Vec<EpochRecord> {
    vals.iter()
        .enumerate()
        .map(|(i, v)| record(i as u32, v - 10.0, *v))
        .collect()
}

pub fn log_line(r: &EpochRecord) -> String {
    format!(
        "epoch: {}\ttrain ppl: {}\tval ppl: {}\tbest val: {}\n",
        r.epoch, r.train_ppl, r.val_ppl, r.best_val
    )
}

pub fn write_log(dir: &Path, records: &[EpochRecord]) {
    let content: String = records.iter().map(log_line).collect();
    fs::write(dir.join(LOG_FILE_NAME), content).unwrap();
}

pub fn append_log(dir: &Path, records: &[EpochRecord]) {
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
        .unwrap();
    for r in records {
        file.write_all(log_line(r).as_bytes()).unwrap();
    }
}

pub fn lstm_config() -> Configuration {
    let mut config = Configuration::new();
    config.insert("batch_size", "20");
    config.insert("dp_keep_prob", "0.35");
    config.insert("emb_size", "200");
    config.insert("hidden_size", "1500");
    config.insert("initial_lr", "20");
    config.insert("num_layers", "2");
    config.insert("seq_len", "35");
    config.insert("model", "LSTM");
    config.insert("optimizer", "SGD_LR_SCHEDULE");
    config
}

pub fn session_with_baseline(baseline: Vec<EpochRecord>) -> SearchSession {
    SearchSession::new("base", SEARCH_NAME, lstm_config(), baseline)
}

/// Baseline that every reasonable trial beats.
pub fn weak_baseline(epochs: usize) -> Vec<EpochRecord> {
    (0..epochs)
        .map(|i| record(i as u32, 10_000.0, 10_000.0))
        .collect()
}
