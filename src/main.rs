use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ptb_random_search::cli::Cli;
use ptb_random_search::error::Result;
use ptb_random_search::monitor::SystemClock;
use ptb_random_search::process::TrainerLauncher;
use ptb_random_search::search::{SearchSession, run_search};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ptb_random_search={},random_search={}",
            level, level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings();

    let session = SearchSession::load(&settings.experiences_dir, &cli.base_xp_name, Local::now())?;
    println!(
        "Random search {} around {} ({} baseline epochs)",
        session.search_name(),
        session.base_name(),
        session.baseline_records().len()
    );

    let mut launcher = TrainerLauncher::new(&settings.trainer, &settings.workdir)?;
    let mut rng = rand::thread_rng();

    let trials = run_search(&session, &settings, &mut launcher, SystemClock, &mut rng)?;
    println!("Finished after {} trials", trials);
    Ok(())
}
