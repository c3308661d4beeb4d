//! circdemo CLI - circular uniformity demonstration
//!
//! Usage: `circdemo [config.yaml]`. Prints the p-value lines of each
//! scenario to stdout and writes plot files; logs go to stderr.

use std::process::ExitCode;

use circdemo::config::DemoConfig;
use circdemo::scenarios::{run_config, write_plots};
use circdemo::DemoResult;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> DemoResult<()> {
    let config = match config_path {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    let outcomes = run_config(&config)?;
    for outcome in &outcomes {
        for line in &outcome.report.lines {
            println!("{line}");
        }
    }

    if config.plot.enabled {
        write_plots(&config.plot, &outcomes)?;
    }
    Ok(())
}
