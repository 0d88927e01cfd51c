use clap::Parser;
use pod_triage::cli::Cli;
use pod_triage::config;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> pod_triage::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let config = config::load_config(cli.config.as_deref())?;
    pod_triage::run_command(cli.command, &config)
}
