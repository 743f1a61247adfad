use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};
use vrating::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}
