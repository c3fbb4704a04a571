mod aws;
mod cli;
mod fzf;
mod kubectl;
mod process;
mod prompt;
mod session;
mod summary;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use fancylogin_config::EnvConfig;
use fancylogin_terminal::Reporter;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::session::{Options, Session};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", Cli::version_text());
        return ExitCode::SUCCESS;
    }

    let env = EnvConfig::from_env();
    let verbose = cli.verbose || env.verbose;

    // RUST_LOG wins; otherwise -v or the environment flags turn on debug output.
    let default_level = if verbose || env.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();
    tracing::debug!("environment: {env:?}");

    let options = Options { verbose, launch_k9s: cli.k9s, force_login: cli.force_aws_login };
    let mut session = Session::new(&env, options);
    let result = match cli.wizard_request() {
        Some(mode) => session.run_wizard(mode),
        None => session.run().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Reporter::new(verbose).error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
