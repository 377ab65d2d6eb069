use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use loose_end::cli::parser::Cli;
use loose_end::prompt::TerminalPrompter;
use loose_end::run::{self, RunContext};

fn init_tracing(debug: bool) {
    let default_level = if debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let context = match RunContext::from_env() {
        Ok(context) => context,
        Err(err) => {
            eprintln!("❌ Failed to read the current directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut prompter = TerminalPrompter::new();
    match run::run(cli, context, &mut prompter, None).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}
