use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use invoke_burst_core::{execute, load, RunError, RunSummary, DEFAULT_CONFIG_PATH};
use invoke_burst_lambda::adapters::invoke::connect;
use invoke_burst_lambda::logging;

#[derive(Parser)]
#[command(
    name = "invoke_burst",
    about = "Invoke a Lambda function concurrently and collect the responses",
    long_about = "Reads the run configuration, issues CallCount concurrent\n\
                  RequestResponse invocations of Function, and streams every\n\
                  successful payload into ResultFile as a JSON array."
)]
struct Cli {
    /// Path of the JSON run configuration
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn run(cli: &Cli) -> Result<RunSummary, RunError> {
    let config = load(&cli.config)?;
    execute(&config, connect).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match run(&cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "invocation run aborted");
            ExitCode::FAILURE
        }
    }
}
