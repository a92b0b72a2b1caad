//! Container entrypoint.
//!
//! ```text
//! entrypoint [--config <PATH>] [--print-config] [--] <COMMAND> [ARGS]...
//!
//!   wait for database ──▶ wait for broker? ──▶ initialize? ──▶ exec COMMAND
//! ```
//!
//! Everything from the first positional argument on is the target command,
//! passed through untouched.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use entrypoint::config::load_config;
use entrypoint::lifecycle::TerminationSignals;
use entrypoint::observability::init_logging;
use entrypoint::{EntrypointConfig, EntrypointError, Launch, Sequencer};

#[derive(Parser)]
#[command(name = "entrypoint", version)]
#[command(about = "Wait for dependencies, initialize, then exec the container command", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults apply without one.
    #[arg(short, long, env = "ENTRYPOINT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Command to exec once dependencies are ready
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present = "print_config"
    )]
    command: Vec<OsString>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let err = EntrypointError::from(e);
            eprintln!("entrypoint: {}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    if cli.print_config {
        return match toml::to_string_pretty(&config) {
            Ok(rendered) => {
                print!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("entrypoint: failed to render configuration: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("entrypoint: failed to initialize logging: {}", e);
    }

    let launch = match prepare(config, cli.command).await {
        Ok(launch) => launch,
        Err(e) => return fail(e),
    };

    match launch.exec() {
        Ok(never) => match never {},
        Err(e) => fail(e.into()),
    }
}

async fn prepare(
    config: EntrypointConfig,
    argv: Vec<OsString>,
) -> Result<Launch, EntrypointError> {
    let mut signals = TerminationSignals::install().map_err(EntrypointError::Signals)?;

    tracing::info!(
        database = %config.database,
        broker = %config.broker,
        interval_secs = config.readiness.interval_secs,
        "entrypoint v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let sequencer = Sequencer::from_config(config);
    signals.guard(sequencer.prepare(argv)).await?
}

fn fail(err: EntrypointError) -> ExitCode {
    tracing::error!(error = %err, "Startup aborted");
    ExitCode::from(err.exit_code())
}
