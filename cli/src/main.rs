//! oxy: build the ALICE O2 software stack inside a docker container.

use std::process::ExitCode;

use clap::Parser;
use oxy_cli::app::AppContext;
use oxy_cli::application::services::cleanup;
use oxy_cli::cli::Cli;
use oxy_cli::domain::RunError;
use oxy_cli::infra::signal::shutdown_signal;
use tracing_subscriber::EnvFilter;

/// Exit code after an interrupt (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let flags = cli.flags();
    init_tracing(flags.verbose);

    let app = AppContext::new(&flags);
    let mut cleanup = cleanup::spawn(app.registry.clone(), shutdown_signal());

    // A killed `docker run` can fail the command in the same poll that the
    // release completes; the interrupt wins either way.
    let result = tokio::select! {
        biased;
        released = cleanup.interrupted() => {
            tracing::debug!(released, "interrupted");
            Err(RunError::Interrupted.into())
        }
        res = cli.run(&app) => res,
    };
    let result = match result {
        Err(e) if cleanup.signalled() && e.downcast_ref::<RunError>().is_none() => {
            tracing::debug!(error = %format!("{e:#}"), "command failed after interrupt");
            Err(RunError::Interrupted.into())
        }
        other => other,
    };

    let released = app.registry.release_all().await;
    if released > 0 {
        tracing::debug!(released, "removed leftover containers");
    }
    if cleanup.signalled() {
        app.registry.sweep_released().await;
    }

    match result {
        Ok(code) => code,
        Err(e) => {
            app.output.error(&format!("Error: {e:#}"));
            if e.downcast_ref::<RunError>().is_some() {
                ExitCode::from(EXIT_INTERRUPTED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
