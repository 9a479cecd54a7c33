//! OS interrupt handling.

/// Resolves on the first SIGINT or SIGTERM (Ctrl-C elsewhere).
///
/// If a handler cannot be installed the failure is logged and the returned
/// future never resolves, so the program keeps running without cleanup on
/// interrupt rather than tearing down containers spuriously.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (mut interrupt, mut terminate) =
            match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
                (Ok(i), Ok(t)) => (i, t),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!(error = %e, "cannot install signal handlers");
                    return std::future::pending().await;
                }
            };
        tokio::select! {
            _ = interrupt.recv() => tracing::debug!("received SIGINT"),
            _ = terminate.recv() => tracing::debug!("received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
