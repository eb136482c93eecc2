//! Process shutdown signals.

use std::future::Future;

use tracing::{info, warn};

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
///
/// The SIGTERM handler is installed when this is called, not when the
/// returned future is first polled, so a signal arriving in between is
/// not lost. A handler that cannot be installed only disables its branch.
pub fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate());

    async move {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match terminate {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    warn!(error = %err, "failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => info!("Received Ctrl+C signal"),
            () = terminate => info!("Received terminate signal"),
        }
    }
}
