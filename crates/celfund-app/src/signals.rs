//! OS signal handling for graceful shutdown

use tokio::sync::{mpsc, watch};

use celfund_core::prelude::*;

use crate::message::Message;

/// Spawn a task that turns SIGINT/SIGTERM into `Message::Quit`.
///
/// The task exits quietly once the engine signals shutdown.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>, mut shutdown_rx: watch::Receiver<bool>) {
    tokio::spawn(async move {
        tokio::select! {
            result = wait_for_signal() => {
                if let Err(e) = result {
                    error!("Signal handler error: {}", e);
                    return;
                }
                info!("Shutdown signal received");
                let _ = tx.send(Message::Quit).await;
            }
            _ = shutdown_rx.changed() => {}
        }
    });
}

/// Wait for a termination signal
async fn wait_for_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())
            .map_err(|e| Error::terminal(format!("Failed to create SIGINT handler: {}", e)))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| Error::terminal(format!("Failed to create SIGTERM handler: {}", e)))?;

        tokio::select! {
            _ = sigint.recv() => info!("Received SIGINT"),
            _ = sigterm.recv() => info!("Received SIGTERM"),
        }

        Ok(())
    }

    #[cfg(windows)]
    {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::terminal(format!("Failed to listen for Ctrl+C: {}", e)))?;
        info!("Received Ctrl+C");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signal_handler_stops_on_shutdown() {
        let (tx, mut rx) = mpsc::channel::<Message>(1);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        spawn_signal_handler(tx, shutdown_rx);
        shutdown_tx.send(true).unwrap();

        // The handler drops its sender without sending anything
        let next = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(next, Ok(None)));
    }
}
