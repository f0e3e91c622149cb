// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGUSR1: Toggle access logging

use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// Start signal handlers (Unix)
///
/// | Signal  | Action                 |
/// |---------|------------------------|
/// | SIGTERM | Graceful stop          |
/// | SIGINT  | Graceful stop (Ctrl+C) |
/// | SIGUSR1 | Toggle access log      |
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigusr1 = signal(SignalKind::user_defined1())?;

    logger::log_info(&format!(
        "[SIGNAL] Handlers registered (pid {}): SIGTERM/SIGINT stop, SIGUSR1 toggles access log",
        std::process::id()
    ));

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    logger::log_info("[SIGNAL] SIGTERM received, shutting down");
                    break;
                }
                _ = sigint.recv() => {
                    logger::log_info("[SIGNAL] SIGINT received, shutting down");
                    break;
                }
                _ = sigusr1.recv() => {
                    let enabled = !state.access_log_enabled();
                    state.set_access_log(enabled);
                    logger::log_info(&format!(
                        "[SIGNAL] SIGUSR1 received, access log {}",
                        if enabled { "enabled" } else { "disabled" }
                    ));
                }
            }
        }
        state.shutdown_signal.notify_one();
    });

    Ok(())
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(state: Arc<AppState>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("[SIGNAL] Ctrl+C received, shutting down");
            state.shutdown_signal.notify_one();
        }
    });
    Ok(())
}
