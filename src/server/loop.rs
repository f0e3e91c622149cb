// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How long to wait for in-flight connections after shutdown
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections on `listener` until `state.shutdown_signal` is notified,
/// then wait (bounded) for active connections to finish.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>) {
    let shutdown = Arc::clone(&state.shutdown_signal);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }

    drop(listener);
    logger::log_server_stop();
    drain_connections(&state).await;
}

/// Wait for active connections to reach zero or the drain timeout to elapse
async fn drain_connections(state: &AppState) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;

    loop {
        let active = state
            .active_connections
            .load(std::sync::atomic::Ordering::SeqCst);
        if active == 0 {
            logger::log_info("[Shutdown] All connections closed");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown drain timed out with {active} connection(s) still open"
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::registry::Registry;
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let mut config = Config::defaults().unwrap();
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(config, Registry::default()));

        let server = tokio::spawn(start_server_loop(listener, Arc::clone(&state)));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 307"));
        assert!(response.to_lowercase().contains("location: /static/index.html"));

        state.shutdown_signal.notify_one();
        tokio::time::timeout(Duration::from_secs(10), server)
            .await
            .unwrap()
            .unwrap();
    }
}
