use tokio::signal;
use tracing::warn;

pub async fn listen_for_shutdown() {
    // tunggu sinyal Ctrl+C
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Sinyal shutdown diterima, memulai graceful shutdown...");
}
