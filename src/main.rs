// Entry point for the Sheets analyst bootstrap.
//
// **Architecture Overview:**
// - `core/` = Start-up rules and the tool server hand-off (no env, no processes)
// - `infra/` = Environment, key file, and child process plumbing
//
// This file's job is to:
// 1. Set up logging (on stderr, stdout belongs to the tool server)
// 2. Resolve and validate the runtime configuration
// 3. Launch the Google Sheets tool server and bridge stdio to it

#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::bootstrap::{BootstrapConfigurator, ModelSettings};
use crate::core::tool_server::{ToolServerCommand, ToolServerService};
use crate::core::AppError;
use crate::infra::config::{service_account, EnvConfigSource};
use crate::infra::tool_server::StdioBridge;
use std::future::Future;
use tracing_subscriber::EnvFilter;

async fn run() -> Result<(), AppError> {
    let source = EnvConfigSource::new();

    // Nothing below this line runs unless all three required values check out.
    let config = BootstrapConfigurator::new(source).resolve()?;

    let model = ModelSettings::from_source(&source);
    tracing::info!(
        base_url = %model.base_url,
        model = %model.model,
        "Bootstrap complete"
    );

    service_account::log_identity(config.service_account_path()).await;

    let bridge = StdioBridge::new(tokio::io::stdin(), tokio::io::stdout());
    let service = ToolServerService::new(bridge, ToolServerCommand::from_source(&source));
    service.run(&config).await?;

    Ok(())
}

/// Drives `future` on a fresh multi-threaded runtime, then shuts the runtime
/// down without waiting on blocking tasks.
///
/// Host stdin is read on a blocking thread that can't be cancelled, so a
/// normal shutdown would hang until the host sends another byte.
fn block_on_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with tool server traffic.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables from .env file (if it exists)
    EnvConfigSource::load_dotenv();

    match block_on_detached(run())? {
        Ok(()) => Ok(()),
        Err(e) if e.is_bootstrap() => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(anyhow::Error::new(e).context("Tool server session failed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_shutdown_does_not_wait_for_blocked_reads() {
        let (done_tx, done_rx) = mpsc::channel();

        std::thread::spawn(move || {
            // `_hold` keeps the blocking task parked until this thread ends.
            let (_hold, parked) = mpsc::channel::<()>();
            let output = block_on_detached(async move {
                let (started_tx, started_rx) = tokio::sync::oneshot::channel();
                tokio::task::spawn_blocking(move || {
                    let _ = started_tx.send(());
                    let _ = parked.recv();
                });
                started_rx.await.unwrap();
                7
            })
            .unwrap();
            done_tx.send(output).unwrap();
        });

        assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)), Ok(7));
    }
}
