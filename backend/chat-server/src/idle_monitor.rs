use chat_ws::{ConnectionRegistry, ShutdownCoordinator};

use std::time::Duration;

use log::{info, warn};
use tokio::task::JoinHandle;

/// Longest wait before the first idle check
const MAX_GRACE_PERIOD_SECS: u64 = 60;
const MIN_CHECK_INTERVAL_SECS: u64 = 10;

/// Trigger `shutdown` once the registry has stayed empty for two consecutive
/// checks.
///
/// The first check waits a grace period so a freshly started server is not
/// shut down before its first client arrives. The task also ends when
/// shutdown is triggered elsewhere.
pub fn spawn_idle_monitor(
    registry: ConnectionRegistry,
    shutdown: ShutdownCoordinator,
    idle_timeout_secs: u64,
) -> JoinHandle<()> {
    let mut guard = shutdown.subscribe_guard();

    tokio::spawn(async move {
        tokio::select! {
            _ = watch(&registry, &shutdown, idle_timeout_secs) => {}
            _ = guard.wait() => {}
        }
    })
}

async fn watch(
    registry: &ConnectionRegistry,
    shutdown: &ShutdownCoordinator,
    idle_timeout_secs: u64,
) {
    let grace_period = idle_timeout_secs.min(MAX_GRACE_PERIOD_SECS);
    let check_interval =
        Duration::from_secs((idle_timeout_secs / 2).max(MIN_CHECK_INTERVAL_SECS));

    info!("Idle shutdown enabled: {idle_timeout_secs}s timeout, {grace_period}s grace period");
    tokio::time::sleep(Duration::from_secs(grace_period)).await;

    loop {
        tokio::time::sleep(check_interval).await;

        if registry.total_count().await > 0 {
            continue;
        }

        info!(
            "No active connections, checking again in {}s",
            check_interval.as_secs()
        );
        tokio::time::sleep(check_interval).await;

        if registry.total_count().await == 0 {
            warn!("No connections for {idle_timeout_secs}s, initiating auto-shutdown");
            shutdown.shutdown();
            return;
        }
        info!("Connection established, continuing");
    }
}
