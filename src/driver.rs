//! Driver spawns and manages the tick loop task

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::engine::RivalEngine;
use crate::provider::SnapshotProvider;
use crate::types::RaceUpdate;

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Receiver for race updates (`None` until the first update and after the source ends)
    pub updates: watch::Receiver<Option<Arc<RaceUpdate>>>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the tick loop task
///
/// A single task owns both the provider and the engine, so the car state store is only
/// ever touched from one place. Consumers receive immutable `Arc<RaceUpdate>` values.
pub struct Driver;

impl Driver {
    /// Consecutive provider errors tolerated before the loop gives up
    pub const MAX_ERRORS: u32 = 10;

    /// Spawn the tick loop for the given provider and engine
    ///
    /// Returns a watch receiver for updates plus a cancellation token for graceful
    /// shutdown.
    pub fn spawn<P>(provider: P, engine: RivalEngine, period: Duration) -> DriverChannels
    where
        P: SnapshotProvider,
    {
        let (update_tx, update_rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::tick_loop_task(provider, engine, period, update_tx, cancel_task).await;
        });

        DriverChannels { updates: update_rx, cancel }
    }

    /// Tick loop task - one Ingest → Gate → Select → Project → Emit cycle per period
    async fn tick_loop_task<P>(
        mut provider: P,
        mut engine: RivalEngine,
        period: Duration,
        update_tx: watch::Sender<Option<Arc<RaceUpdate>>>,
        cancel: CancellationToken,
    ) where
        P: SnapshotProvider,
    {
        info!("Tick loop started ({:?} period, source {}Hz)", period, provider.tick_rate());
        let mut ticks = 0u64;
        let mut skipped = 0u64;
        let mut error_count = 0u32;

        let mut interval = tokio::time::interval(period);
        // Late ticks are dropped, never queued
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Tick loop cancelled");
                    break;
                }
                _ = interval.tick() => {}
            }

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Tick loop cancelled during read");
                    break;
                }
                result = tokio::time::timeout(period, provider.next_snapshot()) => result,
            };

            let snapshot = match result {
                Err(_) => {
                    skipped += 1;
                    trace!("No snapshot within {:?}, skipping tick", period);
                    continue;
                }
                Ok(Ok(Some(snapshot))) => {
                    error_count = 0;
                    snapshot
                }
                Ok(Ok(None)) => {
                    info!("Snapshot source ended after {} ticks", ticks);
                    let _ = update_tx.send(None);
                    break;
                }
                Ok(Err(e)) if e.is_disconnect() => {
                    info!("Telemetry source disconnected, clearing session state");
                    engine.reset();
                    let inactive = RaceUpdate::inactive(None);
                    if update_tx.send(Some(Arc::new(inactive))).is_err() {
                        debug!("Update receiver dropped, shutting down");
                        break;
                    }
                    continue;
                }
                Ok(Err(e)) => {
                    // Provider error - don't crash on transient failures
                    error_count += 1;
                    warn!("Provider error ({}/{}): {}", error_count, Self::MAX_ERRORS, e);

                    if error_count >= Self::MAX_ERRORS {
                        error!("Too many provider errors, shutting down");
                        let _ = update_tx.send(None);
                        break;
                    }

                    // Exponential backoff: 100ms, 200ms, 400ms, ...
                    let backoff = Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::time::sleep(backoff).await;
                    continue;
                }
            };

            let Some(update) = engine.tick(Some(&snapshot)) else {
                continue;
            };
            ticks += 1;

            trace!(
                "Tick {}: active={}, ahead={}, behind={}",
                ticks,
                update.is_race_active,
                update.rivals_ahead.len(),
                update.rivals_behind.len()
            );

            if update_tx.send(Some(Arc::new(update))).is_err() {
                debug!("Update receiver dropped, shutting down");
                break;
            }
        }

        info!("Tick loop ended ({} ticks, {} skipped)", ticks, skipped);
    }
}
