//! Provider trait for snapshot sources

use crate::Result;
use crate::types::Snapshot;

/// Trait for telemetry snapshot sources
///
/// Providers adapt one transport (simulator SDK, network relay, recording) to the
/// decoded [`Snapshot`] the engine consumes. The core never depends on anything
/// transport specific.
#[async_trait::async_trait]
pub trait SnapshotProvider: Send + 'static {
    /// Get the newest telemetry snapshot
    ///
    /// Returns:
    /// - `Ok(Some(snapshot))` - Snapshot available
    /// - `Ok(None)` - Source ended (normal termination)
    /// - `Err(RivalError::Disconnected)` - Simulator went away; accumulated state is stale
    /// - `Err(e)` - Any other transport error
    ///
    /// The driver abandons this future when it does not resolve within one tick, so
    /// implementations must not lose data when dropped mid-await.
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>>;

    /// Get the native snapshot rate in Hz
    fn tick_rate(&self) -> f64;
}
