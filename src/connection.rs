//! Consumer-facing connection to a running rival engine

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RivalConfig;
use crate::driver::Driver;
use crate::engine::RivalEngine;
use crate::provider::SnapshotProvider;
use crate::providers::ReplayProvider;
use crate::types::RaceUpdate;
use crate::Result;

/// Handle to a rival engine ticking in the background
///
/// The engine runs on its own task until the connection is dropped or the snapshot source
/// ends. Any number of consumers can read updates through [`RivalConnection::updates`].
pub struct RivalConnection {
    /// Update watch receiver
    updates: watch::Receiver<Option<Arc<RaceUpdate>>>,

    /// Configuration the engine was started with
    config: RivalConfig,

    /// Source frequency
    source_hz: f64,

    /// Cancellation token for stopping the driver
    cancel: CancellationToken,
}

impl RivalConnection {
    /// Start ticking the engine against a snapshot provider.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<P>(provider: P, config: RivalConfig) -> Result<Self>
    where
        P: SnapshotProvider,
    {
        config.validate()?;

        let source_hz = provider.tick_rate();
        let period = config.update_interval();
        let channels = Driver::spawn(provider, RivalEngine::new(config.clone()), period);

        info!("Rival connection started ({:?} ticks, source {}Hz)", period, source_hz);

        Ok(Self { updates: channels.updates, config, source_hz, cancel: channels.cancel })
    }

    /// Replay a recorded session.
    ///
    /// Waits for the first update before returning so callers can read
    /// [`RivalConnection::current`] immediately.
    pub async fn open<P: AsRef<Path>>(path: P, config: RivalConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening recording: {}", path.display());

        let provider = ReplayProvider::open(path)?;
        let connection = Self::start(provider, config)?;

        let mut rx = connection.updates.clone();
        let timeout = Duration::from_secs(5);
        let wait_result = tokio::time::timeout(timeout, async {
            while rx.changed().await.is_ok() {
                if rx.borrow().is_some() {
                    break;
                }
            }
        })
        .await;

        if wait_result.is_err() {
            warn!("Timeout waiting for first update from recording");
        }

        Ok(connection)
    }

    /// Stream of race updates
    ///
    /// A slow consumer only ever sees the latest update. The stream ends when the
    /// snapshot source ends or the connection is dropped.
    pub fn updates(&self) -> impl Stream<Item = Arc<RaceUpdate>> + 'static {
        WatchStream::new(self.updates.clone()).filter_map(|opt| async move { opt })
    }

    /// Latest race update, if one has been published
    pub fn current(&self) -> Option<Arc<RaceUpdate>> {
        self.updates.borrow().clone()
    }

    pub fn config(&self) -> &RivalConfig {
        &self.config
    }

    /// Tick period of the engine
    pub fn update_interval(&self) -> Duration {
        self.config.update_interval()
    }

    /// Get the source snapshot frequency
    pub fn source_hz(&self) -> f64 {
        self.source_hz
    }
}

impl Drop for RivalConnection {
    fn drop(&mut self) {
        debug!("Dropping rival connection");
        self.cancel.cancel();
    }
}
