//! Channel provider for externally driven transports
//!
//! A transport adapter running on its own thread or task pushes decoded snapshots through
//! a [`SnapshotSender`]. The provider hands the engine only the newest snapshot on each
//! call, so a slow consumer never works through a backlog.

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::provider::SnapshotProvider;
use crate::types::Snapshot;
use crate::{Result, RivalError};

/// Message from a transport adapter
#[derive(Debug, Clone)]
enum TransportEvent {
    Snapshot(Box<Snapshot>),
    Disconnected,
}

/// Sending half handed to the transport adapter
#[derive(Debug, Clone)]
pub struct SnapshotSender {
    tx: mpsc::Sender<TransportEvent>,
}

impl SnapshotSender {
    /// Queue a snapshot. Fails only when the provider has been dropped.
    pub async fn send(&self, snapshot: Snapshot) -> Result<()> {
        self.tx
            .send(TransportEvent::Snapshot(Box::new(snapshot)))
            .await
            .map_err(|_| RivalError::provider_failed("snapshot receiver dropped"))
    }

    /// Queue a snapshot without waiting for capacity.
    pub fn try_send(&self, snapshot: Snapshot) -> Result<()> {
        self.tx
            .try_send(TransportEvent::Snapshot(Box::new(snapshot)))
            .map_err(|e| RivalError::provider_failed(format!("snapshot not queued: {e}")))
    }

    /// Report that the simulator disconnected.
    pub async fn disconnected(&self) -> Result<()> {
        self.tx
            .send(TransportEvent::Disconnected)
            .await
            .map_err(|_| RivalError::provider_failed("snapshot receiver dropped"))
    }
}

/// Latest-wins provider fed by a [`SnapshotSender`]
#[derive(Debug)]
pub struct ChannelProvider {
    rx: mpsc::Receiver<TransportEvent>,
    tick_rate: f64,
}

impl ChannelProvider {
    /// Create a provider and its sender.
    ///
    /// `capacity` bounds how many snapshots can be queued between two ticks.
    pub fn new(capacity: usize, tick_rate: f64) -> (SnapshotSender, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (SnapshotSender { tx }, Self { rx, tick_rate })
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for ChannelProvider {
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        // Wait for at least one event, then drain whatever else is already queued
        let mut latest = match self.rx.recv().await {
            Some(TransportEvent::Snapshot(snapshot)) => snapshot,
            Some(TransportEvent::Disconnected) => return Err(RivalError::Disconnected),
            None => {
                debug!("All snapshot senders dropped");
                return Ok(None);
            }
        };

        let mut skipped = 0usize;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                TransportEvent::Snapshot(snapshot) => {
                    latest = snapshot;
                    skipped += 1;
                }
                TransportEvent::Disconnected => return Err(RivalError::Disconnected),
            }
        }

        if skipped > 0 {
            trace!(skipped, "Dropped stale snapshots");
        }

        Ok(Some(*latest))
    }

    fn tick_rate(&self) -> f64 {
        self.tick_rate
    }
}
