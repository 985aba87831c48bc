//! Same-class rival tracking for sim racing telemetry.
//!
//! Slipstream turns periodic telemetry snapshots into a per-tick view of the nearest
//! rivals in the subject driver's class: who is ahead and behind, how fast each car is
//! lapping, how big the gap is and how many laps it will take to close.
//!
//! # Features
//!
//! - **Synchronous core**: [`RivalEngine::tick`] runs Ingest → Gate → Select → Project
//!   with no I/O, so it can be driven from any loop
//! - **Recency-weighted pace**: older laps fade geometrically
//! - **Transport agnostic**: one narrow [`SnapshotProvider`] trait per telemetry source
//! - **Async surface**: [`RivalConnection`] ticks the engine on a Tokio task and streams
//!   immutable updates
//!
//! ## Example (driving the engine directly)
//!
//! ```rust
//! use slipstream::{CarSample, RivalEngine, Snapshot};
//!
//! let mut engine = RivalEngine::default();
//! let snapshot = Snapshot::new()
//!     .with_subject(0)
//!     .with_session_type("Race")
//!     .with_car(CarSample::new(0).with_position(2).with_class_position(2).with_lap(1))
//!     .with_car(CarSample::new(1).with_position(1).with_class_position(1).with_lap(1));
//!
//! let update = engine.tick(Some(&snapshot)).expect("snapshot produces an update");
//! assert!(update.is_race_active);
//! assert_eq!(update.rivals_ahead.len(), 1);
//! ```
//!
//! ## Example (replaying a recording)
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use slipstream::{RivalConfig, RivalConnection, format};
//!
//! #[tokio::main]
//! async fn main() -> slipstream::Result<()> {
//!     let config = RivalConfig::default();
//!     let precision = config.laps_precision;
//!     let connection = RivalConnection::open("race.yaml", config).await?;
//!     let mut updates = Box::pin(connection.updates());
//!
//!     while let Some(update) = updates.next().await {
//!         for rival in &update.rivals_ahead {
//!             println!("{}: {}", rival.rival.name, format::catch_text(rival, precision));
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core pipeline
pub mod config;
pub mod engine;
mod error;
pub mod format;
pub mod pace;
pub mod projector;
pub mod rivals;
pub mod session;
pub mod store;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Stream-based surface
pub mod connection;
pub mod driver;
pub mod provider;
pub mod providers;

// Core exports
pub use config::RivalConfig;
pub use engine::RivalEngine;
pub use error::*;
pub use types::*;

// Main API exports
pub use connection::RivalConnection;
pub use provider::SnapshotProvider;
pub use providers::{ChannelProvider, Recording, ReplayProvider, SnapshotSender};
