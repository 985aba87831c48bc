//! Snapshot provider implementations
//!
//! - [`channel`]: latest-wins adapter for transports that push snapshots from elsewhere
//! - [`replay`]: plays back a recorded session from YAML

pub mod channel;
pub mod replay;

pub use channel::{ChannelProvider, SnapshotSender};
pub use replay::{RecordedFrame, Recording, ReplayProvider};
