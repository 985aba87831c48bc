//! Core value types for rival tracking.
//!
//! - [`Snapshot`] and [`CarSample`] describe one tick of decoded telemetry
//! - [`LapRecord`] and [`LapHistory`] hold completed laps, bounded to
//!   [`LAP_HISTORY_CAPACITY`] per car
//! - [`CarState`] is the mutable per-car record owned by the store
//! - [`RaceUpdate`], [`RivalProjection`] and [`CarSnapshot`] are the immutable per-tick
//!   output handed to the presentation layer
//!
//! ## Usage Example
//!
//! ```rust
//! use slipstream::types::{CarState, LAP_HISTORY_CAPACITY};
//!
//! let mut car = CarState::new(12, "Jane Doe", 4, true);
//! for lap in 1..=25 {
//!     car.record_lap(lap, 90.0, lap as f64 * 90.0);
//! }
//!
//! assert_eq!(car.history().len(), LAP_HISTORY_CAPACITY);
//! assert_eq!(car.history().oldest().map(|l| l.lap_number()), Some(6));
//! ```

mod car;
mod lap;
mod snapshot;
mod update;

pub use car::{CarState, UNKNOWN_DRIVER_NAME};
pub use lap::{LAP_HISTORY_CAPACITY, LapHistory, LapRecord};
pub use snapshot::{CarSample, MAX_CARS, Snapshot};
pub use update::{CarSnapshot, CatchOutlook, RaceUpdate, RivalProjection};
