//! # Session Resolution and Gating
//!
//! Decides whether a snapshot belongs to an active, multi-car race worth reporting.
//!
//! - [`SessionSchedule`] models the simulator's session list and resolves a session
//!   number into its type label ("Practice", "Qualify", "Race", ...)
//! - [`is_race_active`] gates on that label and on the number of classified cars
//!
//! Resolution failures never propagate: an unknown session is simply not active.

mod gate;
mod schedule;

pub use gate::{MIN_CLASSIFIED_CARS, RACE_SESSION_MARKER, is_race_active};
pub use schedule::{Session, SessionSchedule};
