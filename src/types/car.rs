//! Per-car state owned by the car state store

use super::{LapHistory, LapRecord};

/// Display name used when the telemetry does not provide one.
pub const UNKNOWN_DRIVER_NAME: &str = "Unknown";

/// Mutable record of one car for the lifetime of a connected session.
#[derive(Debug, Clone, PartialEq)]
pub struct CarState {
    /// Car index, stable for the session
    pub car_id: usize,
    /// Driver display name
    pub name: String,
    /// Car class identifier, fixed at creation
    pub class_id: i32,
    /// Position within the car's class (<= 0 means not classified)
    pub position_in_class: i32,
    /// Lap the car is currently on
    pub current_lap: i32,
    /// Progress around the current lap, in [0, 1)
    pub lap_fraction: f64,
    /// Whether this car is the subject, fixed at creation
    pub is_subject: bool,
    last_lap_time: Option<f64>,
    history: LapHistory,
}

impl CarState {
    pub fn new(car_id: usize, name: impl Into<String>, class_id: i32, is_subject: bool) -> Self {
        Self {
            car_id,
            name: name.into(),
            class_id,
            position_in_class: 0,
            current_lap: 0,
            lap_fraction: 0.0,
            is_subject,
            last_lap_time: None,
            history: LapHistory::new(),
        }
    }

    /// Record a completed lap.
    ///
    /// Returns `false` without touching the history when the lap time is not strictly
    /// positive.
    pub fn record_lap(&mut self, lap_number: i32, lap_time: f64, session_time: f64) -> bool {
        match LapRecord::new(lap_number, lap_time, session_time) {
            Some(record) => {
                self.history.push(record);
                self.last_lap_time = Some(lap_time);
                true
            }
            None => false,
        }
    }

    /// Completed laps, oldest first
    pub fn history(&self) -> &LapHistory {
        &self.history
    }

    /// Time of the most recently recorded lap
    pub fn last_lap_time(&self) -> Option<f64> {
        self.last_lap_time
    }

    /// Whether the car currently holds a class position
    pub fn is_classified(&self) -> bool {
        self.position_in_class > 0
    }

    /// Track progress expressed in laps (lap number plus fraction)
    pub fn track_progress(&self) -> f64 {
        self.current_lap as f64 + self.lap_fraction
    }
}
