//! Derived per-tick output: car snapshots, rival projections and the race update

use serde::{Deserialize, Serialize};

use super::CarState;

/// Immutable copy of a car's state at emission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CarSnapshot {
    pub car_id: usize,
    pub name: String,
    pub class_id: i32,
    pub position_in_class: i32,
    pub current_lap: i32,
    pub lap_fraction: f64,
    pub is_subject: bool,
    pub last_lap_time: Option<f64>,
    /// Number of laps currently held in the car's history
    pub laps_recorded: usize,
    /// Recency-weighted pace in seconds per lap
    pub pace: Option<f64>,
}

impl CarSnapshot {
    pub fn capture(car: &CarState, pace: Option<f64>) -> Self {
        Self {
            car_id: car.car_id,
            name: car.name.clone(),
            class_id: car.class_id,
            position_in_class: car.position_in_class,
            current_lap: car.current_lap,
            lap_fraction: car.lap_fraction,
            is_subject: car.is_subject,
            last_lap_time: car.last_lap_time(),
            laps_recorded: car.history().len(),
            pace,
        }
    }
}

/// Gap and catch-up projection between the subject and one rival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RivalProjection {
    pub subject_car_id: usize,
    pub rival: CarSnapshot,
    /// Whether the rival runs ahead of the subject in class
    pub is_ahead: bool,
    /// Rival pace minus subject pace; positive means the subject is faster.
    /// Zero when either pace is unknown.
    pub pace_advantage: f64,
    /// Gap in fractions of a lap
    pub distance_delta: Option<f64>,
    /// Gap in seconds
    pub time_delta: Option<f64>,
    /// Laps until the gap closes at current relative pace
    pub laps_to_catch: Option<f64>,
}

/// Verdict on whether a gap is going to close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum CatchOutlook {
    /// The gap closes in the given number of laps
    Closing { laps: f64 },
    /// The chasing car is not gaining
    WontCatch,
    /// No meaningful projection (pace unknown or equal)
    Undetermined,
}

impl RivalProjection {
    pub fn outlook(&self) -> CatchOutlook {
        if let Some(laps) = self.laps_to_catch {
            return CatchOutlook::Closing { laps };
        }
        if self.time_delta.is_none() {
            return CatchOutlook::Undetermined;
        }

        let not_gaining =
            if self.is_ahead { self.pace_advantage <= 0.0 } else { self.pace_advantage >= 0.0 };

        if not_gaining { CatchOutlook::WontCatch } else { CatchOutlook::Undetermined }
    }
}

/// Result of one tick, handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RaceUpdate {
    pub is_race_active: bool,
    pub session_time: Option<f64>,
    pub subject: Option<CarSnapshot>,
    /// Rivals ahead, closest last
    pub rivals_ahead: Vec<RivalProjection>,
    /// Rivals behind, closest first
    pub rivals_behind: Vec<RivalProjection>,
}

impl RaceUpdate {
    pub fn inactive(session_time: Option<f64>) -> Self {
        Self { session_time, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(is_ahead: bool, pace_advantage: f64, laps: Option<f64>) -> RivalProjection {
        RivalProjection {
            subject_car_id: 0,
            rival: CarSnapshot::capture(&CarState::new(1, "Rival", 1, false), None),
            is_ahead,
            pace_advantage,
            distance_delta: Some(0.1),
            time_delta: Some(9.0),
            laps_to_catch: laps,
        }
    }

    #[test]
    fn outlook_for_car_ahead() {
        assert_eq!(
            projection(true, 1.0, Some(9.0)).outlook(),
            CatchOutlook::Closing { laps: 9.0 }
        );
        assert_eq!(projection(true, -0.5, None).outlook(), CatchOutlook::WontCatch);
        assert_eq!(projection(true, 0.0, None).outlook(), CatchOutlook::WontCatch);
        assert_eq!(projection(true, 0.0005, None).outlook(), CatchOutlook::Undetermined);
    }

    #[test]
    fn outlook_for_car_behind() {
        assert_eq!(
            projection(false, -2.0, Some(4.5)).outlook(),
            CatchOutlook::Closing { laps: 4.5 }
        );
        assert_eq!(projection(false, 0.3, None).outlook(), CatchOutlook::WontCatch);
        assert_eq!(projection(false, 0.0, None).outlook(), CatchOutlook::WontCatch);
        assert_eq!(projection(false, -0.0005, None).outlook(), CatchOutlook::Undetermined);
    }

    #[test]
    fn outlook_without_pace_is_undetermined() {
        let known = projection(true, 0.0, None);
        let unknown = RivalProjection { time_delta: None, distance_delta: None, ..known };
        assert_eq!(unknown.outlook(), CatchOutlook::Undetermined);
    }

    #[test]
    fn inactive_update_is_empty() {
        let update = RaceUpdate::inactive(Some(12.0));
        assert!(!update.is_race_active);
        assert!(update.subject.is_none());
        assert!(update.rivals_ahead.is_empty());
        assert!(update.rivals_behind.is_empty());
        assert_eq!(update.session_time, Some(12.0));
    }
}
