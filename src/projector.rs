//! Catch-up projection between the subject and a rival
//!
//! Converts two cars' weighted paces and track positions into a distance gap (fractions
//! of a lap), a time gap (seconds) and, when one car is actually gaining on the other,
//! the number of laps until the gap closes.
//!
//! The projection assumes both paces stay constant. It does not model pace trends, so
//! it is inaccurate across large pace swings such as pit stops.

use crate::pace::PaceEstimator;
use crate::types::{CarSnapshot, CarState, RivalProjection};

/// Pace differences smaller than this (seconds per lap) do not produce a projection.
pub const MIN_PACE_DIFFERENCE: f64 = 0.001;

/// Gap to a rival in fractions of a lap, corrected for lap-boundary crossings.
///
/// A rival that is ahead but appears more than half a lap behind has just crossed the
/// line in front of the subject (or the subject just crossed it); the mirror case applies
/// for rivals behind.
pub fn distance_delta(subject: &CarState, rival: &CarState, is_ahead: bool) -> f64 {
    let lap_diff = (rival.current_lap - subject.current_lap) as f64;
    let pos_diff = rival.lap_fraction - subject.lap_fraction;
    let mut total = lap_diff + pos_diff;

    if is_ahead && total < -0.5 {
        total += 1.0;
    } else if !is_ahead && total > 0.5 {
        total -= 1.0;
    }

    total.abs()
}

/// Laps until the chasing car closes `time_delta` seconds at `pace_advantage` s/lap.
///
/// `None` when the difference is below [`MIN_PACE_DIFFERENCE`], when the chasing car is
/// not the faster one, or when the result is not strictly positive.
pub fn laps_to_catch(time_delta: f64, pace_advantage: f64, is_ahead: bool) -> Option<f64> {
    if pace_advantage.abs() < MIN_PACE_DIFFERENCE {
        return None;
    }

    let closing_rate = match is_ahead {
        true if pace_advantage > 0.0 => pace_advantage,
        false if pace_advantage < 0.0 => pace_advantage.abs(),
        _ => return None,
    };

    Some(time_delta / closing_rate).filter(|laps| *laps > 0.0)
}

/// Builds [`RivalProjection`]s using one pace configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CatchUpProjector {
    pace: PaceEstimator,
}

impl CatchUpProjector {
    pub fn new(pace: PaceEstimator) -> Self {
        Self { pace }
    }

    pub fn pace(&self) -> &PaceEstimator {
        &self.pace
    }

    /// Project the gap between `subject` and `rival`.
    ///
    /// When either car has no pace yet the projection only carries identity: zero pace
    /// advantage and no gap or catch data.
    pub fn project(&self, subject: &CarState, rival: &CarState, is_ahead: bool) -> RivalProjection {
        let subject_pace = self.pace.estimate(subject);
        let rival_pace = self.pace.estimate(rival);

        let mut projection = RivalProjection {
            subject_car_id: subject.car_id,
            rival: CarSnapshot::capture(rival, rival_pace),
            is_ahead,
            pace_advantage: 0.0,
            distance_delta: None,
            time_delta: None,
            laps_to_catch: None,
        };

        let (Some(subject_pace), Some(rival_pace)) = (subject_pace, rival_pace) else {
            return projection;
        };

        let pace_advantage = rival_pace - subject_pace;
        let distance = distance_delta(subject, rival, is_ahead);
        let time_delta = distance * ((subject_pace + rival_pace) / 2.0);

        projection.pace_advantage = pace_advantage;
        projection.distance_delta = Some(distance);
        projection.time_delta = Some(time_delta);
        projection.laps_to_catch = laps_to_catch(time_delta, pace_advantage, is_ahead);
        projection
    }
}
