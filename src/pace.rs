//! Recency-weighted pace estimation
//!
//! Pace is the weighted mean of a car's most recent lap times. The newest lap always has
//! weight 1 and each older lap is scaled by a further power of the decay factor, so one-off
//! outliers (traffic, mistakes) fade without throwing away the trend.

use crate::config::RivalConfig;
use crate::types::{CarState, LapHistory};

/// Weighted average of the most recent `window_size` laps.
///
/// Entry `i` of the selected window (0 = oldest) weighs `decay_factor^(count - 1 - i)`.
/// Returns `None` when no laps are available or the weights sum to zero.
pub fn weighted_pace(history: &LapHistory, window_size: usize, decay_factor: f64) -> Option<f64> {
    let laps = history.recent(window_size);
    let count = laps.len();
    if count == 0 {
        return None;
    }

    let (weighted_sum, total_weight) =
        laps.enumerate().fold((0.0, 0.0), |(sum, total), (i, lap)| {
            let weight = decay_factor.powi((count - 1 - i) as i32);
            (sum + lap.lap_time() * weight, total + weight)
        });

    if total_weight == 0.0 { None } else { Some(weighted_sum / total_weight) }
}

/// Pace estimation with a fixed window and decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceEstimator {
    pub window_size: usize,
    pub decay_factor: f64,
}

impl PaceEstimator {
    pub fn new(window_size: usize, decay_factor: f64) -> Self {
        Self { window_size, decay_factor }
    }

    pub fn from_config(config: &RivalConfig) -> Self {
        Self::new(config.laps_to_consider, config.weight_decay_factor)
    }

    pub fn estimate(&self, car: &CarState) -> Option<f64> {
        weighted_pace(car.history(), self.window_size, self.decay_factor)
    }
}

impl Default for PaceEstimator {
    fn default() -> Self {
        Self::from_config(&RivalConfig::default())
    }
}
