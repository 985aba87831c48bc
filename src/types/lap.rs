//! Completed lap records and the bounded per-car lap history

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of completed laps retained per car.
pub const LAP_HISTORY_CAPACITY: usize = 20;

/// One completed lap.
///
/// Records are immutable once created and can only be built with a strictly positive,
/// finite lap time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapRecord {
    lap_number: i32,
    lap_time: f64,
    session_time: f64,
}

impl LapRecord {
    /// Create a lap record, rejecting non-positive or non-finite lap times.
    pub fn new(lap_number: i32, lap_time: f64, session_time: f64) -> Option<Self> {
        if lap_time.is_finite() && lap_time > 0.0 {
            Some(Self { lap_number, lap_time, session_time })
        } else {
            None
        }
    }

    /// Lap number that was completed
    pub fn lap_number(&self) -> i32 {
        self.lap_number
    }

    /// Lap duration in seconds
    pub fn lap_time(&self) -> f64 {
        self.lap_time
    }

    /// Session time (seconds) at which the lap completion was observed
    pub fn session_time(&self) -> f64 {
        self.session_time
    }
}

/// Bounded FIFO of completed laps, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LapHistory {
    laps: VecDeque<LapRecord>,
}

impl LapHistory {
    pub fn new() -> Self {
        Self { laps: VecDeque::with_capacity(LAP_HISTORY_CAPACITY) }
    }

    /// Append a record, evicting the oldest one when the history is full.
    pub fn push(&mut self, record: LapRecord) {
        if self.laps.len() >= LAP_HISTORY_CAPACITY {
            self.laps.pop_front();
        }
        self.laps.push_back(record);
    }

    /// The most recent `count` laps (fewer if not enough exist), oldest first.
    pub fn recent(&self, count: usize) -> impl ExactSizeIterator<Item = &LapRecord> + '_ {
        let start = self.laps.len().saturating_sub(count);
        self.laps.range(start..)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &LapRecord> + '_ {
        self.laps.iter()
    }

    pub fn newest(&self) -> Option<&LapRecord> {
        self.laps.back()
    }

    pub fn oldest(&self) -> Option<&LapRecord> {
        self.laps.front()
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }
}
