//! Telemetry snapshot consumed once per tick

use serde::{Deserialize, Serialize};

/// Highest number of car slots a snapshot can describe.
pub const MAX_CARS: usize = 64;

/// One periodic telemetry snapshot, already decoded into typed values.
///
/// Every field is optional. An absent value means "no update this tick" and is never
/// interpreted as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Snapshot {
    /// Car index of the subject
    #[serde(rename = "DriverCarIdx")]
    pub subject_car_id: Option<usize>,
    /// Session clock in seconds
    pub session_time: Option<f64>,
    /// Label of the current session type ("Race", "Practice", ...)
    pub session_type: Option<String>,
    /// Per-car samples
    pub cars: Vec<CarSample>,
}

/// Per-car values from one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct CarSample {
    /// Car index (< [`MAX_CARS`])
    #[serde(rename = "CarIdx")]
    pub car_id: usize,
    /// Overall classified position; <= 0 means the car is not on the leaderboard
    pub position: Option<i32>,
    /// Position within the car's class
    pub class_position: Option<i32>,
    /// Car class identifier
    #[serde(rename = "CarClassID")]
    pub class_id: Option<i32>,
    /// Lap the car is currently on
    pub lap: Option<i32>,
    /// Time of the lap most recently completed (<= 0 means not available)
    pub last_lap_time: Option<f64>,
    /// Progress around the current lap
    #[serde(rename = "LapDistPct")]
    pub lap_fraction: Option<f64>,
    /// Driver display name
    #[serde(rename = "UserName")]
    pub name: Option<String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, car_id: usize) -> Self {
        self.subject_car_id = Some(car_id);
        self
    }

    pub fn with_session_time(mut self, seconds: f64) -> Self {
        self.session_time = Some(seconds);
        self
    }

    pub fn with_session_type(mut self, label: impl Into<String>) -> Self {
        self.session_type = Some(label.into());
        self
    }

    pub fn with_car(mut self, car: CarSample) -> Self {
        self.cars.push(car);
        self
    }
}

impl CarSample {
    pub fn new(car_id: usize) -> Self {
        Self { car_id, ..Self::default() }
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_class_position(mut self, class_position: i32) -> Self {
        self.class_position = Some(class_position);
        self
    }

    pub fn with_class_id(mut self, class_id: i32) -> Self {
        self.class_id = Some(class_id);
        self
    }

    pub fn with_lap(mut self, lap: i32) -> Self {
        self.lap = Some(lap);
        self
    }

    pub fn with_last_lap_time(mut self, seconds: f64) -> Self {
        self.last_lap_time = Some(seconds);
        self
    }

    pub fn with_lap_fraction(mut self, fraction: f64) -> Self {
        self.lap_fraction = Some(fraction);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the car currently holds a positive classified position
    pub fn is_classified(&self) -> bool {
        self.position.is_some_and(|p| p > 0)
    }

    /// Lap fraction if it is finite and inside [0, 1).
    ///
    /// Simulators report negative values for cars that are not in the world; those are
    /// treated the same as a missing sample.
    pub fn valid_lap_fraction(&self) -> Option<f64> {
        self.lap_fraction.filter(|f| f.is_finite() && (0.0..1.0).contains(f))
    }
}
