//! Car state store: per-car records and lap completion detection
//!
//! The store owns every [`CarState`] for the lifetime of a connected session. Cars live
//! in an arena indexed by car id, so iteration order is always ascending car id.
//!
//! Lap completions are reconstructed from the lap counter: when a car's lap number
//! increases between two snapshots, the snapshot's last-lap-time is recorded as the time
//! of the lap that just ended. The lap counter is tracked separately from the lap history
//! so that a completion without a usable lap time still advances the counter.

use tracing::{debug, trace, warn};

use crate::types::{CarSample, CarState, MAX_CARS, Snapshot, UNKNOWN_DRIVER_NAME};

/// Owner of all per-car state for one session.
#[derive(Debug, Clone)]
pub struct CarStateStore {
    cars: Vec<Option<CarState>>,
    lap_marks: Vec<Option<i32>>,
    subject_car_id: Option<usize>,
    session_time: Option<f64>,
}

impl Default for CarStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CarStateStore {
    pub fn new() -> Self {
        Self {
            cars: vec![None; MAX_CARS],
            lap_marks: vec![None; MAX_CARS],
            subject_car_id: None,
            session_time: None,
        }
    }

    /// Apply one snapshot to the stored car population.
    ///
    /// Cars without a positive classified position are skipped for this tick and keep
    /// whatever state they already had.
    pub fn ingest(&mut self, snapshot: &Snapshot) {
        if let Some(subject) = snapshot.subject_car_id {
            self.subject_car_id = Some(subject);
        }
        if let Some(time) = snapshot.session_time {
            self.session_time = Some(time);
        }

        for sample in &snapshot.cars {
            if sample.car_id >= MAX_CARS {
                warn!(car_id = sample.car_id, "Ignoring car index beyond {} slots", MAX_CARS);
                continue;
            }
            if !sample.is_classified() {
                trace!(car_id = sample.car_id, "Car not classified, skipping");
                continue;
            }
            self.ingest_car(sample);
        }
    }

    fn ingest_car(&mut self, sample: &CarSample) {
        let car_id = sample.car_id;
        let session_time = self.session_time.unwrap_or_default();
        let is_subject = self.subject_car_id == Some(car_id);

        let car = self.cars[car_id].get_or_insert_with(|| {
            let name = sample.name.clone().unwrap_or_else(|| UNKNOWN_DRIVER_NAME.to_string());
            debug!(car_id, name = %name, class_id = ?sample.class_id, "Tracking new car");
            CarState::new(car_id, name, sample.class_id.unwrap_or_default(), is_subject)
        });

        if let Some(position) = sample.class_position {
            car.position_in_class = position;
        }
        if let Some(fraction) = sample.valid_lap_fraction() {
            car.lap_fraction = fraction;
        }

        let Some(lap) = sample.lap else {
            return;
        };

        if let Some(previous) = self.lap_marks[car_id]
            && lap > previous
        {
            let completed = lap - 1;
            match sample.last_lap_time {
                Some(lap_time) if car.record_lap(completed, lap_time, session_time) => {
                    debug!(car_id, lap = completed, lap_time, "Lap completed");
                }
                _ => {
                    debug!(car_id, lap = completed, "Lap completed without a valid lap time");
                }
            }
        }

        self.lap_marks[car_id] = Some(lap);
        car.current_lap = lap;
    }

    /// Drop every car and all lap history.
    pub fn clear(&mut self) {
        self.cars.iter_mut().for_each(|car| *car = None);
        self.lap_marks.iter_mut().for_each(|mark| *mark = None);
        self.subject_car_id = None;
        self.session_time = None;
    }

    pub fn get(&self, car_id: usize) -> Option<&CarState> {
        self.cars.get(car_id).and_then(Option::as_ref)
    }

    /// State of the subject car, if it has been observed
    pub fn subject(&self) -> Option<&CarState> {
        self.subject_car_id.and_then(|id| self.get(id))
    }

    pub fn subject_car_id(&self) -> Option<usize> {
        self.subject_car_id
    }

    /// Latest session time seen in any snapshot
    pub fn session_time(&self) -> Option<f64> {
        self.session_time
    }

    /// All tracked cars in ascending car id order
    pub fn iter(&self) -> impl Iterator<Item = &CarState> + '_ {
        self.cars.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Number of tracked cars currently holding a class position
    pub fn classified_count(&self) -> usize {
        self.iter().filter(|car| car.is_classified()).count()
    }
}
