//! Rival engine: the synchronous per-tick pipeline
//!
//! ```text
//! Snapshot ──► Ingest ──► Gate ──► Select ──► Project ──► RaceUpdate
//!                │
//!                ▼
//!          CarStateStore (only state kept between ticks)
//! ```
//!
//! Every call to [`RivalEngine::tick`] runs the whole pipeline to completion. Nothing
//! suspends or blocks, so the engine can be driven from any loop: the async
//! [`crate::driver::Driver`], a UI timer, or a test.

use tracing::{debug, trace};

use crate::config::RivalConfig;
use crate::pace::PaceEstimator;
use crate::projector::CatchUpProjector;
use crate::rivals::select_rivals;
use crate::session::is_race_active;
use crate::store::CarStateStore;
use crate::types::{CarSnapshot, CarState, RaceUpdate, Snapshot};

/// Owns the car population and turns snapshots into race updates.
#[derive(Debug, Clone)]
pub struct RivalEngine {
    config: RivalConfig,
    projector: CatchUpProjector,
    store: CarStateStore,
}

impl Default for RivalEngine {
    fn default() -> Self {
        Self::new(RivalConfig::default())
    }
}

impl RivalEngine {
    pub fn new(config: RivalConfig) -> Self {
        let projector = CatchUpProjector::new(PaceEstimator::from_config(&config));
        Self { config, projector, store: CarStateStore::new() }
    }

    /// Run one Ingest → Gate → Select → Project cycle.
    ///
    /// Returns `None` without touching any state when no snapshot is available for this
    /// tick. An active race whose subject has not been observed yet produces an active
    /// update without a subject or rivals.
    pub fn tick(&mut self, snapshot: Option<&Snapshot>) -> Option<RaceUpdate> {
        let Some(snapshot) = snapshot else {
            debug!("No snapshot for this tick, keeping previous state");
            return None;
        };

        self.store.ingest(snapshot);

        let session_time = self.store.session_time();
        let classified = self.store.classified_count();
        if !is_race_active(snapshot.session_type.as_deref(), classified) {
            trace!(session_type = ?snapshot.session_type, classified, "Race not active");
            return Some(RaceUpdate::inactive(session_time));
        }

        let Some(subject) = self.store.subject() else {
            debug!(subject = ?self.store.subject_car_id(), "Race active but subject not tracked");
            return Some(RaceUpdate { is_race_active: true, ..RaceUpdate::inactive(session_time) });
        };

        let window = select_rivals(
            subject,
            self.store.iter(),
            self.config.num_opponents_ahead,
            self.config.num_opponents_behind,
        );

        let project = |rivals: &[&CarState], is_ahead: bool| -> Vec<_> {
            rivals.iter().map(|rival| self.projector.project(subject, rival, is_ahead)).collect()
        };
        let rivals_ahead = project(&window.ahead, true);
        let rivals_behind = project(&window.behind, false);

        trace!(
            car_id = subject.car_id,
            position = subject.position_in_class,
            ahead = rivals_ahead.len(),
            behind = rivals_behind.len(),
            "Race update built"
        );

        Some(RaceUpdate {
            is_race_active: true,
            session_time,
            subject: Some(CarSnapshot::capture(subject, self.projector.pace().estimate(subject))),
            rivals_ahead,
            rivals_behind,
        })
    }

    /// Discard every car and all lap history after a disconnect.
    pub fn reset(&mut self) {
        debug!(cars = self.store.len(), "Resetting rival engine");
        self.store.clear();
    }

    pub fn store(&self) -> &CarStateStore {
        &self.store
    }

    pub fn config(&self) -> &RivalConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CarSample;

    fn sample(car_id: usize, class_position: i32, lap: i32, fraction: f64) -> CarSample {
        CarSample::new(car_id)
            .with_position(class_position)
            .with_class_position(class_position)
            .with_class_id(1)
            .with_lap(lap)
            .with_lap_fraction(fraction)
            .with_name(format!("Driver {car_id}"))
    }

    fn race(subject: usize, time: f64, cars: Vec<CarSample>) -> Snapshot {
        let mut snapshot =
            Snapshot::new().with_subject(subject).with_session_time(time).with_session_type("Race");
        snapshot.cars = cars;
        snapshot
    }

    #[test]
    fn missing_snapshot_skips_tick_and_keeps_state() {
        let mut engine = RivalEngine::default();
        engine.tick(Some(&race(0, 1.0, vec![sample(0, 1, 1, 0.1), sample(1, 2, 1, 0.0)])));

        assert_eq!(engine.tick(None), None);
        assert_eq!(engine.store().len(), 2);
    }

    #[test]
    fn practice_session_is_inactive() {
        let mut engine = RivalEngine::default();
        let mut snapshot = race(0, 1.0, vec![sample(0, 1, 1, 0.1), sample(1, 2, 1, 0.0)]);
        snapshot.session_type = Some("Practice".to_string());

        let update = engine.tick(Some(&snapshot)).unwrap();
        assert!(!update.is_race_active);
        assert!(update.subject.is_none());
        assert!(update.rivals_ahead.is_empty() && update.rivals_behind.is_empty());

        // Cars are still tracked while inactive
        assert_eq!(engine.store().len(), 2);
    }

    #[test]
    fn unresolved_session_is_inactive() {
        let mut engine = RivalEngine::default();
        let mut snapshot = race(0, 1.0, vec![sample(0, 1, 1, 0.1), sample(1, 2, 1, 0.0)]);
        snapshot.session_type = None;
        assert!(!engine.tick(Some(&snapshot)).unwrap().is_race_active);
    }

    #[test]
    fn single_car_race_is_inactive() {
        let mut engine = RivalEngine::default();
        let update = engine.tick(Some(&race(0, 1.0, vec![sample(0, 1, 1, 0.1)]))).unwrap();
        assert!(!update.is_race_active);
    }

    #[test]
    fn active_race_without_subject_has_no_rivals() {
        let mut engine = RivalEngine::default();
        let cars = vec![sample(0, 1, 1, 0.1), sample(1, 2, 1, 0.0)];
        let update = engine.tick(Some(&race(9, 1.0, cars))).unwrap();
        assert!(update.is_race_active);
        assert!(update.subject.is_none());
        assert!(update.rivals_ahead.is_empty() && update.rivals_behind.is_empty());
    }

    #[test]
    fn subject_without_class_position_has_no_rivals() {
        let mut engine = RivalEngine::default();
        let subject = CarSample::new(0).with_position(3).with_class_position(0).with_class_id(1);
        let cars = vec![subject, sample(1, 1, 1, 0.4), sample(2, 2, 1, 0.3)];

        let update = engine.tick(Some(&race(0, 1.0, cars))).unwrap();
        assert!(update.is_race_active);
        assert_eq!(update.subject.map(|s| s.position_in_class), Some(0));
        assert!(update.rivals_ahead.is_empty());
        assert!(update.rivals_behind.is_empty());
    }

    #[test]
    fn rivals_without_laps_carry_identity_only() {
        let mut engine = RivalEngine::default();
        let update = engine
            .tick(Some(&race(
                1,
                1.0,
                vec![sample(0, 1, 1, 0.3), sample(1, 2, 1, 0.2), sample(2, 3, 1, 0.1)],
            )))
            .unwrap();

        assert!(update.is_race_active);
        let subject = update.subject.unwrap();
        assert_eq!(subject.car_id, 1);
        assert!(subject.is_subject);
        assert_eq!(subject.pace, None);

        assert_eq!(update.rivals_ahead.len(), 1);
        assert_eq!(update.rivals_behind.len(), 1);
        let ahead = &update.rivals_ahead[0];
        assert!(ahead.is_ahead);
        assert_eq!(ahead.rival.car_id, 0);
        assert_eq!(ahead.pace_advantage, 0.0);
        assert_eq!(ahead.distance_delta, None);
        assert_eq!(ahead.laps_to_catch, None);
        assert!(!update.rivals_behind[0].is_ahead);
    }

    #[test]
    fn projections_follow_lap_completions() {
        let mut engine = RivalEngine::default();
        // Subject (car 0) laps in 90s, rival ahead (car 1) in 91s
        engine.tick(Some(&race(0, 0.0, vec![sample(0, 2, 1, 0.50), sample(1, 1, 1, 0.55)])));
        engine.tick(Some(&race(
            0,
            90.0,
            vec![
                sample(0, 2, 2, 0.50).with_last_lap_time(90.0),
                sample(1, 1, 2, 0.55).with_last_lap_time(91.0),
            ],
        )));

        let update = engine
            .tick(Some(&race(0, 90.1, vec![sample(0, 2, 2, 0.50), sample(1, 1, 2, 0.55)])))
            .unwrap();

        let projection = &update.rivals_ahead[0];
        assert!((projection.pace_advantage - 1.0).abs() < 1e-9);
        assert!((projection.time_delta.unwrap() - 4.525).abs() < 1e-9);
        assert!((projection.laps_to_catch.unwrap() - 4.525).abs() < 1e-9);
        assert_eq!(update.subject.unwrap().laps_recorded, 1);
    }

    #[test]
    fn reset_discards_store() {
        let mut engine = RivalEngine::default();
        engine.tick(Some(&race(0, 1.0, vec![sample(0, 1, 1, 0.1), sample(1, 2, 1, 0.0)])));
        engine.reset();
        assert!(engine.store().is_empty());
        assert!(engine.store().subject().is_none());
    }

    #[test]
    fn rival_counts_follow_config() {
        let config =
            RivalConfig { num_opponents_ahead: 1, num_opponents_behind: 2, ..Default::default() };
        let mut engine = RivalEngine::new(config);
        let cars = (0..8).map(|i| sample(i, i as i32 + 1, 1, 0.9 - i as f64 * 0.1)).collect();

        let update = engine.tick(Some(&race(4, 1.0, cars))).unwrap();
        assert_eq!(
            update.rivals_ahead.iter().map(|p| p.rival.position_in_class).collect::<Vec<_>>(),
            vec![4]
        );
        assert_eq!(
            update.rivals_behind.iter().map(|p| p.rival.position_in_class).collect::<Vec<_>>(),
            vec![6, 7]
        );
    }
}
