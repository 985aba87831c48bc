//! Test utilities for fixture access and snapshot construction
//!
//! Shared by unit tests, integration tests and benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::providers::Recording;
use crate::types::{CarSample, Snapshot};

/// Short multi-class race recording under `tests/fixtures/`.
pub const SHORT_RACE_FIXTURE: &str = "short_race.yaml";

/// Directory holding recording fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Resolve a fixture file by name.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Load a named recording fixture.
pub fn load_fixture(name: &str) -> anyhow::Result<Recording> {
    let path = fixture_path(name);
    Recording::load(&path).with_context(|| format!("loading fixture {}", path.display()))
}

/// Resolve every frame of a fixture into the snapshots a live transport would produce.
pub fn fixture_snapshots(name: &str) -> anyhow::Result<Vec<Snapshot>> {
    let recording = load_fixture(name)?;
    Ok(recording.frames.iter().map(|frame| recording.snapshot(frame)).collect())
}

/// Classified car in class 1 at the given class position, lap and lap fraction.
pub fn classified_car(car_id: usize, class_position: i32, lap: i32, fraction: f64) -> CarSample {
    CarSample::new(car_id)
        .with_position(class_position)
        .with_class_position(class_position)
        .with_class_id(1)
        .with_lap(lap)
        .with_lap_fraction(fraction)
}

/// Race snapshot for a single-class field of `count` cars, subject at car 0.
///
/// Cars are spread evenly around the lap in position order, all on `lap`, and every car
/// reports `lap_time` (plus a small per-car offset) as its last lap.
pub fn race_field(count: usize, lap: i32, lap_time: f64, session_time: f64) -> Snapshot {
    let count = count.min(crate::types::MAX_CARS);
    let mut snapshot =
        Snapshot::new().with_subject(0).with_session_time(session_time).with_session_type("Race");

    for car_id in 0..count {
        let position = car_id as i32 + 1;
        let fraction = 1.0 - (position as f64 / (count as f64 + 1.0));
        snapshot = snapshot.with_car(
            classified_car(car_id, position, lap, fraction)
                .with_last_lap_time(lap_time + car_id as f64 * 0.1)
                .with_name(format!("Driver {car_id}")),
        );
    }

    snapshot
}
