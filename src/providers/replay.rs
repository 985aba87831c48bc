//! Replay provider for recorded sessions
//!
//! A recording is a YAML document holding the session list and one entry per recorded
//! snapshot:
//!
//! ```yaml
//! TickRate: 10
//! SessionInfo:
//!   CurrentSessionNum: 0
//!   Sessions:
//!   - SessionNum: 0
//!     SessionType: Race
//! Frames:
//! - SessionNum: 0
//!   SessionTime: 120.5
//!   DriverCarIdx: 1
//!   Cars:
//!   - CarIdx: 1
//!     Position: 1
//!     ClassPosition: 1
//!     CarClassID: 4
//!     Lap: 2
//!     LapDistPct: 0.31
//! ```
//!
//! Each frame's session number is resolved against the session list when it is played
//! back, exactly as a live transport resolves the current session.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::time::{Duration, Interval, MissedTickBehavior, interval};
use tracing::{debug, info, trace};

use crate::provider::SnapshotProvider;
use crate::session::SessionSchedule;
use crate::types::{CarSample, Snapshot};
use crate::{Result, RivalError};

/// A recorded session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Recording {
    /// Snapshot rate of the recording in Hz
    pub tick_rate: f64,
    /// Session list used to resolve frame session numbers
    pub session_info: SessionSchedule,
    /// Recorded snapshots in order
    pub frames: Vec<RecordedFrame>,
}

/// One recorded snapshot, before session resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct RecordedFrame {
    pub session_num: Option<i32>,
    pub session_time: Option<f64>,
    pub driver_car_idx: Option<usize>,
    pub cars: Vec<CarSample>,
}

impl Recording {
    /// Parse a recording from YAML
    pub fn parse(yaml: &str) -> Result<Self> {
        let recording: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| RivalError::parse_error("Recording deserialization", e))?;
        recording.validate()?;
        Ok(recording)
    }

    /// Check that the recording can be paced.
    pub fn validate(&self) -> Result<()> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(RivalError::parse_error(
                "Recording validation",
                format!("TickRate must be positive, got {}", self.tick_rate),
            ));
        }
        Ok(())
    }

    /// Load a recording from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| RivalError::file_error(path.to_path_buf(), e))?;
        Self::parse(&yaml)
    }

    /// Resolve a recorded frame into the snapshot a live transport would have produced.
    ///
    /// A missing or out-of-range session number leaves the session type unresolved.
    pub fn snapshot(&self, frame: &RecordedFrame) -> Snapshot {
        let session_type = frame
            .session_num
            .and_then(|num| self.session_info.session_type(num))
            .map(str::to_string);

        Snapshot {
            subject_car_id: frame.driver_car_idx,
            session_time: frame.session_time,
            session_type,
            cars: frame.cars.clone(),
        }
    }
}

/// Replay provider that plays back a [`Recording`]
pub struct ReplayProvider {
    /// Recording being played
    recording: Recording,

    /// Index of the next frame
    position: usize,

    /// Playback speed multiplier (1.0 = normal, 2.0 = double speed)
    speed: f64,

    /// Frame pacing interval
    interval: Interval,
}

impl ReplayProvider {
    /// Create a replay provider from a recording file
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let recording = Recording::load(path)?;
        info!(
            "Opened recording {}: {} frames at {}Hz",
            path.display(),
            recording.frames.len(),
            recording.tick_rate
        );
        Self::new(recording)
    }

    /// Create a replay provider from an in-memory recording
    ///
    /// Fails when the recording's tick rate cannot be paced. Must be called from within a
    /// Tokio runtime.
    pub fn new(recording: Recording) -> Result<Self> {
        recording.validate()?;
        let interval = Self::pacing(recording.tick_rate, 1.0)?;
        Ok(Self { recording, position: 0, speed: 1.0, interval })
    }

    fn pacing(tick_rate: f64, speed: f64) -> Result<Interval> {
        let period = Duration::try_from_secs_f64(1.0 / (tick_rate * speed)).map_err(|e| {
            RivalError::invalid_config("TickRate", format!("{tick_rate}Hz at {speed}x: {e}"))
        })?;
        // Zero periods are rejected by tokio
        let mut interval = interval(period.max(Duration::from_nanos(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Ok(interval)
    }

    /// Set playback speed, clamped to 0.1x..=100x
    ///
    /// A non-finite speed is rejected and leaves the current speed in place.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if !speed.is_finite() {
            return Err(RivalError::invalid_config(
                "PlaybackSpeed",
                format!("{speed} is not a finite multiplier"),
            ));
        }

        let speed = speed.clamp(0.1, 100.0);
        self.interval = Self::pacing(self.recording.tick_rate, speed)?;
        self.speed = speed;
        debug!("Playback speed set to {}x", self.speed);
        Ok(())
    }

    /// Current playback speed
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Index of the next frame to be played
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_frames(&self) -> usize {
        self.recording.frames.len()
    }

    /// Total duration in seconds at normal speed
    pub fn duration(&self) -> f64 {
        self.total_frames() as f64 / self.recording.tick_rate
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for ReplayProvider {
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        let Some(frame) = self.recording.frames.get(self.position) else {
            debug!("Reached end of recording");
            return Ok(None);
        };

        // Wait for next frame timing (pacing). Cancel-safe: position only advances below.
        self.interval.tick().await;

        let snapshot = self.recording.snapshot(frame);
        self.position += 1;

        trace!(
            "Frame {}/{}: session_type={:?}",
            self.position,
            self.recording.frames.len(),
            snapshot.session_type
        );

        Ok(Some(snapshot))
    }

    fn tick_rate(&self) -> f64 {
        self.recording.tick_rate * self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    const RECORDING_YAML: &str = r#"
TickRate: 50
SessionInfo:
  CurrentSessionNum: 1
  Sessions:
  - SessionNum: 0
    SessionType: Practice
  - SessionNum: 1
    SessionType: Race
Frames:
- SessionNum: 0
  SessionTime: 10.0
  DriverCarIdx: 2
  Cars:
  - CarIdx: 2
    Position: 1
- SessionNum: 1
  SessionTime: 20.0
  DriverCarIdx: 2
- SessionNum: 7
  SessionTime: 30.0
"#;

    #[test]
    fn recording_resolves_session_types() {
        let recording = Recording::parse(RECORDING_YAML).unwrap();
        assert_eq!(recording.frames.len(), 3);

        let types: Vec<Option<String>> =
            recording.frames.iter().map(|f| recording.snapshot(f).session_type).collect();
        assert_eq!(types, vec![Some("Practice".into()), Some("Race".into()), None]);

        let first = recording.snapshot(&recording.frames[0]);
        assert_eq!(first.subject_car_id, Some(2));
        assert_eq!(first.cars.len(), 1);
    }

    #[test]
    fn recording_requires_positive_tick_rate() {
        let err = Recording::parse("TickRate: 0\nFrames: []\n").unwrap_err();
        assert!(matches!(err, RivalError::Parse { .. }));
    }

    #[test]
    fn missing_recording_is_file_error() {
        assert!(matches!(
            ReplayProvider::open("/no/such/recording.yaml"),
            Err(RivalError::File { .. })
        ));
    }

    #[tokio::test]
    async fn plays_every_frame_then_ends() {
        let mut provider = ReplayProvider::new(Recording::parse(RECORDING_YAML).unwrap()).unwrap();
        provider.set_speed(10.0).unwrap();
        assert_eq!(provider.total_frames(), 3);
        assert!((provider.duration() - 0.06).abs() < 1e-9);

        let mut times = Vec::new();
        while let Some(snapshot) = provider.next_snapshot().await.unwrap() {
            times.push(snapshot.session_time);
        }

        assert_eq!(times, vec![Some(10.0), Some(20.0), Some(30.0)]);
        assert_eq!(provider.position(), 3);
        assert!(provider.next_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unpaceable_recording_is_rejected() {
        assert!(matches!(ReplayProvider::new(Recording::default()), Err(RivalError::Parse { .. })));

        let recording = Recording { tick_rate: f64::INFINITY, ..Recording::default() };
        assert!(ReplayProvider::new(recording).is_err());

        let recording = Recording { tick_rate: 1e-30, ..Recording::default() };
        assert!(matches!(ReplayProvider::new(recording), Err(RivalError::Config { .. })));
    }

    #[tokio::test]
    async fn non_finite_speed_is_rejected() {
        let mut provider = ReplayProvider::new(Recording::parse(RECORDING_YAML).unwrap()).unwrap();

        assert!(matches!(provider.set_speed(f64::NAN), Err(RivalError::Config { .. })));
        assert!(provider.set_speed(f64::INFINITY).is_err());
        assert_eq!(provider.speed(), 1.0);

        provider.set_speed(1_000.0).unwrap();
        assert_eq!(provider.speed(), 100.0);
        assert_eq!(provider.tick_rate(), 5_000.0);
    }

    #[tokio::test]
    async fn fixture_recording_loads() {
        let path = test_utils::fixture_path(test_utils::SHORT_RACE_FIXTURE);
        let provider = ReplayProvider::open(&path).expect("fixture recording should load");
        assert!(provider.total_frames() > 0);
        assert_eq!(provider.recording().session_info.current_session_type(), Some("Race"));
    }
}
