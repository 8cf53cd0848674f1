//! Tick advancement and the seedable simulator.
//!
//! [`advance_sensors`] is the pure transition from one sensor set to the
//! next. [`Simulator`] bundles it with an injected random source and clock so
//! that callers (the refresher, the CLI, tests) can produce reproducible runs.
//!
//! # Example
//!
//! ```
//! use explorer_core::{HISTORY_CAPACITY, Simulator};
//!
//! let mut sim = Simulator::seeded(7);
//! let first = sim.initial_snapshot();
//! let second = sim.next_snapshot(&first);
//!
//! assert_eq!(second.generation, first.generation + 1);
//! assert!(second.sensors.iter().all(|s| s.history.len() == HISTORY_CAPACITY));
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use explorer_types::{Reading, SensorState};

use crate::catalog;
use crate::history::{draw_value, push_window};
use crate::thresholds::classify_status;

/// Source of "now" for generated readings.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to.
///
/// With a non-zero `step`, every call to [`Clock::now`] returns the current
/// instant and then advances by `step`, so consecutive ticks are strictly
/// ordered without touching the wall clock.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<OffsetDateTime>,
    step: Duration,
}

impl ManualClock {
    /// A clock frozen at `start`.
    pub fn new(start: OffsetDateTime) -> Self {
        Self::with_step(start, Duration::ZERO)
    }

    /// A clock starting at `start` that advances by `step` on every read.
    pub fn with_step(start: OffsetDateTime, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }

    /// Move the clock to `instant`.
    pub fn set(&self, instant: OffsetDateTime) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }

    /// Current instant without stepping.
    pub fn peek(&self) -> OffsetDateTime {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let now = *current;
        *current += self.step;
        now
    }
}

/// One fully formed sensor set, as published after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Zero for the initial set, then one more per tick.
    pub generation: u64,
    /// When the set was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub taken_at: OffsetDateTime,
    /// Sensors in catalog order.
    pub sensors: Vec<SensorState>,
}

impl Snapshot {
    /// Look up a sensor by id.
    pub fn sensor(&self, id: &str) -> Option<&SensorState> {
        self.sensors.iter().find(|s| s.id() == id)
    }
}

/// Record `value` as the sensor's newest reading at `now`.
///
/// The oldest history entry is evicted and the status re-derived; every
/// other field is copied unchanged. `sensor` itself is not modified.
pub fn apply_reading(sensor: &SensorState, value: f64, now: OffsetDateTime) -> SensorState {
    SensorState {
        definition: sensor.definition.clone(),
        value,
        status: classify_status(value, sensor.definition.min, sensor.definition.max),
        timestamp: now,
        history: push_window(&sensor.history, Reading::new(now, value)),
    }
}

/// Advance every sensor by one independent uniform draw.
///
/// Each new value is drawn from the sensor's full range and is not
/// correlated with the previous value. The input slice is left untouched.
pub fn advance_sensors<R: Rng + ?Sized>(
    current: &[SensorState],
    now: OffsetDateTime,
    rng: &mut R,
) -> Vec<SensorState> {
    current
        .iter()
        .map(|sensor| {
            let value = draw_value(sensor.definition.min, sensor.definition.max, rng);
            apply_reading(sensor, value, now)
        })
        .collect()
}

/// Seedable driver for the sensor catalog.
pub struct Simulator<R = StdRng> {
    rng: R,
    clock: Arc<dyn Clock>,
}

impl<R> fmt::Debug for Simulator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Simulator<StdRng> {
    /// Simulator seeded from `seed` when given, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Reproducible simulator on the system clock.
    pub fn seeded(seed: u64) -> Self {
        Self::with_parts(StdRng::seed_from_u64(seed), Arc::new(SystemClock))
    }

    /// Non-reproducible simulator on the system clock.
    pub fn from_entropy() -> Self {
        Self::with_parts(StdRng::from_os_rng(), Arc::new(SystemClock))
    }
}

impl<R: Rng> Simulator<R> {
    /// Build from an explicit random source and clock.
    pub fn with_parts(rng: R, clock: Arc<dyn Clock>) -> Self {
        Self { rng, clock }
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Read the clock.
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// The catalog with freshly generated histories ending now.
    pub fn initial_sensors(&mut self) -> Vec<SensorState> {
        let now = self.clock.now();
        catalog::initial_sensors(now, &mut self.rng)
    }

    /// Generation-zero snapshot of the catalog.
    pub fn initial_snapshot(&mut self) -> Snapshot {
        let now = self.clock.now();
        Snapshot {
            generation: 0,
            taken_at: now,
            sensors: catalog::initial_sensors(now, &mut self.rng),
        }
    }

    /// Advance `sensors` by one tick stamped with the current clock reading.
    pub fn advance(&mut self, sensors: &[SensorState]) -> Vec<SensorState> {
        let now = self.clock.now();
        advance_sensors(sensors, now, &mut self.rng)
    }

    /// The snapshot following `previous`.
    ///
    /// The clock is read once so every sensor in the result shares the same
    /// timestamp as the snapshot itself.
    pub fn next_snapshot(&mut self, previous: &Snapshot) -> Snapshot {
        let now = self.clock.now();
        Snapshot {
            generation: previous.generation + 1,
            taken_at: now,
            sensors: advance_sensors(&previous.sensors, now, &mut self.rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_types::{HISTORY_CAPACITY, SensorDefinition, SensorType, Status};
    use time::macros::datetime;

    fn manual(step_secs: i64) -> Arc<ManualClock> {
        Arc::new(ManualClock::with_step(
            datetime!(2025-06-19 12:00 UTC),
            Duration::seconds(step_secs),
        ))
    }

    fn ultrasonic() -> SensorState {
        let definition = SensorDefinition::builder("s005", SensorType::Ultrasonic)
            .name("Ultrasonic Sensor")
            .unit("cm")
            .location("Front")
            .range(0.0, 400.0)
            .build();
        let now = datetime!(2025-06-19 12:00 UTC);
        let mut rng = StdRng::seed_from_u64(3);
        SensorState {
            definition,
            value: 150.0,
            status: Status::Normal,
            timestamp: now,
            history: crate::history::generate_window(50.0, 300.0, now, &mut rng),
        }
    }

    #[test]
    fn test_forced_reading_goes_critical() {
        let sensor = ultrasonic();
        let later = sensor.timestamp + Duration::seconds(5);
        let next = apply_reading(&sensor, 370.0, later);

        assert_eq!(next.status, Status::Critical);
        assert_eq!(next.value, 370.0);
        assert_eq!(next.timestamp, later);
        assert_eq!(next.history.len(), HISTORY_CAPACITY);
        assert_eq!(next.history.last(), Some(&Reading::new(later, 370.0)));
        assert_eq!(next.definition, sensor.definition);
    }

    #[test]
    fn test_advance_leaves_input_untouched() {
        let sensors = vec![ultrasonic()];
        let before = sensors.clone();
        let mut rng = StdRng::seed_from_u64(9);

        let now = datetime!(2025-06-19 12:00:05 UTC);
        let a = advance_sensors(&sensors, now, &mut rng);
        let b = advance_sensors(&sensors, now, &mut rng);

        assert_eq!(sensors, before);
        assert_eq!(a[0].history[..23], before[0].history[1..]);
        assert_eq!(b[0].history[..23], before[0].history[1..]);
    }

    #[test]
    fn test_advance_values_stay_in_range() {
        let mut sim = Simulator::with_parts(StdRng::seed_from_u64(11), manual(5));
        let mut snapshot = sim.initial_snapshot();
        for _ in 0..50 {
            snapshot = sim.next_snapshot(&snapshot);
            for sensor in &snapshot.sensors {
                let d = &sensor.definition;
                assert!(sensor.value >= d.min && sensor.value <= d.max);
                assert_eq!(sensor.status, classify_status(sensor.value, d.min, d.max));
            }
        }
        assert_eq!(snapshot.generation, 50);
    }

    #[test]
    fn test_next_snapshot_shares_timestamp() {
        let clock = manual(5);
        let mut sim = Simulator::with_parts(StdRng::seed_from_u64(1), clock.clone());
        let first = sim.initial_snapshot();
        let second = sim.next_snapshot(&first);

        assert!(second.taken_at > first.taken_at);
        for (old, new) in first.sensors.iter().zip(&second.sensors) {
            assert_eq!(new.timestamp, second.taken_at);
            assert!(new.history[23].timestamp > old.history[23].timestamp);
        }
    }

    #[test]
    fn test_seeded_simulators_agree() {
        let mut a = Simulator::with_parts(StdRng::seed_from_u64(42), manual(5));
        let mut b = Simulator::with_parts(StdRng::seed_from_u64(42), manual(5));

        let (sa, sb) = (a.initial_snapshot(), b.initial_snapshot());
        assert_eq!(sa, sb);
        assert_eq!(a.next_snapshot(&sa), b.next_snapshot(&sb));
    }

    #[test]
    fn test_snapshot_lookup() {
        let mut sim = Simulator::with_parts(StdRng::seed_from_u64(1), manual(0));
        let snapshot = sim.initial_snapshot();
        assert_eq!(snapshot.sensor("s003").map(|s| s.sensor_type()), Some(SensorType::Microphone));
        assert!(snapshot.sensor("s999").is_none());
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(datetime!(2025-06-19 12:00 UTC));
        assert_eq!(clock.now(), clock.now());
        clock.advance(Duration::minutes(1));
        assert_eq!(clock.peek(), datetime!(2025-06-19 12:01 UTC));
        clock.set(datetime!(2030-01-01 0:00 UTC));
        assert_eq!(clock.now(), datetime!(2030-01-01 0:00 UTC));
    }
}
