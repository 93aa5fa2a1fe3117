//! End-to-end poll cycles through the public source adapters.

use std::cell::Cell;
use std::fmt::Write as _;

use geiger_source::{ClockSource, Monitor, PollOutcome, ReplaySource, SimulatedCounter};
use geiger_types::{ReadFailure, WindowConfig};
use geiger_window::{EstimatorPhase, RateEstimator};

/// Clock stepped by hand from the test body.
#[derive(Debug, Default)]
struct StepClock {
    now: Cell<u32>,
}

impl StepClock {
    fn step(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl ClockSource for StepClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

#[test]
fn test_replay_full_window_with_failures() {
    // Baseline, then 100 cycles of 10 pulses every 600 ms, with every 7th read
    // failing. Failed reads still let the hardware count, so the pulses land
    // in the next successful cycle.
    let mut recording = String::new();
    writeln!(recording, r#"{{"now_ms": 0, "counter": 0}}"#).unwrap();
    for i in 1..=100u32 {
        if i % 7 == 0 {
            writeln!(recording, r#"{{"now_ms": {}, "error": "timeout: 50"}}"#, i * 600).unwrap();
        } else {
            writeln!(recording, r#"{{"now_ms": {}, "counter": {}}}"#, i * 600, i * 10).unwrap();
        }
    }

    let (counter, clock) = ReplaySource::parse(recording.as_bytes())
        .unwrap()
        .into_parts();
    let mut monitor = Monitor::new(counter, clock);
    let mut estimator = RateEstimator::default();

    let mut skipped = 0;
    while monitor.counter().remaining() > 0 {
        if let PollOutcome::Skipped(failure) = monitor.poll(&mut estimator) {
            assert_eq!(failure, ReadFailure::Timeout { waited_ms: 50 });
            skipped += 1;
        }
    }

    assert_eq!(skipped, 14);
    assert_eq!(monitor.stats().skipped, 14);
    assert_eq!(monitor.stats().updated, 87);

    let snapshot = estimator.last_snapshot().unwrap();
    assert!(snapshot.window_complete);
    assert_eq!(snapshot.rate_per_minute, 1_000);
    assert_eq!(estimator.phase(), EstimatorPhase::SteadyState);
}

#[test]
fn test_simulated_counter_converges_to_rate() {
    let clock = StepClock::default();
    let counter = SimulatedCounter::new(&clock, 25.0).with_start_value(0xFF_FC00);
    let mut monitor = Monitor::new(counter, &clock);
    let mut estimator = RateEstimator::new(WindowConfig::default()).unwrap();

    monitor.poll(&mut estimator);
    for _ in 0..150 {
        clock.step(600);
        monitor.poll(&mut estimator);
    }

    // 25 Hz is 1500 pulses per minute; the counter wrapped along the way
    let snapshot = estimator.last_snapshot().unwrap();
    assert!(snapshot.window_complete);
    assert_eq!(snapshot.rate_per_minute, 1_500);
}

#[test]
fn test_injected_failures_never_reach_estimator() {
    let clock = StepClock::default();
    let counter = SimulatedCounter::new(&clock, 10.0).with_fail_every(2);
    let mut monitor = Monitor::new(counter, &clock);
    let mut estimator = RateEstimator::default();

    let mut last_counter = None;
    for _ in 0..20 {
        clock.step(600);
        match monitor.poll(&mut estimator) {
            PollOutcome::Updated { .. } => {
                last_counter = estimator.previous_counter();
            }
            PollOutcome::Skipped(_) => {
                assert_eq!(estimator.previous_counter(), last_counter);
            }
        }
    }

    assert_eq!(monitor.stats().updated, 10);
    assert_eq!(monitor.stats().skipped, 10);
    assert_eq!(monitor.counter().reads(), 20);
}
