use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub frame_time_ms: f32,
}

/// Shared read side of the loop metrics. The frame loop publishes a snapshot
/// once per interval; the overlay (and anything else holding a clone) reads
/// the latest one.
#[derive(Debug, Clone, Default)]
pub struct MetricsHandle {
    snapshot: Arc<Mutex<LoopMetricsSnapshot>>,
}

impl MetricsHandle {
    pub fn snapshot(&self) -> LoopMetricsSnapshot {
        match self.snapshot.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub(crate) fn publish(&self, snapshot: LoopMetricsSnapshot) {
        match self.snapshot.lock() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    frames: u32,
    ticks: u32,
    frame_time_sum: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval_start: Instant::now(),
            interval,
            frames: 0,
            ticks: 0,
            frame_time_sum: Duration::ZERO,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_dt);
    }

    pub(crate) fn record_ticks(&mut self, count: u32) {
        self.ticks = self.ticks.saturating_add(count);
    }

    /// Emits a snapshot and restarts the window once the interval elapses.
    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = if self.frames == 0 {
            0.0
        } else {
            self.frame_time_sum.as_secs_f32() / self.frames as f32 * 1000.0
        };
        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            tps: self.ticks as f32 / elapsed_seconds,
            frame_time_ms,
        };

        self.interval_start = now;
        self.frames = 0;
        self.ticks = 0;
        self.frame_time_sum = Duration::ZERO;
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_rates_over_the_interval() {
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();
        accumulator.record_frame(Duration::from_millis(16));
        accumulator.record_frame(Duration::from_millis(16));
        accumulator.record_ticks(4);

        let snapshot = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("snapshot after interval");

        assert!((snapshot.fps - 2.0).abs() < 0.1);
        assert!((snapshot.tps - 4.0).abs() < 0.1);
        assert!((snapshot.frame_time_ms - 16.0).abs() < 0.01);
    }

    #[test]
    fn no_snapshot_before_the_interval() {
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();
        accumulator.record_frame(Duration::from_millis(16));
        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(100))
            .is_none());
    }

    #[test]
    fn counters_reset_after_each_snapshot() {
        let mut accumulator = MetricsAccumulator::new(Duration::from_millis(10));
        let base = Instant::now();
        accumulator.record_frame(Duration::from_millis(16));
        accumulator.record_ticks(1);
        accumulator
            .maybe_snapshot(base + Duration::from_millis(10))
            .expect("first snapshot");

        let second = accumulator
            .maybe_snapshot(base + Duration::from_millis(20))
            .expect("second snapshot");
        assert_eq!(second.fps, 0.0);
        assert_eq!(second.tps, 0.0);
        assert_eq!(second.frame_time_ms, 0.0);
    }

    #[test]
    fn handle_round_trips_published_values() {
        let handle = MetricsHandle::default();
        handle.publish(LoopMetricsSnapshot {
            fps: 60.0,
            tps: 60.0,
            frame_time_ms: 16.6,
        });
        let read = handle.snapshot();
        assert_eq!(read.fps, 60.0);
        assert_eq!(read.tps, 60.0);
    }
}
