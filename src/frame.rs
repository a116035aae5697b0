use std::time::{Duration, Instant};

/// Monotonic time source for frame timing.
///
/// Production code uses [`MonotonicClock`]; tests drive a manual clock so
/// timing behavior can be checked without real sleeps.
pub trait TimeSource {
    fn now(&mut self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// `std` clock: `Instant::now` plus a blocking thread sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl TimeSource for MonotonicClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Per-frame delta-time measurement with optional frame pacing.
///
/// The first `tick` has no reference point and returns 0. When a target
/// interval is set, `tick` blocks until that much time has passed since the
/// previous tick and only then measures, so the returned delta reflects
/// true elapsed wall time including the wait. Deltas are never negative.
#[derive(Debug)]
pub struct FrameClock<T: TimeSource = MonotonicClock> {
    source: T,
    last_tick: Option<Instant>,
    target_interval: Option<Duration>,
}

impl FrameClock<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_source(MonotonicClock)
    }

    /// Clock paced to at most `fps` frames per second.
    pub fn with_target_fps(fps: f32) -> Self {
        let mut clock = Self::new();
        clock.set_target_fps(Some(fps));
        clock
    }
}

impl<T: TimeSource> FrameClock<T> {
    pub fn with_source(source: T) -> Self {
        Self {
            source,
            last_tick: None,
            target_interval: None,
        }
    }

    /// Set or clear the pacing target. `None` and non-positive rates both
    /// disable pacing.
    pub fn set_target_fps(&mut self, fps: Option<f32>) {
        self.target_interval = fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));
    }

    pub fn target_interval(&self) -> Option<Duration> {
        self.target_interval
    }

    /// Advance the clock and return elapsed seconds since the previous
    /// tick, pacing first if a target interval is configured.
    pub fn tick(&mut self) -> f32 {
        if let (Some(last), Some(target)) = (self.last_tick, self.target_interval) {
            let elapsed = self.source.now().saturating_duration_since(last);
            if elapsed < target {
                self.source.sleep(target - elapsed);
            }
        }

        let now = self.source.now();
        let delta = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        delta
    }
}

impl Default for FrameClock<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame-rate accounting: accumulates deltas and reports the average rate
/// once per reporting interval.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    report_interval: f32,
    frames: u32,
    elapsed: f32,
}

impl FpsCounter {
    pub fn new(report_interval: f32) -> Self {
        Self {
            report_interval,
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// Count one frame; returns the average FPS when a report is due.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.report_interval && self.elapsed > 0.0 {
            let fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(fps)
        } else {
            None
        }
    }
}
