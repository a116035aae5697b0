use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clock_viewer::frame::{FpsCounter, FrameClock, TimeSource};

/// Manually-driven clock shared between the test and the frame clock;
/// sleeps advance time and are recorded.
#[derive(Clone)]
struct SharedClock(Rc<RefCell<ClockState>>);

struct ClockState {
    now: Instant,
    slept: Vec<Duration>,
}

impl SharedClock {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(ClockState {
            now: Instant::now(),
            slept: Vec::new(),
        })))
    }

    fn advance(&self, duration: Duration) {
        self.0.borrow_mut().now += duration;
    }

    fn slept(&self) -> Vec<Duration> {
        self.0.borrow().slept.clone()
    }
}

impl TimeSource for SharedClock {
    fn now(&mut self) -> Instant {
        self.0.borrow().now
    }

    fn sleep(&mut self, duration: Duration) {
        let mut state = self.0.borrow_mut();
        state.slept.push(duration);
        state.now += duration;
    }
}

#[test]
fn first_tick_of_a_fresh_clock_is_zero() {
    let handle = SharedClock::new();
    handle.advance(Duration::from_secs(5));
    let mut clock = FrameClock::with_source(handle.clone());
    assert_eq!(clock.tick(), 0.0);
}

#[test]
fn sixteen_milliseconds_measure_as_sixteen_thousandths() {
    let handle = SharedClock::new();
    let mut clock = FrameClock::with_source(handle.clone());
    clock.tick();

    handle.advance(Duration::from_millis(16));
    let delta = clock.tick();
    assert!((delta - 0.016).abs() < 1e-6);
}

#[test]
fn deltas_are_never_negative() {
    let handle = SharedClock::new();
    let mut clock = FrameClock::with_source(handle.clone());
    for _ in 0..10 {
        assert!(clock.tick() >= 0.0);
    }
}

#[test]
fn pacing_blocks_out_the_remainder_of_the_interval() {
    let handle = SharedClock::new();
    let mut clock = FrameClock::with_source(handle.clone());
    clock.set_target_fps(Some(60.24)); // 16.6ms interval
    clock.tick();

    // 2ms of simulated per-frame work; the clock must block for the
    // remaining ~14.6ms before measuring.
    handle.advance(Duration::from_millis(2));
    let delta = clock.tick();

    let slept = handle.slept();
    assert_eq!(slept.len(), 1);
    assert!(slept[0] >= Duration::from_millis(14));

    // Delta reflects true elapsed time: work plus wait.
    assert!((delta - 0.0166).abs() < 2e-4);
}

#[test]
fn pacing_never_blocks_a_slow_frame_further() {
    let handle = SharedClock::new();
    let mut clock = FrameClock::with_source(handle.clone());
    clock.set_target_fps(Some(100.0));
    clock.tick();

    handle.advance(Duration::from_millis(50));
    let delta = clock.tick();
    assert!(handle.slept().is_empty());
    assert!((delta - 0.050).abs() < 1e-6);
}

#[test]
fn pacing_applies_to_every_subsequent_tick() {
    let handle = SharedClock::new();
    let mut clock = FrameClock::with_source(handle.clone());
    clock.set_target_fps(Some(50.0)); // 20ms
    clock.tick();

    for _ in 0..5 {
        handle.advance(Duration::from_millis(3));
        let delta = clock.tick();
        assert!((delta - 0.020).abs() < 1e-4);
    }
    assert_eq!(handle.slept().len(), 5);
}

#[test]
fn fps_counter_tracks_the_paced_rate() {
    let handle = SharedClock::new();
    let mut clock = FrameClock::with_source(handle.clone());
    clock.set_target_fps(Some(50.0));
    let mut counter = FpsCounter::new(1.0);
    clock.tick();

    let mut reported = None;
    for _ in 0..60 {
        let delta = clock.tick();
        if let Some(fps) = counter.tick(delta) {
            reported = Some(fps);
        }
    }
    let fps = reported.expect("one report per simulated second");
    assert!((fps - 50.0).abs() < 1.0);
}
