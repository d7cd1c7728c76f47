//! Frame timing, pacing and delta time.
//!
//! [`FramePacer`] enforces the minimum frame interval and produces a clamped
//! delta each frame. [`Time`] accumulates those deltas so game code can read
//! the frame delta, total elapsed time and frame count.
//!
//! ```text
//! last ──────── min_frame ──────── deadline ─── now
//!      (sleep until deadline, spin the last sliver)
//! delta = min((now - last) / 1000, max_delta)
//! ```
//!
//! The clamp keeps a long stall (a breakpoint, a window drag, a scheduler
//! hiccup) from turning into one giant simulation step.

use std::time::{Duration, Instant};

/// Sleeps shorter than this are finished by spinning, since `thread::sleep`
/// routinely overshoots by around a millisecond.
const SPIN_SLACK: Duration = Duration::from_micros(500);

/// A millisecond clock the pacer can read and sleep on.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_millis(&self) -> u64;

    /// Block the calling thread for roughly `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`].
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        if duration > SPIN_SLACK {
            std::thread::sleep(duration - SPIN_SLACK);
        }
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}

/// A clock that only moves when told to. Sleeping advances it exactly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward without sleeping.
    pub fn advance(&mut self, millis: u64) {
        self.now += millis;
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        // Round up so a sub-millisecond sleep still makes progress.
        self.now += duration.as_micros().div_ceil(1000) as u64;
    }
}

/// Waits out the minimum frame interval and measures the frame delta.
pub struct FramePacer {
    clock: Box<dyn Clock>,
    min_frame: Duration,
    max_delta: f32,
    last_tick: u64,
}

impl FramePacer {
    pub fn new(clock: Box<dyn Clock>, min_frame: Duration, max_delta: f32) -> Self {
        let last_tick = clock.now_millis();
        Self {
            clock,
            min_frame,
            max_delta,
            last_tick,
        }
    }

    /// Restart measurement from the current clock reading.
    pub fn reset(&mut self) {
        self.last_tick = self.clock.now_millis();
    }

    /// Block until at least the minimum interval has passed since the last
    /// tick, then return the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let deadline = self.last_tick + self.min_frame.as_millis() as u64;
        let now = self.clock.now_millis();
        if now < deadline {
            self.clock.sleep(Duration::from_millis(deadline - now));
        }

        let now = self.clock.now_millis();
        let delta = now.saturating_sub(self.last_tick) as f32 / 1000.0;
        self.last_tick = now;
        delta.min(self.max_delta)
    }
}

/// Frame timing resource. Advanced by the game loop once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    /// Duration of the current frame's step, in seconds.
    delta: f32,
    /// Total simulated time.
    elapsed: f64,
    /// Frame counter.
    frame_count: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one simulated step of `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += f64::from(delta);
        self.frame_count += 1;
    }

    /// Delta time in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Total simulated time since start, in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Estimated FPS based on the last frame's delta.
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 {
            1.0 / self.delta
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// A clock whose readings jump by a fixed amount on every sleep, to model
    /// a process that gets descheduled for far longer than it asked.
    struct StallingClock {
        now: u64,
        stall: u64,
    }

    impl Clock for StallingClock {
        fn now_millis(&self) -> u64 {
            self.now
        }

        fn sleep(&mut self, _duration: Duration) {
            self.now += self.stall;
        }
    }

    #[test]
    fn tick_waits_for_min_interval() {
        let mut pacer = FramePacer::new(Box::new(ManualClock::new()), Duration::from_millis(16), 0.05);
        let delta = pacer.tick();
        approx::assert_relative_eq!(delta, 0.016);
    }

    #[test]
    fn first_delta_ignores_time_before_the_pacer() {
        let mut clock = ManualClock::new();
        clock.advance(5_000);
        assert_eq!(clock.now_millis(), 5_000);

        let mut pacer = FramePacer::new(Box::new(clock), Duration::from_millis(16), 0.05);
        approx::assert_relative_eq!(pacer.tick(), 0.016);
    }

    #[test]
    fn tick_clamps_long_stalls() {
        let clock = StallingClock { now: 0, stall: 2_000 };
        let mut pacer = FramePacer::new(Box::new(clock), Duration::from_millis(16), 0.05);
        for _ in 0..5 {
            assert!(pacer.tick() <= 0.05);
        }
    }

    /// A clock the test can move while the pacer owns it.
    #[derive(Clone, Default)]
    struct SharedClock(Rc<Cell<u64>>);

    impl Clock for SharedClock {
        fn now_millis(&self) -> u64 {
            self.0.get()
        }

        fn sleep(&mut self, duration: Duration) {
            self.0.set(self.0.get() + duration.as_millis() as u64);
        }
    }

    #[test]
    fn late_frame_uses_measured_delta() {
        let clock = SharedClock::default();
        let mut pacer = FramePacer::new(Box::new(clock.clone()), Duration::from_millis(16), 0.05);

        clock.0.set(30);
        approx::assert_relative_eq!(pacer.tick(), 0.03);
        assert_eq!(clock.now_millis(), 30);

        clock.0.set(30 + 120);
        approx::assert_relative_eq!(pacer.tick(), 0.05);
    }

    #[test]
    fn manual_clock_rounds_sub_millisecond_sleeps_up() {
        let mut clock = ManualClock::new();
        clock.sleep(Duration::from_micros(200));
        assert_eq!(clock.now_millis(), 1);
    }

    #[test]
    fn time_accumulates() {
        let mut time = Time::new();
        for _ in 0..4 {
            time.advance(0.25);
        }
        assert_eq!(time.frame_count(), 4);
        assert_eq!(time.elapsed_secs(), 1.0);
        assert_eq!(time.fps(), 4.0);
    }
}
