//! Error-feedback frame pacing and the live render loop.
//!
//! A fixed per-tick sleep drifts whenever the target period is not an
//! exact multiple of the scheduler's resolution. The pacer instead
//! integrates the signed scheduling error each tick and sleeps by the
//! accumulated amount, so the long-run average rate converges on the
//! target even though any single tick may be off. The accumulator is
//! clamped to one second either way so a long stall cannot wind it up.

use std::time::{Duration, Instant};

use crate::{
    core::{Canvas, OverlayState},
    error::UeitResult,
    pipeline::FramePipeline,
};

/// Allowed target frame rates, frames per second.
pub const RATE_MIN: f64 = 1.0;
pub const RATE_MAX: f64 = 100.0;

/// What the loop should do between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pace {
    Sleep(Duration),
    Yield,
}

/// Leaky-integrator tick timing. Pure over elapsed durations, so the
/// control law is testable without a clock.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    target_period: f64,
    error: f64,
}

impl FramePacer {
    /// `target_rate` is clamped into `[1, 100]` frames per second.
    pub fn new(target_rate: f64) -> Self {
        let rate = target_rate.clamp(RATE_MIN, RATE_MAX);
        Self {
            target_period: 1.0 / rate,
            error: 0.0,
        }
    }

    pub fn target_period(&self) -> f64 {
        self.target_period
    }

    /// Accumulated scheduling error in seconds, always within `[-1, 1]`.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Feeds one measured tick duration into the accumulator and derives
    /// the wait for this tick: `round(error * 1000)` milliseconds when
    /// positive, otherwise a bare yield (never a zero-or-negative sleep).
    pub fn step(&mut self, elapsed: Duration) -> Pace {
        self.error = (self.error + self.target_period - elapsed.as_secs_f64()).clamp(-1.0, 1.0);
        let sleep_ms = (self.error * 1000.0).round() as i64;
        if sleep_ms > 0 {
            Pace::Sleep(Duration::from_millis(sleep_ms as u64))
        } else {
            Pace::Yield
        }
    }
}

/// Measured-FPS estimator: publishes a new clamped reading once more than
/// a second of wall time has accumulated. Pure over millisecond
/// timestamps.
#[derive(Clone, Copy, Debug)]
pub struct FpsMeter {
    counter: u64,
    prev_ms: u64,
    current: i64,
}

impl FpsMeter {
    pub fn new(start_ms: u64) -> Self {
        Self {
            counter: 0,
            prev_ms: start_ms,
            current: 0,
        }
    }

    /// Records one presented frame at `now_ms` and returns the current
    /// estimate, clamped into `[0, 99]`.
    pub fn record(&mut self, now_ms: u64) -> i64 {
        self.counter += 1;
        let delta = now_ms.saturating_sub(self.prev_ms);
        if delta > 1000 {
            let raw = ((self.counter * 1000 + delta / 2) / delta) as i64;
            self.current = raw.clamp(0, OverlayState::FPS_MAX);
            self.counter = 0;
            self.prev_ms = now_ms;
        }
        self.current
    }
}

/// The display surface the live loop draws into. The shell owns the
/// window; the core only needs somewhere to put pixels, the current size,
/// and a cooperative stop signal checked once per iteration.
pub trait PresentSink {
    fn dimensions(&self) -> (u32, u32);

    fn present(&mut self, frame: &Canvas) -> UeitResult<()>;

    /// Polled at the top of every loop iteration; the loop finishes its
    /// current frame and then exits.
    fn stop_requested(&mut self) -> bool;
}

/// Runs the continuous render loop until the sink requests a stop.
pub fn run_live(
    pipeline: &mut FramePipeline,
    pacer: &mut FramePacer,
    sink: &mut impl PresentSink,
) -> UeitResult<()> {
    let clock = Instant::now();
    let mut meter = FpsMeter::new(0);
    let mut frame_number: u64 = 0;
    let mut prev_tick = Instant::now();

    while !sink.stop_requested() {
        let (width, height) = sink.dimensions();
        frame_number = (frame_number + 1) % OverlayState::FRAME_CYCLE;
        let fps = meter.record(clock.elapsed().as_millis() as u64);

        let state = OverlayState::new(frame_number, fps);
        let frame = pipeline.frame(width, height, &state)?;
        sink.present(frame)?;

        let elapsed = prev_tick.elapsed();
        prev_tick = Instant::now();
        match pacer.step(elapsed) {
            Pace::Sleep(d) => std::thread::sleep(d),
            Pace::Yield => std::thread::yield_now(),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn on_target_ticks_never_sleep() {
        let mut pacer = FramePacer::new(50.0);
        for _ in 0..100 {
            assert_eq!(pacer.step(secs(0.02)), Pace::Yield);
            assert_eq!(pacer.error(), 0.0);
        }
    }

    #[test]
    fn fast_ticks_accumulate_sleep() {
        let mut pacer = FramePacer::new(10.0);
        // 10 ms of work against a 100 ms period: 90 ms owed.
        assert_eq!(pacer.step(secs(0.01)), Pace::Sleep(Duration::from_millis(90)));
    }

    #[test]
    fn error_clamps_after_long_stall() {
        let mut pacer = FramePacer::new(60.0);
        pacer.step(secs(30.0));
        assert_eq!(pacer.error(), -1.0);
        // Recovery is bounded the same way.
        for _ in 0..10_000 {
            pacer.step(secs(0.0));
        }
        assert_eq!(pacer.error(), 1.0);
        assert_eq!(pacer.step(secs(0.0)), Pace::Sleep(Duration::from_secs(1)));
    }

    #[test]
    fn error_stays_bounded_over_jittery_sequences() {
        let mut pacer = FramePacer::new(60.0);
        let pattern = [0.001, 0.5, 0.013, 0.2, 0.0, 3.0, 0.016];
        for i in 0..1000 {
            let pace = pacer.step(secs(pattern[i % pattern.len()]));
            assert!((-1.0..=1.0).contains(&pacer.error()));
            let expect_ms = (pacer.error() * 1000.0).round() as i64;
            match pace {
                Pace::Sleep(d) => assert_eq!(d, Duration::from_millis(expect_ms as u64)),
                Pace::Yield => assert!(expect_ms <= 0),
            }
        }
    }

    #[test]
    fn rate_is_clamped_to_documented_range() {
        assert_eq!(FramePacer::new(0.25).target_period(), 1.0);
        assert_eq!(FramePacer::new(400.0).target_period(), 0.01);
    }

    #[test]
    fn fps_meter_publishes_after_a_second() {
        let mut meter = FpsMeter::new(0);
        for i in 1..=30 {
            assert_eq!(meter.record(i * 33), 0);
        }
        // 31st frame lands past the 1s window: 31 frames over 1023 ms.
        let fps = meter.record(1023);
        assert_eq!(fps, (31 * 1000 + 1023 / 2) / 1023);
    }

    #[test]
    fn fps_meter_clamps_extremes() {
        let mut meter = FpsMeter::new(0);
        for _ in 0..100_000 {
            meter.record(500);
        }
        assert_eq!(meter.record(1001), 99);

        let mut slow = FpsMeter::new(0);
        assert_eq!(slow.record(1_000_000), 0);
    }
}
