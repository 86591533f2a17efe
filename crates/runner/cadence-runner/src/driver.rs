//! Drivers turn host timestamps into runner ticks.
//!
//! Both drivers treat their first timestamp as a baseline and do not tick on
//! it. Gaps between timestamps are clamped to the runner's `max_delta_time`.

use std::time::Duration;

use log::debug;

use crate::clock::Clock;
use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::runner::Runner;

/// A host-specific source of ticks.
pub trait Driver {
    /// Feeds the timestamp (milliseconds) of the current frame. Returns the
    /// delta in seconds the runner was ticked by, or `None` when this frame
    /// did not tick.
    fn advance(&mut self, runner: &Runner, timestamp_ms: f64) -> Result<Option<f64>, RunnerError>;

    /// Stops the driver. Later frames are ignored.
    fn cancel(&mut self);

    fn is_cancelled(&self) -> bool;
}

/// Delta tracking shared by the drivers.
#[derive(Clone, Debug)]
struct FrameTiming {
    last_ms: Option<f64>,
    max_delta_ms: f64,
}

impl FrameTiming {
    fn new(config: &RunnerConfig) -> Self {
        Self {
            last_ms: None,
            max_delta_ms: config.max_delta_ms(),
        }
    }

    /// Seconds since the previous frame, or `None` for a baseline frame.
    fn delta_seconds(&mut self, timestamp_ms: f64) -> Option<f64> {
        let previous = self.last_ms.replace(timestamp_ms)?;
        if timestamp_ms < previous {
            debug!("timestamp went backwards ({previous} -> {timestamp_ms}), re-basing");
            return None;
        }
        Some((timestamp_ms - previous).min(self.max_delta_ms) / 1000.0)
    }
}

fn tick(
    timing: &mut FrameTiming,
    cancelled: bool,
    runner: &Runner,
    timestamp_ms: f64,
) -> Result<Option<f64>, RunnerError> {
    if cancelled {
        debug!("driver cancelled, skipping frame at {timestamp_ms}");
        return Ok(None);
    }
    let Some(delta) = timing.delta_seconds(timestamp_ms) else {
        return Ok(None);
    };
    runner.update(delta)?;
    Ok(Some(delta))
}

/// Driven by the host's animation-frame callback (e.g. a browser's
/// `requestAnimationFrame`), which supplies the frame timestamps.
#[derive(Clone, Debug)]
pub struct AnimationFrameDriver {
    timing: FrameTiming,
    cancelled: bool,
}

impl AnimationFrameDriver {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            timing: FrameTiming::new(config),
            cancelled: false,
        }
    }

    /// Call from the host's frame callback.
    pub fn on_frame(
        &mut self,
        runner: &Runner,
        timestamp_ms: f64,
    ) -> Result<Option<f64>, RunnerError> {
        self.advance(runner, timestamp_ms)
    }
}

impl Driver for AnimationFrameDriver {
    fn advance(&mut self, runner: &Runner, timestamp_ms: f64) -> Result<Option<f64>, RunnerError> {
        tick(&mut self.timing, self.cancelled, runner, timestamp_ms)
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Polls a [`Clock`] on a fixed interval.
#[derive(Clone, Debug)]
pub struct TimerDriver<C> {
    clock: C,
    timing: FrameTiming,
    tick_interval: Duration,
    cancelled: bool,
}

impl<C: Clock> TimerDriver<C> {
    pub fn new(clock: C, config: &RunnerConfig) -> Self {
        Self {
            clock,
            timing: FrameTiming::new(config),
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            cancelled: false,
        }
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Reads the clock and ticks the runner once.
    pub fn poll(&mut self, runner: &Runner) -> Result<Option<f64>, RunnerError> {
        let now = self.clock.now_ms();
        self.advance(runner, now)
    }

    /// Polls, then sleeps `tick_interval`, until `done` returns true or the
    /// driver is cancelled. Blocks the calling thread.
    pub fn run_until<F>(&mut self, runner: &Runner, mut done: F) -> Result<(), RunnerError>
    where
        F: FnMut(&Runner) -> bool,
    {
        loop {
            self.poll(runner)?;
            if self.cancelled || done(runner) {
                return Ok(());
            }
            std::thread::sleep(self.tick_interval);
        }
    }
}

impl<C: Clock> Driver for TimerDriver<C> {
    fn advance(&mut self, runner: &Runner, timestamp_ms: f64) -> Result<Option<f64>, RunnerError> {
        tick(&mut self.timing, self.cancelled, runner, timestamp_ms)
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
