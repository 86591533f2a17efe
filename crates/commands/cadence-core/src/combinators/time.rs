//! Time-based primitives: waits, intervals and time dilation.

use crate::command::{from_fn, none, BoxedCommand, Command, CommandOperation, CommandState};
use crate::combinators::structure::sequence;
use crate::ease::Ease;
use crate::error::{check_duration, CommandError};

struct WaitForTime {
    duration: f64,
    elapsed: f64,
}

impl Command for WaitForTime {
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        if operation.is_fast_forward() {
            self.elapsed = 0.0;
            return CommandState::complete(delta_time);
        }
        self.elapsed += delta_time;
        if self.elapsed >= self.duration {
            let overflow = self.elapsed - self.duration;
            self.elapsed = 0.0;
            CommandState::complete(overflow)
        } else {
            CommandState::running(0.0)
        }
    }
}

/// Waits until `duration` has elapsed. Time beyond the duration is handed to
/// whatever runs next.
pub fn wait_for_time(duration: f64) -> Result<BoxedCommand, CommandError> {
    check_duration(duration)?;
    if duration == 0.0 {
        return Ok(none());
    }
    Ok(Box::new(WaitForTime {
        duration,
        elapsed: 0.0,
    }))
}

struct WaitForFrames {
    frames: u32,
    remaining: u32,
}

impl Command for WaitForFrames {
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        if operation.is_fast_forward() {
            self.remaining = self.frames;
            return CommandState::complete(delta_time);
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            return CommandState::running(0.0);
        }
        self.remaining = self.frames;
        CommandState::complete(delta_time)
    }
}

/// Waits for `frames` calls, ignoring time. Completes on the call after the
/// last waited frame, passing that call's time through untouched.
pub fn wait_for_frames(frames: u32) -> Result<BoxedCommand, CommandError> {
    if frames == 0 {
        return Err(CommandError::InvalidFrameCount { frames });
    }
    Ok(Box::new(WaitForFrames {
        frames,
        remaining: frames,
    }))
}

struct Interval<F> {
    callback: F,
    duration: f64,
    ease: Option<Ease>,
    elapsed: f64,
}

impl<F> Command for Interval<F>
where
    F: FnMut(f64),
{
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        self.elapsed += delta_time;

        let mut t = if operation.is_fast_forward() {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        if t != 1.0 {
            if let Some(ease) = &self.ease {
                t = ease(t);
            }
        }
        (self.callback)(t);

        if operation.is_fast_forward() {
            self.elapsed = 0.0;
            CommandState::complete(delta_time)
        } else if self.elapsed >= self.duration {
            let overflow = self.elapsed - self.duration;
            self.elapsed = 0.0;
            CommandState::complete(overflow)
        } else {
            CommandState::running(0.0)
        }
    }
}

/// Calls `callback` every tick with progress `t` normalised to `0..=1` over
/// `duration`, optionally reshaped by `ease`. The completing tick always
/// reports `t = 1`.
pub fn interval<F>(callback: F, duration: f64, ease: Option<Ease>) -> Result<BoxedCommand, CommandError>
where
    F: FnMut(f64) + 'static,
{
    check_duration(duration)?;
    if duration == 0.0 {
        let mut callback = callback;
        return Ok(from_fn(move |delta_time, _| {
            callback(1.0);
            CommandState::complete(delta_time)
        }));
    }
    Ok(Box::new(Interval {
        callback,
        duration,
        ease,
        elapsed: 0.0,
    }))
}

/// Completes immediately and swallows the rest of the tick's time, so a
/// large jump (e.g. after a stall) doesn't cascade into later commands.
pub fn consume_time() -> BoxedCommand {
    from_fn(|_, _| CommandState::complete(0.0))
}

struct DilateTime {
    factor: f64,
    command: BoxedCommand,
}

impl Command for DilateTime {
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        let result = self.command.advance(delta_time * self.factor, operation);
        CommandState {
            delta_time: result.delta_time / self.factor,
            complete: result.complete,
        }
    }
}

/// Scales how fast time flows through `commands`. A factor of 2 runs them
/// twice as fast.
pub fn dilate_time<I>(factor: f64, commands: I) -> Result<BoxedCommand, CommandError>
where
    I: IntoIterator<Item = BoxedCommand>,
{
    if !(factor > 0.0 && factor.is_finite()) {
        return Err(CommandError::InvalidDilation { factor });
    }
    Ok(Box::new(DilateTime {
        factor,
        command: sequence(commands),
    }))
}
