//! Error types for command construction and queue updates.

use crate::ids::QueueId;

/// Errors raised when a command is built with bad arguments or a queue is
/// driven incorrectly. Every variant is a programming error; none are retryable.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CommandError {
    /// Delta time passed to an update was negative or NaN.
    #[error("deltaTime is expected to be >= 0, got {delta_time}")]
    InvalidDeltaTime { delta_time: f64 },

    /// Duration was negative or NaN.
    #[error("duration must be >= 0, got {duration}")]
    InvalidDuration { duration: f64 },

    /// Frame count for a frame wait was zero.
    #[error("frame count must be > 0, got {frames}")]
    InvalidFrameCount { frames: u32 },

    /// Time dilation factor was not a positive, finite number.
    #[error("dilation amount must be greater than 0, got {factor}")]
    InvalidDilation { factor: f64 },

    /// Step count for a stepped ease was not positive.
    #[error("step count must be > 0, got {steps}")]
    InvalidStepCount { steps: f64 },

    /// Power for a polynomial ease was not positive.
    #[error("power must be > 0, got {power}")]
    InvalidPower { power: f64 },

    /// `update` was called on a queue that is already inside `update`.
    #[error("update can't be called recursively on queue {queue}")]
    Reentrant { queue: QueueId },

    /// `update` was called on a scheduler from a command it is running.
    #[error("update can't be called recursively on a scheduler")]
    ReentrantScheduler,
}

impl CommandError {
    /// True for errors caused by an out-of-range argument, as opposed to
    /// misuse of a queue's update cycle.
    #[inline]
    pub fn is_argument_error(&self) -> bool {
        !matches!(self, Self::Reentrant { .. } | Self::ReentrantScheduler)
    }
}

pub(crate) fn check_duration(duration: f64) -> Result<(), CommandError> {
    if duration >= 0.0 {
        Ok(())
    } else {
        Err(CommandError::InvalidDuration { duration })
    }
}

pub(crate) fn check_delta_time(delta_time: f64) -> Result<(), CommandError> {
    if delta_time >= 0.0 {
        Ok(())
    } else {
        Err(CommandError::InvalidDeltaTime { delta_time })
    }
}
