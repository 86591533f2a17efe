//! The command primitive.
//!
//! A [`Command`] is a resumable unit of timed work. Every call to
//! [`Command::advance`] hands it some time; it consumes what it needs and
//! returns the rest, together with whether its unit of work has finished.
//! Once a command reports completion, the next call restarts it.

use serde::{Deserialize, Serialize};

/// How a command should treat the current call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandOperation {
    /// Consume time as usual.
    #[default]
    Normal,
    /// Complete immediately, running any finalisation, without consuming
    /// real time.
    FastForward,
}

impl CommandOperation {
    #[inline]
    pub fn is_fast_forward(self) -> bool {
        matches!(self, Self::FastForward)
    }
}

/// Result of advancing a command by one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CommandState {
    /// Time the command did not consume.
    pub delta_time: f64,
    /// Whether the command finished its unit of work on this call.
    pub complete: bool,
}

impl CommandState {
    #[inline]
    pub fn complete(delta_time: f64) -> Self {
        Self {
            delta_time,
            complete: true,
        }
    }

    #[inline]
    pub fn running(delta_time: f64) -> Self {
        Self {
            delta_time,
            complete: false,
        }
    }
}

/// A stateful, resumable step of timed work.
///
/// Commands are driven by a single queue or scheduler at a time.
pub trait Command {
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState;

    fn boxed(self) -> BoxedCommand
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

pub type BoxedCommand = Box<dyn Command>;

impl<F> Command for F
where
    F: FnMut(f64, CommandOperation) -> CommandState,
{
    #[inline]
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        self(delta_time, operation)
    }
}

/// Wraps a closure taking `(delta_time, operation)` as a command.
pub fn from_fn<F>(f: F) -> BoxedCommand
where
    F: FnMut(f64, CommandOperation) -> CommandState + 'static,
{
    Box::new(f)
}

/// A one-shot action. Completes on the call it runs, using no time.
pub fn act<F>(mut action: F) -> BoxedCommand
where
    F: FnMut() + 'static,
{
    from_fn(move |delta_time, _| {
        action();
        CommandState::complete(delta_time)
    })
}

/// A command that does nothing and completes immediately.
pub fn none() -> BoxedCommand {
    from_fn(|delta_time, _| CommandState::complete(delta_time))
}
