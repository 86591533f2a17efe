//! Cadence core: composable, time-driven commands.
//!
//! A [`Command`] is a resumable step of timed work. Combinators such as
//! [`sequence`], [`parallel`] and [`coroutine`] build trees of commands, and a
//! [`CommandQueue`], [`CommandScheduler`] or [`CommandQueueGroup`] drives
//! those trees forward one `update(delta_time)` at a time. Everything here is
//! single-threaded and engine-agnostic; hosts supply the ticks.

pub mod combinators;
pub mod command;
pub mod ease;
pub mod error;
pub mod group;
pub mod ids;
pub mod queue;
pub mod reference;
pub mod scheduler;
pub mod tween;

pub use combinators::{
    choose_random, choose_random_with, consume_time, coroutine, defer, dilate_time, interruptable,
    interval, map_parallel, map_sequential, parallel, repeat, repeat_forever, sequence,
    wait_for_frames, wait_for_time, Yield,
};
pub use command::{act, from_fn, none, BoxedCommand, Command, CommandOperation, CommandState};
pub use ease::{Ease, WeightedEase};
pub use error::CommandError;
pub use group::CommandQueueGroup;
pub use ids::QueueId;
pub use queue::CommandQueue;
pub use reference::Ref;
pub use scheduler::CommandScheduler;
