//! Combinators that build commands out of other commands.
//!
//! - structure: sequence, parallel, repeat, repeat_forever
//! - time: wait_for_time, wait_for_frames, interval, consume_time, dilate_time
//! - flow: coroutine, defer, choose_random, interruptable
//! - functional: map_parallel, map_sequential

pub mod flow;
pub mod functional;
pub mod structure;
pub mod time;

pub use flow::{choose_random, choose_random_with, coroutine, defer, interruptable, Yield};
pub use functional::{map_parallel, map_sequential};
pub use structure::{parallel, repeat, repeat_forever, sequence};
pub use time::{consume_time, dilate_time, interval, wait_for_frames, wait_for_time};
