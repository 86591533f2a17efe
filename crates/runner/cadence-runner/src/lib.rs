//! Cadence runner: drives cadence schedulers from a host clock.
//!
//! A [`Runner`] pairs a [`CommandScheduler`](cadence_core::CommandScheduler)
//! with a [`CommandQueueGroup`](cadence_core::CommandQueueGroup). Drivers
//! feed it frame timestamps: [`TimerDriver`] polls a [`Clock`], and
//! [`AnimationFrameDriver`] is called from the host's frame callback.

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod global;
pub mod runner;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RunnerConfig;
pub use driver::{AnimationFrameDriver, Driver, TimerDriver};
pub use error::RunnerError;
pub use global::{global_queue_group, global_runner, global_scheduler, install_global, teardown_global};
pub use runner::Runner;
