//! A per-thread runner with an explicit install/teardown lifecycle.
//!
//! Nothing is created lazily: call [`install_global`] once at startup and
//! [`teardown_global`] when done. Lookups before install fail with
//! [`RunnerError::NotInstalled`].

use std::cell::RefCell;

use cadence_core::{CommandQueueGroup, CommandScheduler};
use log::debug;

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::runner::Runner;

thread_local! {
    static GLOBAL_RUNNER: RefCell<Option<Runner>> = const { RefCell::new(None) };
}

/// Installs a runner for this thread and returns a handle to it.
pub fn install_global(config: RunnerConfig) -> Result<Runner, RunnerError> {
    GLOBAL_RUNNER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(RunnerError::AlreadyInstalled);
        }
        let runner = Runner::new(config)?;
        *slot = Some(runner.clone());
        debug!("global runner installed");
        Ok(runner)
    })
}

pub fn global_runner() -> Result<Runner, RunnerError> {
    GLOBAL_RUNNER.with(|slot| slot.borrow().clone().ok_or(RunnerError::NotInstalled))
}

pub fn global_scheduler() -> Result<CommandScheduler, RunnerError> {
    global_runner().map(|runner| runner.scheduler().clone())
}

pub fn global_queue_group() -> Result<CommandQueueGroup, RunnerError> {
    global_runner().map(|runner| runner.queue_group().clone())
}

/// Removes this thread's runner, returning it if one was installed.
/// Handles obtained earlier stay usable.
pub fn teardown_global() -> Option<Runner> {
    let runner = GLOBAL_RUNNER.with(|slot| slot.borrow_mut().take());
    if runner.is_some() {
        debug!("global runner torn down");
    }
    runner
}
