//! The runner: one scheduler and one queue group ticked together.

use cadence_core::{BoxedCommand, CommandQueue, CommandQueueGroup, CommandScheduler};
use log::debug;

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// A [`CommandScheduler`] and a [`CommandQueueGroup`] sharing one clock.
///
/// `Runner` is a shared handle; clones drive the same scheduler and group.
#[derive(Clone)]
pub struct Runner {
    scheduler: CommandScheduler,
    queue_group: CommandQueueGroup,
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        Ok(Self {
            scheduler: CommandScheduler::new(),
            queue_group: CommandQueueGroup::new(),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    #[inline]
    pub fn scheduler(&self) -> &CommandScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn queue_group(&self) -> &CommandQueueGroup {
        &self.queue_group
    }

    /// Shorthand for `scheduler().add(commands)`.
    pub fn add<I>(&self, commands: I)
    where
        I: IntoIterator<Item = BoxedCommand>,
    {
        self.scheduler.add(commands);
    }

    /// Shorthand for `queue_group().create_queue()`.
    pub fn create_queue(&self) -> CommandQueue {
        self.queue_group.create_queue()
    }

    /// Ticks the scheduler, then the queue group, by `delta_time` seconds,
    /// clamped to `max_delta_time`.
    ///
    /// Both halves always run. If either fails, the first error is returned.
    pub fn update(&self, delta_time: f64) -> Result<(), RunnerError> {
        let max = self.config.max_delta_time;
        let delta_time = if delta_time > max {
            debug!("clamping tick of {delta_time}s to {max}s");
            max
        } else {
            delta_time
        };
        let scheduled = self.scheduler.update(delta_time);
        let grouped = self.queue_group.update(delta_time);
        scheduled.and(grouped)?;
        Ok(())
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            scheduler: CommandScheduler::new(),
            queue_group: CommandQueueGroup::new(),
            config: RunnerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{act, wait_for_time};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn clamps_large_ticks() {
        let runner = Runner::default();
        let called = Rc::new(Cell::new(false));
        let flag = called.clone();
        runner.add([wait_for_time(1.5).unwrap(), act(move || flag.set(true))]);
        runner.update(10.0).unwrap();
        assert!(!called.get());
        runner.update(0.5).unwrap();
        assert!(called.get());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = RunnerConfig {
            max_delta_time: 0.0,
            ..Default::default()
        };
        assert!(matches!(Runner::new(config), Err(RunnerError::Config { .. })));
    }
}
