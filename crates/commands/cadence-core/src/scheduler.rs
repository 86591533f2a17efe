//! CommandScheduler: runs independent command chains side by side.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};

use crate::command::{BoxedCommand, CommandOperation};
use crate::error::{check_delta_time, CommandError};
use crate::queue::CommandQueue;

#[derive(Default)]
struct SchedulerInner {
    slots: RefCell<Vec<CommandQueue>>,
    paused: Cell<bool>,
    updating: Cell<bool>,
}

/// Runs many command chains at once. Each `add` call becomes its own slot:
/// the commands in one call run in sequence, while slots run in parallel.
///
/// Like [`CommandQueue`], this is a shared handle.
#[derive(Clone, Default)]
pub struct CommandScheduler {
    inner: Rc<SchedulerInner>,
}

impl CommandScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    #[inline]
    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);
    }

    /// Number of slots still running.
    pub fn len(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Schedules `commands` as one sequence, running alongside everything
    /// else on the scheduler. Adding no commands does nothing.
    pub fn add<I>(&self, commands: I)
    where
        I: IntoIterator<Item = BoxedCommand>,
    {
        let mut commands = commands.into_iter().peekable();
        if commands.peek().is_none() {
            return;
        }
        let queue = CommandQueue::new();
        queue.enqueue(commands);
        self.inner.slots.borrow_mut().push(queue);
    }

    /// Advances every slot by `delta_time`, in the order the slots were
    /// added, and retires the slots that finish.
    ///
    /// Calling this from a command the scheduler is running is an error.
    pub fn update(&self, delta_time: f64) -> Result<(), CommandError> {
        check_delta_time(delta_time)?;
        if self.inner.updating.get() {
            warn!("rejected recursive scheduler update");
            return Err(CommandError::ReentrantScheduler);
        }
        if self.is_paused() {
            return Ok(());
        }
        self.inner.updating.set(true);
        let result = self.update_slots(delta_time);
        self.inner.updating.set(false);
        result
    }

    fn update_slots(&self, delta_time: f64) -> Result<(), CommandError> {
        let slots = &self.inner.slots;
        let mut read = 0;
        let mut write = 0;
        loop {
            // Slots may be added while earlier slots run; they are picked up here.
            let Some(queue) = slots.borrow().get(read).cloned() else {
                break;
            };
            read += 1;
            match queue.update(delta_time, CommandOperation::Normal) {
                Ok(true) => debug!("scheduler slot {} finished", queue.id()),
                Ok(false) => {
                    slots.borrow_mut()[write] = queue;
                    write += 1;
                }
                Err(err) => {
                    let mut slots = slots.borrow_mut();
                    slots[write] = queue;
                    write += 1;
                    slots.drain(write..read);
                    return Err(err);
                }
            }
        }
        slots.borrow_mut().truncate(write);
        Ok(())
    }
}
