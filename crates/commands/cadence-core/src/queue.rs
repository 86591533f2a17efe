//! CommandQueue: runs one chain of commands in FIFO order over time.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::command::{BoxedCommand, CommandOperation};
use crate::error::{check_delta_time, CommandError};
use crate::ids::{next_queue_id, QueueId};

struct QueueInner {
    id: QueueId,
    commands: RefCell<VecDeque<BoxedCommand>>,
    current: RefCell<Option<BoxedCommand>>,
    running: Cell<bool>,
    paused: Cell<bool>,
    updating: Cell<bool>,
    delta_time_accumulation: Cell<f64>,
}

/// A FIFO queue of commands. Commands run in the order they were pushed, and
/// are dropped as they complete.
///
/// `CommandQueue` is a shared handle: clones refer to the same queue, which
/// lets a running command push more work onto the queue that runs it.
#[derive(Clone)]
pub struct CommandQueue {
    inner: Rc<QueueInner>,
}

/// Clears the updating flag on every exit from `update`, and drops the
/// carried time once nothing is in flight.
struct UpdateGuard<'a> {
    inner: &'a QueueInner,
}

impl<'a> UpdateGuard<'a> {
    fn enter(inner: &'a QueueInner) -> Self {
        inner.updating.set(true);
        Self { inner }
    }
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.inner.updating.set(false);
        if self.inner.current.borrow().is_none() {
            self.inner.delta_time_accumulation.set(0.0);
        }
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(QueueInner {
                id: next_queue_id(),
                commands: RefCell::new(VecDeque::new()),
                current: RefCell::new(None),
                running: Cell::new(false),
                paused: Cell::new(false),
                updating: Cell::new(false),
                delta_time_accumulation: Cell::new(0.0),
            }),
        }
    }

    #[inline]
    pub fn id(&self) -> QueueId {
        self.inner.id
    }

    /// True when both handles refer to the same queue.
    #[inline]
    pub fn ptr_eq(&self, other: &CommandQueue) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    /// Pausing takes effect immediately, even from inside a running command:
    /// the current update stops before starting the next command.
    #[inline]
    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);
    }

    /// True while the queue is inside `update`.
    #[inline]
    pub fn is_updating(&self) -> bool {
        self.inner.updating.get()
    }

    /// Time carried into the currently executing command.
    #[inline]
    pub fn delta_time_accumulation(&self) -> f64 {
        self.inner.delta_time_accumulation.get()
    }

    /// Number of commands not yet finished, including the one in flight.
    pub fn len(&self) -> usize {
        // The in-flight command is out of `current` while it runs.
        let in_flight =
            usize::from(self.inner.running.get() || self.inner.current.borrow().is_some());
        self.inner.commands.borrow().len() + in_flight
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a command to the back of the queue.
    pub fn push(&self, command: BoxedCommand) -> &Self {
        self.inner.commands.borrow_mut().push_back(command);
        self
    }

    /// Appends several commands, in order. Equivalent to pushing each.
    pub fn enqueue<I>(&self, commands: I) -> &Self
    where
        I: IntoIterator<Item = BoxedCommand>,
    {
        self.inner.commands.borrow_mut().extend(commands);
        self
    }

    /// Runs a zero-time update so the next command starts without consuming
    /// time. Does nothing when called from inside this queue's update, since
    /// that update continues on its own. Returns whether the queue is empty.
    pub fn process(&self) -> bool {
        if self.is_updating() {
            return false;
        }
        match self.update(0.0, CommandOperation::Normal) {
            Ok(done) => done,
            Err(err) => {
                warn!("process on {} failed: {err}", self.id());
                false
            }
        }
    }

    /// Fast-forwards every remaining command to completion in one call.
    pub fn run_to_end(&self) -> Result<bool, CommandError> {
        self.update(f64::MAX, CommandOperation::FastForward)
    }

    /// Feeds `delta_time` to the queue, running commands in order until one
    /// needs more time, the queue pauses, or the queue runs dry.
    ///
    /// Returns `Ok(true)` once no commands remain. Calling this from inside a
    /// command run by the same queue is an error.
    pub fn update(
        &self,
        delta_time: f64,
        operation: CommandOperation,
    ) -> Result<bool, CommandError> {
        check_delta_time(delta_time)?;
        let inner = &*self.inner;
        if inner.updating.get() {
            warn!("rejected recursive update on {}", inner.id);
            return Err(CommandError::Reentrant { queue: inner.id });
        }
        let _guard = UpdateGuard::enter(inner);

        if !inner.paused.get() {
            inner
                .delta_time_accumulation
                .set(inner.delta_time_accumulation.get() + delta_time);
            loop {
                let in_flight = inner.current.borrow_mut().take();
                let next = match in_flight {
                    Some(command) => Some(command),
                    None => inner.commands.borrow_mut().pop_front(),
                };
                let Some(mut command) = next else {
                    break;
                };

                inner.running.set(true);
                let result = command.advance(inner.delta_time_accumulation.get(), operation);
                inner.running.set(false);
                inner.delta_time_accumulation.set(result.delta_time);
                if !result.complete {
                    *inner.current.borrow_mut() = Some(command);
                    break;
                }
                trace!("{}: command complete, {} left over", inner.id, result.delta_time);

                if inner.commands.borrow().is_empty() || inner.paused.get() {
                    break;
                }
            }
        }

        let done = inner.commands.borrow().is_empty() && inner.current.borrow().is_none();
        if done {
            debug!("{}: drained", inner.id);
        }
        Ok(done)
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandQueue")
            .field("id", &self.inner.id)
            .field("pending", &self.inner.commands.borrow().len())
            .field("in_flight", &self.inner.current.borrow().is_some())
            .field("paused", &self.inner.paused.get())
            .field("updating", &self.inner.updating.get())
            .finish()
    }
}
