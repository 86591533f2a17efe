//! CommandQueueGroup: a dynamic set of queues updated together.
//!
//! Queues can be added and removed at any time, including from inside a
//! command run by one of the group's own queues. Changes are staged and
//! merged between queue updates, so a pass never sees a half-applied change.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::command::CommandOperation;
use crate::error::{check_delta_time, CommandError};
use crate::queue::CommandQueue;

#[derive(Default)]
struct GroupInner {
    queues: RefCell<Vec<CommandQueue>>,
    new_queues: RefCell<Vec<CommandQueue>>,
    queues_to_remove: RefCell<Vec<CommandQueue>>,
}

fn position(list: &[CommandQueue], queue: &CommandQueue) -> Option<usize> {
    list.iter().position(|q| q.ptr_eq(queue))
}

/// A set of [`CommandQueue`]s that are updated together. Shared handle.
#[derive(Clone, Default)]
pub struct CommandQueueGroup {
    inner: Rc<GroupInner>,
}

impl CommandQueueGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue that is updated by this group.
    pub fn create_queue(&self) -> CommandQueue {
        let queue = CommandQueue::new();
        self.add_queue(&queue);
        queue
    }

    /// Registers `queue` with the group. Adding a queue twice has no effect,
    /// and adding a queue that is pending removal cancels the removal.
    pub fn add_queue(&self, queue: &CommandQueue) {
        let known = position(&self.inner.new_queues.borrow(), queue).is_some()
            || position(&self.inner.queues.borrow(), queue).is_some();
        if !known {
            self.inner.new_queues.borrow_mut().push(queue.clone());
        }
        let mut to_remove = self.inner.queues_to_remove.borrow_mut();
        if let Some(index) = position(&to_remove, queue) {
            to_remove.remove(index);
        }
    }

    /// Unregisters `queue`. If the group is mid-update and the queue has not
    /// run yet in this pass, it will not run.
    pub fn remove_queue(&self, queue: &CommandQueue) {
        let active = position(&self.inner.queues.borrow(), queue).is_some();
        {
            let mut to_remove = self.inner.queues_to_remove.borrow_mut();
            if active && position(&to_remove, queue).is_none() {
                to_remove.push(queue.clone());
            }
        }
        let mut new_queues = self.inner.new_queues.borrow_mut();
        if let Some(index) = position(&new_queues, queue) {
            new_queues.remove(index);
        }
    }

    /// True when `queue` is registered, active or pending.
    pub fn contains(&self, queue: &CommandQueue) -> bool {
        let pending_removal = position(&self.inner.queues_to_remove.borrow(), queue).is_some();
        !pending_removal
            && (position(&self.inner.queues.borrow(), queue).is_some()
                || position(&self.inner.new_queues.borrow(), queue).is_some())
    }

    /// Number of active queues.
    pub fn len(&self) -> usize {
        self.inner.queues.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Updates every queue in the group once by `delta_time`.
    ///
    /// Queues added during the pass are updated in the same pass. Removed
    /// queues that have not run yet are skipped. Each queue runs at most
    /// once per call.
    pub fn update(&self, delta_time: f64) -> Result<(), CommandError> {
        check_delta_time(delta_time)?;
        let inner = &*self.inner;
        let mut to_update: Vec<CommandQueue> = inner.queues.borrow().clone();
        loop {
            self.merge_staged(&mut to_update);
            let Some(queue) = to_update.pop() else {
                break;
            };
            queue.update(delta_time, CommandOperation::Normal)?;
        }
        Ok(())
    }

    fn merge_staged(&self, to_update: &mut Vec<CommandQueue>) {
        let inner = &*self.inner;
        let added: Vec<CommandQueue> = inner.new_queues.borrow_mut().drain(..).collect();
        if !added.is_empty() {
            debug!("queue group: promoting {} queue(s)", added.len());
            inner.queues.borrow_mut().extend(added.iter().cloned());
            to_update.extend(added);
        }

        let removed: Vec<CommandQueue> = inner.queues_to_remove.borrow_mut().drain(..).collect();
        if !removed.is_empty() {
            debug!("queue group: retiring {} queue(s)", removed.len());
            let keep = |q: &CommandQueue| !removed.iter().any(|r| r.ptr_eq(q));
            inner.queues.borrow_mut().retain(keep);
            to_update.retain(keep);
        }
    }
}
