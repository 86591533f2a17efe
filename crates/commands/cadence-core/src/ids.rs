//! Identifiers for queues, used for logging and error reporting.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct QueueId(pub u32);

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Monotonic allocator for QueueId.
/// IDs are opaque and only meaningful for diagnostics.
#[derive(Debug)]
pub(crate) struct IdAllocator {
    next_queue: AtomicU32,
}

impl IdAllocator {
    pub(crate) const fn new() -> Self {
        Self {
            next_queue: AtomicU32::new(0),
        }
    }

    #[inline]
    pub(crate) fn alloc_queue(&self) -> QueueId {
        QueueId(self.next_queue.fetch_add(1, Ordering::Relaxed))
    }
}

static QUEUE_IDS: IdAllocator = IdAllocator::new();

pub(crate) fn next_queue_id() -> QueueId {
    QUEUE_IDS.alloc_queue()
}
