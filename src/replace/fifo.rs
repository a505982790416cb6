//! First-in-first-out victim selection.

use std::collections::VecDeque;

use crate::trace::PageId;

use super::{Replace, Tick};

/// Evicts pages in the order they were loaded. Hits never reorder the queue.
#[derive(Debug, Default)]
pub struct Fifo {
    /// Front is the oldest resident page.
    queue: VecDeque<PageId>,
}

impl Fifo {
    pub fn new(capacity: usize) -> Self {
        Fifo {
            queue: VecDeque::with_capacity(capacity),
        }
    }
}

impl Replace for Fifo {
    fn admitted(&mut self, page: PageId, _now: Tick) {
        self.queue.push_back(page);
    }

    fn touched(&mut self, _page: PageId, _now: Tick) {}

    fn victim(&mut self) -> Option<PageId> {
        self.queue.pop_front()
    }

    fn resident_order(&self) -> Vec<PageId> {
        self.queue.iter().copied().collect()
    }
}
