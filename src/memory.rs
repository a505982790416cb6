//! The frame allocator shared by every replacement policy.

use std::collections::{BTreeSet, HashSet};

use crate::{
    error::{Error, Result},
    replace::{Replace, Tick},
    stats::RunStats,
    step::{Eviction, Step, StepSink},
    trace::{Access, PageId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResult {
    Hit,
    Miss { evicted: Option<Eviction> },
}

/// Physical memory of `capacity` frames, evicting through `R`.
///
/// Owns the frame set, the dirty set and the counters of a single run.
/// Nothing here is shared, so separate `Memory` values never influence each
/// other.
#[derive(Debug)]
pub struct Memory<R: Replace> {
    capacity: usize,
    resident: HashSet<PageId>,
    dirty: BTreeSet<PageId>,
    repl: R,
    clock: Tick,
    stats: RunStats,
}

impl<R: Replace> Memory<R> {
    /// Empty memory with `capacity` frames.
    pub fn new(capacity: usize, repl: R) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Memory {
            capacity,
            resident: HashSet::with_capacity(capacity),
            dirty: BTreeSet::new(),
            repl,
            clock: 0,
            stats: RunStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn is_resident(&self, page: PageId) -> bool {
        self.resident.contains(&page)
    }

    pub fn is_dirty(&self, page: PageId) -> bool {
        self.dirty.contains(&page)
    }

    /// Resident pages, next victim first.
    pub fn resident_order(&self) -> Vec<PageId> {
        self.repl.resident_order()
    }

    /// Service one access and advance the logical clock.
    pub fn access<S: StepSink>(&mut self, access: Access, sink: &mut S) -> AccessResult {
        let now = self.clock;
        self.clock += 1;

        let result = if self.resident.contains(&access.page) {
            self.stats.hit();
            AccessResult::Hit
        } else {
            self.stats.fault();
            let evicted = if self.resident.len() < self.capacity {
                None
            } else {
                let evicted = self.evict();
                debug_assert!(evicted.is_some(), "full memory had no victim");
                evicted
            };
            self.resident.insert(access.page);
            self.repl.admitted(access.page, now);
            AccessResult::Miss { evicted }
        };

        if access.kind.is_write() {
            self.dirty.insert(access.page);
        }
        // Recency is refreshed after admission so a reloaded page is current.
        self.repl.touched(access.page, now);

        if S::ENABLED {
            sink.record(Step {
                index: now,
                access,
                hit: result == AccessResult::Hit,
                evicted: match result {
                    AccessResult::Miss { evicted } => evicted,
                    AccessResult::Hit => None,
                },
                resident: self.repl.resident_order(),
                dirty: self.dirty.iter().copied().collect(),
            });
        }

        result
    }

    /// Service every access of `trace` in order.
    pub fn run<S: StepSink>(&mut self, trace: &[Access], sink: &mut S) -> RunStats {
        for &access in trace {
            self.access(access, sink);
        }
        self.stats
    }

    fn evict(&mut self) -> Option<Eviction> {
        let page = self.repl.victim()?;
        self.resident.remove(&page);
        let dirty = self.dirty.remove(&page);
        if dirty {
            self.stats.write_back();
        }
        Some(Eviction { page, dirty })
    }
}
