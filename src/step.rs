//! Per-access decision records and the sinks that observe them.

use log::debug;
use serde::Serialize;

use crate::trace::{Access, PageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eviction {
    pub page: PageId,
    /// The victim was dirty and had to be written back.
    pub dirty: bool,
}

/// What one access did to memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub index: u64,
    pub access: Access,
    pub hit: bool,
    pub evicted: Option<Eviction>,
    /// Resident pages after the access, next victim first.
    pub resident: Vec<PageId>,
    /// Dirty pages after the access, ascending.
    pub dirty: Vec<PageId>,
}

/// Observer of simulation steps.
///
/// A sink with `ENABLED = false` is never handed a step, so the engine does
/// not build the resident and dirty snapshots at all.
pub trait StepSink {
    const ENABLED: bool = true;

    fn record(&mut self, step: Step);
}

impl StepSink for () {
    const ENABLED: bool = false;

    fn record(&mut self, _step: Step) {}
}

impl StepSink for Vec<Step> {
    fn record(&mut self, step: Step) {
        self.push(step);
    }
}

/// Writes every step to the `debug` log.
#[derive(Debug)]
pub struct LogSink<'a> {
    pub policy: &'a str,
}

impl StepSink for LogSink<'_> {
    fn record(&mut self, step: Step) {
        debug!(
            "[{}] access {} at time {}",
            self.policy, step.access, step.index
        );
        if step.hit {
            debug!("  -> page hit");
        } else {
            debug!("  -> PAGE FAULT");
            match step.evicted {
                Some(victim) => {
                    debug!("  -> replacing page {}", victim.page);
                    if victim.dirty {
                        debug!("  -> victim was dirty, written to disk");
                    }
                }
                None => debug!("  -> loaded page {} into a free frame", step.access.page),
            }
        }
        if step.access.kind.is_write() {
            debug!("  -> page {} marked dirty", step.access.page);
        }
        debug!("  -> memory: {:?}", step.resident);
        debug!("  -> dirty pages: {:?}", step.dirty);
    }
}
