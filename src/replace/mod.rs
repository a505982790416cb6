pub mod fifo;
pub mod lru;

use crate::trace::PageId;

/// Logical time: the index of an access within one run.
pub type Tick = u64;

/// Victim selection for a bounded frame set.
///
/// The owning [`Memory`](crate::memory::Memory) decides hits, faults and
/// write-backs; a `Replace` only tracks the ordering it needs to name the
/// next victim.
pub trait Replace {
    /// `page` was loaded into a free or freshly vacated frame.
    fn admitted(&mut self, page: PageId, now: Tick);

    /// `page` is resident and was just accessed, whether it hit or faulted.
    fn touched(&mut self, page: PageId, now: Tick);

    /// Choose the page to evict and forget it. `None` when nothing is resident.
    fn victim(&mut self) -> Option<PageId>;

    /// Resident pages, next victim first.
    fn resident_order(&self) -> Vec<PageId>;
}
