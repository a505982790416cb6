//! Least-recently-used victim selection.

use std::collections::{BTreeMap, HashMap};

use crate::trace::PageId;

use super::{Replace, Tick};

/// Position of a page in recency order: last-touched time, then load order.
///
/// The load sequence number breaks ties between equal timestamps in favour
/// of the page that was loaded first.
type RecencyKey = (Tick, u64);

/// Evicts the resident page with the oldest last-touched timestamp.
#[derive(Debug, Default)]
pub struct Lru {
    last_touched: HashMap<PageId, RecencyKey>,
    ru_order: BTreeMap<RecencyKey, PageId>,
    next_seq: u64,
}

impl Lru {
    pub fn new(capacity: usize) -> Self {
        Lru {
            last_touched: HashMap::with_capacity(capacity),
            ru_order: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl Replace for Lru {
    fn admitted(&mut self, page: PageId, now: Tick) {
        let key = (now, self.next_seq);
        self.next_seq += 1;
        if let Some(stale) = self.last_touched.insert(page, key) {
            self.ru_order.remove(&stale);
        }
        self.ru_order.insert(key, page);
    }

    fn touched(&mut self, page: PageId, now: Tick) {
        if let Some(key) = self.last_touched.get_mut(&page) {
            self.ru_order.remove(key);
            key.0 = now;
            self.ru_order.insert(*key, page);
        }
    }

    fn victim(&mut self) -> Option<PageId> {
        let (_key, page) = self.ru_order.pop_first()?;
        self.last_touched.remove(&page);
        Some(page)
    }

    fn resident_order(&self) -> Vec<PageId> {
        self.ru_order.values().copied().collect()
    }
}
