use std::fmt;

use serde::Serialize;

/// Counters for one simulation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub accesses: u64,
    pub hits: u64,
    pub faults: u64,
    /// Evictions of dirty pages, i.e. disk writes.
    pub writes: u64,
}

impl RunStats {
    pub fn hit(&mut self) {
        self.accesses += 1;
        self.hits += 1;
    }

    pub fn fault(&mut self) {
        self.accesses += 1;
        self.faults += 1;
    }

    pub fn write_back(&mut self) {
        self.writes += 1;
    }

    /// Faults per access, 0.0 for an empty run.
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.faults as f64 / self.accesses as f64
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} page faults, {} disk writes ({:.2}% fault rate)",
            self.faults,
            self.writes,
            self.fault_rate() * 100.0
        )
    }
}
