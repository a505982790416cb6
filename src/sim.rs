//! Entry points that run a whole trace through one policy.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    memory::Memory,
    replace::{fifo::Fifo, lru::Lru},
    stats::RunStats,
    step::{LogSink, Step},
    trace::Access,
};

/// Run `trace` through `capacity` frames with FIFO replacement.
pub fn simulate_fifo(trace: &[Access], capacity: usize) -> Result<RunStats> {
    Ok(Memory::new(capacity, Fifo::new(capacity))?.run(trace, &mut ()))
}

/// Like [`simulate_fifo`], also returning every step.
pub fn simulate_fifo_traced(trace: &[Access], capacity: usize) -> Result<(RunStats, Vec<Step>)> {
    let mut steps = Vec::with_capacity(trace.len());
    let stats = Memory::new(capacity, Fifo::new(capacity))?.run(trace, &mut steps);
    Ok((stats, steps))
}

/// Run `trace` through `capacity` frames with LRU replacement.
pub fn simulate_lru(trace: &[Access], capacity: usize) -> Result<RunStats> {
    Ok(Memory::new(capacity, Lru::new(capacity))?.run(trace, &mut ()))
}

/// Like [`simulate_lru`], also returning every step.
pub fn simulate_lru_traced(trace: &[Access], capacity: usize) -> Result<(RunStats, Vec<Step>)> {
    let mut steps = Vec::with_capacity(trace.len());
    let stats = Memory::new(capacity, Lru::new(capacity))?.run(trace, &mut steps);
    Ok((stats, steps))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Fifo,
    Lru,
}

impl Policy {
    pub const ALL: [Policy; 2] = [Policy::Fifo, Policy::Lru];

    pub fn simulate(self, trace: &[Access], capacity: usize) -> Result<RunStats> {
        match self {
            Policy::Fifo => simulate_fifo(trace, capacity),
            Policy::Lru => simulate_lru(trace, capacity),
        }
    }

    pub fn simulate_traced(self, trace: &[Access], capacity: usize) -> Result<(RunStats, Vec<Step>)> {
        match self {
            Policy::Fifo => simulate_fifo_traced(trace, capacity),
            Policy::Lru => simulate_lru_traced(trace, capacity),
        }
    }

    /// Run with every step written to the `debug` log.
    pub fn simulate_logged(self, trace: &[Access], capacity: usize) -> Result<RunStats> {
        let name = self.to_string();
        let mut sink = LogSink { policy: &name };
        Ok(match self {
            Policy::Fifo => Memory::new(capacity, Fifo::new(capacity))?.run(trace, &mut sink),
            Policy::Lru => Memory::new(capacity, Lru::new(capacity))?.run(trace, &mut sink),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Lru => write!(f, "LRU"),
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "lru" => Ok(Policy::Lru),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}
