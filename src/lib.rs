//! Page replacement simulator.
//!
//! A trace of page accesses, each a read or a write, is run through a fixed
//! number of physical frames under FIFO or LRU eviction. Every run reports
//! page faults and disk writes, a disk write being the eviction of a dirty
//! page.
//!
//! ```
//! use pagesim::{simulate_fifo, simulate_lru, Access};
//!
//! let trace = [
//!     Access::write(1),
//!     Access::read(2),
//!     Access::read(3),
//!     Access::read(1),
//!     Access::write(4),
//! ];
//! assert_eq!(simulate_fifo(&trace, 3).unwrap().faults, 4);
//! assert_eq!(simulate_lru(&trace, 3).unwrap().writes, 0);
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod replace;
pub mod sim;
pub mod stats;
pub mod step;
pub mod sweep;
pub mod trace;

pub use config::Config;
pub use error::{Error, Result};
pub use memory::{AccessResult, Memory};
pub use sim::{simulate_fifo, simulate_fifo_traced, simulate_lru, simulate_lru_traced, Policy};
pub use stats::RunStats;
pub use step::{Eviction, LogSink, Step, StepSink};
pub use sweep::{sweep, PolicyRun, SweepRow};
pub use trace::{generate_trace, Access, AccessKind, GeneratorParams, PageId};
