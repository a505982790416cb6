//! Runs policies across a range of frame counts and reports the results.

use std::{
    fmt::Write as _,
    fs,
    io::{BufWriter, Write},
    num::NonZeroUsize,
    ops::RangeInclusive,
    panic,
    path::Path,
    thread,
};

use log::info;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    sim::Policy,
    stats::RunStats,
    trace::Access,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRun {
    pub policy: Policy,
    pub stats: RunStats,
}

/// Every policy's result at one frame count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepRow {
    pub frames: usize,
    pub results: Vec<PolicyRun>,
}

impl SweepRow {
    pub fn get(&self, policy: Policy) -> Option<RunStats> {
        self.results
            .iter()
            .find(|run| run.policy == policy)
            .map(|run| run.stats)
    }
}

/// Run each of `policies` over `trace` at every frame count in `frames`.
///
/// The frame range is split into contiguous chunks, one per available core.
/// Each run builds its own memory, so the workers only share the trace. Rows
/// are returned in ascending frame order.
pub fn sweep(
    trace: &[Access],
    frames: RangeInclusive<usize>,
    policies: &[Policy],
) -> Result<Vec<SweepRow>> {
    let (min, max) = (*frames.start(), *frames.end());
    if min > max {
        return Err(Error::EmptyFrameRange { min, max });
    }
    if min == 0 {
        return Err(Error::InvalidCapacity(0));
    }

    let frame_counts = frames.collect::<Vec<_>>();
    let workers = thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(frame_counts.len());
    let chunk_len = frame_counts.len().div_ceil(workers);
    info!(
        "sweeping {} accesses over {}..={} frames with {:?} on {} workers",
        trace.len(),
        min,
        max,
        policies,
        workers
    );

    crossbeam::scope(|s| {
        let handles = frame_counts
            .chunks(chunk_len)
            .map(|chunk| {
                s.spawn(move |_| {
                    chunk
                        .iter()
                        .map(|&n| run_row(trace, n, policies))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect::<Vec<_>>();

        let mut rows = Vec::with_capacity(frame_counts.len());
        for handle in handles {
            rows.extend(handle.join().unwrap_or_else(|e| panic::resume_unwind(e))?);
        }
        Ok(rows)
    })
    .unwrap_or_else(|e| panic::resume_unwind(e))
}

fn run_row(trace: &[Access], frames: usize, policies: &[Policy]) -> Result<SweepRow> {
    let results = policies
        .iter()
        .map(|&policy| {
            Ok(PolicyRun {
                policy,
                stats: policy.simulate(trace, frames)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(SweepRow { frames, results })
}

/// Format rows as a `Frames | FIFO (Faults/Writes) | ...` table.
pub fn render_table(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    let Some(first) = rows.first() else {
        return out;
    };

    let mut header = String::from("Frames");
    for run in &first.results {
        let _ = write!(header, " | {:<20}", format!("{} (Faults/Writes)", run.policy));
    }
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", "-".repeat(header.trim_end().len()));

    for row in rows {
        let mut line = format!("{:<6}", row.frames);
        for run in &row.results {
            let _ = write!(
                line,
                " | {:<20}",
                format!("{:<7} / {:<6}", run.stats.faults, run.stats.writes)
            );
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Export rows as pretty JSON for external plotting.
pub fn write_json(rows: &[SweepRow], path: &Path) -> Result<()> {
    let mut stream = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut stream, rows)?;
    stream.flush()?;
    Ok(())
}
