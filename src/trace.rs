//! Access traces: the event types, the synthetic locality generator, and
//! trace files on disk.

use std::{
    fmt, fs,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::trace;
use serde::{Deserialize, Serialize};
use xz2::{read::XzDecoder, write::XzEncoder};

use crate::error::{Error, Result};

/// A virtual page number. No internal structure.
pub type PageId = usize;

/// Chance that a generated access stays inside the current working set.
const WORKING_SET_LOCALITY: f64 = 0.8;

const XZ_LEVEL: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    #[serde(rename = "R")]
    Read,
    #[serde(rename = "W")]
    Write,
}

impl AccessKind {
    pub fn is_write(self) -> bool {
        self == AccessKind::Write
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Read => write!(f, "R"),
            AccessKind::Write => write!(f, "W"),
        }
    }
}

/// One entry of a trace. On disk this is the pair `[page, "R" | "W"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(PageId, AccessKind)", into = "(PageId, AccessKind)")]
pub struct Access {
    pub page: PageId,
    pub kind: AccessKind,
}

impl Access {
    pub fn read(page: PageId) -> Self {
        Access {
            page,
            kind: AccessKind::Read,
        }
    }

    pub fn write(page: PageId) -> Self {
        Access {
            page,
            kind: AccessKind::Write,
        }
    }
}

impl From<(PageId, AccessKind)> for Access {
    fn from((page, kind): (PageId, AccessKind)) -> Self {
        Access { page, kind }
    }
}

impl From<Access> for (PageId, AccessKind) {
    fn from(access: Access) -> Self {
        (access.page, access.kind)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, '{}')", self.page, self.kind)
    }
}

/// Shape of a synthetic trace with working-set locality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub length: usize,
    pub page_universe_size: usize,
    pub working_set_size: usize,
    pub working_set_dwell: usize,
    pub write_probability: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        GeneratorParams {
            length: 500,
            page_universe_size: 50,
            working_set_size: 5,
            working_set_dwell: 20,
            write_probability: 0.3,
        }
    }
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<()> {
        if self.page_universe_size == 0 {
            return Err(Error::EmptyUniverse);
        }
        if self.working_set_size == 0 {
            return Err(Error::EmptyWorkingSet);
        }
        if self.working_set_size > self.page_universe_size {
            return Err(Error::WorkingSetTooLarge {
                working_set: self.working_set_size,
                universe: self.page_universe_size,
            });
        }
        if self.working_set_dwell == 0 {
            return Err(Error::ZeroDwell);
        }
        if !(0.0..=1.0).contains(&self.write_probability) {
            return Err(Error::InvalidWriteProbability(self.write_probability));
        }
        Ok(())
    }
}

/// Generate `params.length` accesses that hop between random working sets.
///
/// Within a working set, each access picks one of its pages 80% of the time
/// and any page of the universe otherwise. All randomness comes from `rng`, so
/// a seeded generator reproduces the same trace.
pub fn generate_trace(params: &GeneratorParams, rng: &mut fastrand::Rng) -> Result<Vec<Access>> {
    params.validate()?;

    let mut accesses = Vec::with_capacity(params.length);
    let mut universe = (0..params.page_universe_size).collect::<Vec<PageId>>();

    while accesses.len() < params.length {
        let working_set = draw_working_set(&mut universe, params.working_set_size, rng);
        trace!("working set at access {}: {:?}", accesses.len(), working_set);

        let mut dwell = 0;
        while dwell < params.working_set_dwell && accesses.len() < params.length {
            let page = if rng.f64() < WORKING_SET_LOCALITY {
                working_set[rng.usize(0..working_set.len())]
            } else {
                rng.usize(0..params.page_universe_size)
            };
            let kind = if rng.f64() < params.write_probability {
                AccessKind::Write
            } else {
                AccessKind::Read
            };
            accesses.push(Access { page, kind });
            dwell += 1;
        }
    }

    Ok(accesses)
}

/// Partial Fisher-Yates: shuffle `size` distinct pages into the front of
/// `universe` and return them. Any permutation of the universe is a valid
/// starting point, so the buffer is reused across draws.
fn draw_working_set<'a>(
    universe: &'a mut [PageId],
    size: usize,
    rng: &mut fastrand::Rng,
) -> &'a [PageId] {
    for i in 0..size {
        let j = rng.usize(i..universe.len());
        universe.swap(i, j);
    }
    &universe[..size]
}

fn is_xz(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "xz")
}

/// Load a JSON trace, decompressing it first if the path ends in `.xz`.
pub fn read_trace(path: &Path) -> Result<Vec<Access>> {
    let stream = BufReader::new(fs::File::open(path)?);
    let accesses = if is_xz(path) {
        serde_json::from_reader(XzDecoder::new(stream))?
    } else {
        serde_json::from_reader(stream)?
    };
    Ok(accesses)
}

/// Store a trace as JSON, xz-compressed if the path ends in `.xz`.
pub fn write_trace(path: &Path, accesses: &[Access]) -> Result<()> {
    let mut stream = BufWriter::new(fs::File::create(path)?);
    if is_xz(path) {
        let mut xz_stream = XzEncoder::new(stream, XZ_LEVEL);
        serde_json::to_writer(&mut xz_stream, accesses)?;
        stream = xz_stream.finish()?;
    } else {
        serde_json::to_writer(&mut stream, accesses)?;
    }
    stream.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_exact_length() {
        let mut rng = fastrand::Rng::with_seed(7);
        for length in [0, 1, 19, 20, 21, 500] {
            let params = GeneratorParams {
                length,
                ..GeneratorParams::default()
            };
            let trace = generate_trace(&params, &mut rng).unwrap();
            assert_eq!(trace.len(), length);
        }
    }

    #[test]
    fn test_generate_pages_in_universe() {
        let params = GeneratorParams {
            length: 1000,
            page_universe_size: 6,
            working_set_size: 3,
            working_set_dwell: 10,
            write_probability: 0.4,
        };
        let trace = generate_trace(&params, &mut fastrand::Rng::with_seed(1)).unwrap();
        assert!(trace.iter().all(|a| a.page < 6));
    }

    #[test]
    fn test_generate_is_seeded() {
        let params = GeneratorParams::default();
        let a = generate_trace(&params, &mut fastrand::Rng::with_seed(42)).unwrap();
        let b = generate_trace(&params, &mut fastrand::Rng::with_seed(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_probability_extremes() {
        let mut params = GeneratorParams {
            write_probability: 0.0,
            ..GeneratorParams::default()
        };
        let mut rng = fastrand::Rng::with_seed(3);
        let reads = generate_trace(&params, &mut rng).unwrap();
        assert!(reads.iter().all(|a| a.kind == AccessKind::Read));

        params.write_probability = 1.0;
        let writes = generate_trace(&params, &mut rng).unwrap();
        assert!(writes.iter().all(|a| a.kind == AccessKind::Write));
    }

    #[test]
    fn test_working_set_pages_are_distinct() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut universe = (0..30).collect::<Vec<_>>();
        for size in [1, 5, 29, 30] {
            let mut set = draw_working_set(&mut universe, size, &mut rng).to_vec();
            set.sort_unstable();
            set.dedup();
            assert_eq!(set.len(), size);
            assert!(set.iter().all(|&p| p < 30));
        }
    }

    #[test]
    fn test_large_working_set_near_universe() {
        let params = GeneratorParams {
            length: 2_000,
            page_universe_size: 50_000,
            working_set_size: 49_999,
            working_set_dwell: 100,
            write_probability: 0.3,
        };
        let trace = generate_trace(&params, &mut fastrand::Rng::with_seed(4)).unwrap();
        assert_eq!(trace.len(), 2_000);
        assert!(trace.iter().all(|a| a.page < 50_000));
    }

    #[test]
    fn test_whole_universe_working_set() {
        // Drawing every page of the universe must still terminate.
        let params = GeneratorParams {
            length: 50,
            page_universe_size: 4,
            working_set_size: 4,
            working_set_dwell: 5,
            write_probability: 0.5,
        };
        let trace = generate_trace(&params, &mut fastrand::Rng::with_seed(9)).unwrap();
        assert_eq!(trace.len(), 50);
    }

    #[test]
    fn test_rejects_bad_params() {
        let mut rng = fastrand::Rng::with_seed(0);
        let base = GeneratorParams::default();

        let too_large = GeneratorParams {
            working_set_size: 51,
            ..base.clone()
        };
        assert!(matches!(
            generate_trace(&too_large, &mut rng),
            Err(Error::WorkingSetTooLarge {
                working_set: 51,
                universe: 50
            })
        ));

        let no_dwell = GeneratorParams {
            working_set_dwell: 0,
            ..base.clone()
        };
        assert!(matches!(generate_trace(&no_dwell, &mut rng), Err(Error::ZeroDwell)));

        let empty = GeneratorParams {
            page_universe_size: 0,
            ..base.clone()
        };
        assert!(matches!(generate_trace(&empty, &mut rng), Err(Error::EmptyUniverse)));

        let no_set = GeneratorParams {
            working_set_size: 0,
            ..base.clone()
        };
        assert!(matches!(generate_trace(&no_set, &mut rng), Err(Error::EmptyWorkingSet)));

        let bad_prob = GeneratorParams {
            write_probability: 1.5,
            ..base
        };
        assert!(matches!(
            generate_trace(&bad_prob, &mut rng),
            Err(Error::InvalidWriteProbability(_))
        ));
    }

    #[test]
    fn test_access_json_shape() {
        let trace = vec![Access::read(1), Access::write(4)];
        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(json, r#"[[1,"R"],[4,"W"]]"#);
        let back: Vec<Access> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }

    #[test]
    fn test_access_display() {
        assert_eq!(Access::write(3).to_string(), "(3, 'W')");
    }
}
