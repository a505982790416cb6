use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sim::Policy,
    trace::GeneratorParams,
};

/// A complete comparison run, as read from `--config` or `-p`.
///
/// Every field is optional in JSON and falls back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorParams,
    pub min_frames: usize,
    pub max_frames: usize,
    pub policies: Vec<Policy>,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            generator: GeneratorParams::default(),
            min_frames: 1,
            max_frames: 15,
            policies: Policy::ALL.to_vec(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_json(config_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(config_str)?)
    }

    pub fn frames(&self) -> RangeInclusive<usize> {
        self.min_frames..=self.max_frames
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        if self.min_frames == 0 {
            return Err(Error::InvalidCapacity(self.min_frames));
        }
        if self.min_frames > self.max_frames {
            return Err(Error::EmptyFrameRange {
                min: self.min_frames,
                max: self.max_frames,
            });
        }
        Ok(())
    }
}
