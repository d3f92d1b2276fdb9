//! Audio cues played on every press.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt::{Display, Formatter};
use crate::{WidgetError, WidgetResult};

/// A sound asset, referenced by name. The host resolves the name to actual audio.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AudioCue(String);

impl AudioCue {
    pub fn new(name: impl Into<String>) -> Self {
        AudioCue(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for AudioCue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-empty set of cues, picked from at random.
#[derive(Debug)]
pub struct CuePool {
    cues: Vec<AudioCue>,
    rng: SmallRng,
}

impl CuePool {
    pub fn new(cues: Vec<AudioCue>) -> WidgetResult<Self> {
        Self::with_rng(cues, SmallRng::from_os_rng())
    }

    /// Same as [CuePool::new], with a fixed seed so the picks are reproducible.
    pub fn seeded(cues: Vec<AudioCue>, seed: u64) -> WidgetResult<Self> {
        Self::with_rng(cues, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(cues: Vec<AudioCue>, rng: SmallRng) -> WidgetResult<Self> {
        if cues.is_empty() {
            return Err(WidgetError::EmptyCuePool);
        }
        Ok(CuePool { cues, rng })
    }

    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }

    /// Picks a cue uniformly at random.
    pub fn pick(&mut self) -> &AudioCue {
        let index = self.rng.random_range(0..self.cues.len());
        &self.cues[index]
    }
}
