use thiserror::Error;

use crate::window::Sample;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("sensor not ready")]
    NotReady,

    #[error("sensor bus error: {0}")]
    Bus(String),
}

/// Raw accelerometer samples, as delivered by the sensor driver.
pub trait AccelSource {
    /// Fills the front of `out` with up to `out.len()` samples and returns
    /// how many were written.
    fn read(&mut self, out: &mut [Sample]) -> Result<usize, SourceError>;
}

/// Plays back a recorded sample sequence once.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    samples: Vec<Sample>,
    pos: usize,
}

impl ReplaySource {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.samples.len()
    }
}

impl AccelSource for ReplaySource {
    fn read(&mut self, out: &mut [Sample]) -> Result<usize, SourceError> {
        let n = out.len().min(self.remaining());
        out[..n].copy_from_slice(&self.samples[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
