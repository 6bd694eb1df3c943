use crate::error::{Error, Result};

/// Tower height used when none is configured.
pub const DEFAULT_MAX_HEIGHT: usize = 32;

/// Largest tower height accepted by [`Options::validate`].
pub const MAX_HEIGHT_LIMIT: usize = 64;

/// Construction options for a [`SkipList`](crate::SkipList).
///
/// `max_height` bounds every tower, including the two sentinels. With
/// p = 1/2 per level, a height of `h` keeps searches logarithmic up to
/// roughly `2^h` entries.
///
/// `seed` pins the level generator so tower shapes are reproducible.
/// `None` seeds from OS entropy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub max_height: usize,
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_height: DEFAULT_MAX_HEIGHT,
            seed: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the options before a list is built from them.
    pub fn validate(&self) -> Result<()> {
        if self.max_height == 0 {
            return Err(Error::InvalidOptions("max_height must be > 0".into()));
        }
        if self.max_height > MAX_HEIGHT_LIMIT {
            return Err(Error::InvalidOptions(format!(
                "max_height must be <= {MAX_HEIGHT_LIMIT}, got {}",
                self.max_height
            )));
        }
        Ok(())
    }
}
