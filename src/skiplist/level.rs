use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws tower levels from a geometric distribution.
///
/// ```text
/// p ∈ [0, 1)      level = floor(-log2(p))      P(level >= k) = 2^-k
///
/// [0.5,  1.0)  → 0      (half of all nodes)
/// [0.25, 0.5)  → 1
/// [0.125,0.25) → 2
/// ...
/// ```
///
/// Levels are clamped to `max_height - 1`, so `p == 0` (where the log is
/// infinite) lands on the top level. Expected tower height stays O(1) while
/// the list as a whole gets O(log n) levels.
///
/// The RNG is owned by a single list and advances once per insertion.
#[derive(Debug)]
pub(crate) struct LevelGenerator {
    rng: StdRng,
    max_height: usize,
}

impl LevelGenerator {
    pub(crate) fn new(max_height: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        LevelGenerator { rng, max_height }
    }

    /// Draw the top level (0-indexed) of a new tower.
    pub(crate) fn random_level(&mut self) -> usize {
        let p: f64 = self.rng.gen_range(0.0..1.0);
        level_for(p, self.max_height)
    }
}

/// Map a uniform sample to a level, capped at `max_height - 1`.
fn level_for(p: f64, max_height: usize) -> usize {
    let top = max_height - 1;
    if p <= 0.0 {
        return top;
    }
    let level = (-p.log2()).floor();
    if level >= top as f64 {
        top
    } else {
        level as usize
    }
}
