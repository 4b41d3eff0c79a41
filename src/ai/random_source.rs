use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integers for tie-breaking.
pub trait RandomSource {
    /// A uniform draw from `0..upper`. Returns 0 when `upper` is 0 or 1.
    fn next_int(&mut self, upper: usize) -> usize;

    /// Restarts the draw sequence from its beginning. Sources without a
    /// replayable sequence keep drawing where they are.
    fn rewind(&mut self) {}
}

/// [`RandomSource`] backed by a [`StdRng`]; reproducible when seeded.
///
/// An unseeded source picks its seed from entropy once, so a rewind replays
/// the same draws for the lifetime of the source.
#[derive(Debug, Clone)]
pub struct SeededRandomSource {
    seed: u64,
    rng: StdRng,
}

impl SeededRandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| StdRng::from_entropy().gen());
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl RandomSource for SeededRandomSource {
    fn next_int(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    fn rewind(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_int(&mut self, upper: usize) -> usize {
        (**self).next_int(upper)
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }
}
