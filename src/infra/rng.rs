use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Источник случайности для ботов и симуляций.
pub trait RandomSource {
    /// Случайный индекс в диапазоне `0..upper`. `upper` > 0.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Случайная величина в диапазоне `low..=high`.
    fn next_in_range(&mut self, low: u64, high: u64) -> u64;
}

#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_index(&mut self, upper: usize) -> usize {
        thread_rng().gen_range(0..upper)
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        thread_rng().gen_range(low..=high)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Один и тот же seed даёт одну и ту же последовательность решений ботов.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        self.inner.gen_range(low..=high)
    }
}
