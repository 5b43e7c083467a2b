use crate::compose::{WordBank, WordSource, FILLER_WORD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draws, with replacement, from a [`WordBank`].
#[derive(Clone, Debug)]
pub struct RandomWordSource {
    bank: &'static WordBank,
    rng: StdRng,
}

impl RandomWordSource {
    pub fn new(bank: &'static WordBank) -> Self {
        Self {
            bank,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible draws for a given seed.
    pub fn seeded(bank: &'static WordBank, seed: u64) -> Self {
        Self {
            bank,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomWordSource {
    fn default() -> Self {
        Self::new(WordBank::shared())
    }
}

impl WordSource for RandomWordSource {
    fn draw(&mut self, label: &str) -> String {
        let words = self.bank.for_label(label);
        if words.is_empty() {
            return FILLER_WORD.to_owned();
        }
        let idx = self.rng.random_range(0..words.len());
        words[idx].to_owned()
    }
}
