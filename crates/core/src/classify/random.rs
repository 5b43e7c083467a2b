use crate::bhava::Rasa;
use crate::classify::{BhavaClassifier, ClassifyError};
use futures::future::BoxFuture;
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Stand-in for a trained model: a uniform draw over every [`Rasa`],
/// ignoring the audio.
pub struct RandomClassifier {
    rng: Mutex<StdRng>,
}

impl RandomClassifier {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self) -> Rasa {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Rasa::ALL[rng.random_range(0..Rasa::ALL.len())]
    }
}

impl Default for RandomClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BhavaClassifier for RandomClassifier {
    fn classify(&self, pcm: Vec<i16>) -> BoxFuture<'_, Result<Rasa, ClassifyError>> {
        let rasa = self.pick();
        async move {
            tracing::debug!(samples = pcm.len(), rasa = %rasa, "random prediction");
            Ok(rasa)
        }
        .boxed()
    }
}
