mod random;
mod remote;

use crate::bhava::Rasa;
use crate::export::read_wav;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub use random::RandomClassifier;
pub use remote::RemoteClassifier;

/// Body returned by the predict endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    pub predicted_bhava: Rasa,
}

#[derive(thiserror::Error, Debug)]
pub enum ClassifyError {
    #[error("invalid audio: {0}")]
    InvalidAudio(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier returned {0}: {1}")]
    HttpStatus(u16, String),
}

pub trait BhavaClassifier: Send + Sync {
    fn classify(&self, pcm: Vec<i16>) -> BoxFuture<'_, Result<Rasa, ClassifyError>>;
}

/// Samples from an uploaded body: a RIFF/WAV file, or raw little-endian
/// 16-bit PCM.
pub fn pcm_from_upload(bytes: &[u8]) -> Result<Vec<i16>, ClassifyError> {
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
        return read_wav(bytes)
            .map(|audio| audio.pcm_i16)
            .map_err(|e| ClassifyError::InvalidAudio(e.to_string()));
    }
    if bytes.len() % 2 != 0 {
        return Err(ClassifyError::InvalidAudio(format!(
            "raw pcm byte length must be a multiple of 2, got {}",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}

pub(crate) fn pcm_to_bytes(pcm: &[i16]) -> Vec<u8> {
    pcm.iter().flat_map(|s| s.to_le_bytes()).collect()
}
