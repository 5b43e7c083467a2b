mod oscillator;
mod silent;

use crate::bhava::Rasa;
use crate::config::{ConfigError, SynthConfig, Waveform};
use crate::scan::SyllableRecord;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub use oscillator::OscillatorToneGenerator;
pub use silent::SilentToneGenerator;

const LOG_TARGET: &str = "synth";

pub const LOW_HZ: f64 = 220.0;
pub const HIGH_HZ: f64 = 330.0;

/// Base pitch for labels missing from the rasa table.
pub const RASA_DEFAULT_HZ: f64 = 300.0;
/// Rise per syllable in the `rasa` style.
pub const RASA_STEP_HZ: f64 = 10.0;

/// Base pitch keyed by a classifier label.
pub fn rasa_base_hz(label: &str) -> f64 {
    match Rasa::parse(label) {
        Some(Rasa::Santih) => 220.0,
        Some(Rasa::Premah) => 330.0,
        Some(Rasa::Bhaktih) => 370.0,
        Some(Rasa::Virah) => 440.0,
        Some(Rasa::Raudrah) => 480.0,
        _ => RASA_DEFAULT_HZ,
    }
}

/// Pitch contour policy applied per syllable.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChantStyle {
    #[default]
    Default,
    Udatta,
    Svarita,
    Zigzag,
    /// Steady tone from the rasa table, rising by [`RASA_STEP_HZ`] each syllable.
    Rasa,
}

impl ChantStyle {
    pub const ALL: [ChantStyle; 5] = [
        ChantStyle::Default,
        ChantStyle::Udatta,
        ChantStyle::Svarita,
        ChantStyle::Zigzag,
        ChantStyle::Rasa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Udatta => "udatta",
            Self::Svarita => "svarita",
            Self::Zigzag => "zigzag",
            Self::Rasa => "rasa",
        }
    }

    pub fn contour(&self, index: usize, bhava: &str) -> FrequencyContour {
        match self {
            Self::Default => FrequencyContour::fixed(LOW_HZ),
            Self::Udatta => FrequencyContour::fixed(HIGH_HZ),
            Self::Svarita => FrequencyContour::glide(HIGH_HZ, LOW_HZ),
            Self::Zigzag if index % 2 == 0 => FrequencyContour::glide(LOW_HZ, HIGH_HZ),
            Self::Zigzag => FrequencyContour::glide(HIGH_HZ, LOW_HZ),
            Self::Rasa => {
                FrequencyContour::fixed(rasa_base_hz(bhava) + RASA_STEP_HZ * index as f64)
            }
        }
    }
}

impl fmt::Display for ChantStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChantStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == v)
            .ok_or(ConfigError::UnknownStyle(v))
    }
}

/// Linear frequency glide across one segment; `start_hz == end_hz` is a
/// steady tone.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FrequencyContour {
    pub start_hz: f64,
    pub end_hz: f64,
}

impl FrequencyContour {
    pub fn fixed(hz: f64) -> Self {
        Self {
            start_hz: hz,
            end_hz: hz,
        }
    }

    pub fn glide(start_hz: f64, end_hz: f64) -> Self {
        Self { start_hz, end_hz }
    }

    /// Instantaneous frequency at frame `k` of `frames`, endpoints inclusive.
    pub fn at(&self, k: usize, frames: usize) -> f64 {
        if frames <= 1 {
            return self.start_hz;
        }
        let t = k as f64 / (frames - 1) as f64;
        self.start_hz + (self.end_hz - self.start_hz) * t
    }
}

/// Everything a [`ToneGenerator`] needs to render one syllable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSpec {
    pub index: usize,
    pub frames: usize,
    pub sample_rate_hz: u32,
    pub contour: FrequencyContour,
    pub waveform: Waveform,
    pub fade_fraction: f32,
    pub peak: f32,
}

pub trait ToneGenerator: Send + Sync {
    /// Must return exactly `spec.frames` samples.
    fn render(&self, spec: &SegmentSpec) -> Vec<i16>;
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChantAudio {
    pub sample_rate_hz: u32,
    pub channels: u16,
    pub pcm_i16: Vec<i16>,
}

impl ChantAudio {
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate_hz == 0 || self.channels == 0 {
            return 0;
        }
        let frames = self.pcm_i16.len() as u64 / u64::from(self.channels);
        frames * 1000 / u64::from(self.sample_rate_hz)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimestampRecord {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub syllable: String,
    pub bhava: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChantRender {
    pub audio: ChantAudio,
    pub timestamps: Vec<TimestampRecord>,
}

pub fn synthesize<G: ToneGenerator + ?Sized>(
    records: &[SyllableRecord],
    style: ChantStyle,
    generator: &G,
    config: &SynthConfig,
) -> ChantRender {
    let frames = config.frames_per_syllable();
    let step_ms = config.syllable.ms;
    let mut pcm_i16 = Vec::with_capacity(frames.saturating_mul(records.len()));
    let mut timestamps = Vec::with_capacity(records.len());
    let mut current_ms = 0u64;

    for (index, record) in records.iter().enumerate() {
        let spec = SegmentSpec {
            index,
            frames,
            sample_rate_hz: config.sample_rate_hz,
            contour: style.contour(index, &record.bhava),
            waveform: config.waveform,
            fade_fraction: config.fade.get(),
            peak: config.peak.get(),
        };
        let mut segment = generator.render(&spec);
        segment.resize(frames, 0);
        pcm_i16.extend_from_slice(&segment);

        timestamps.push(TimestampRecord {
            index,
            start_ms: current_ms,
            end_ms: current_ms.saturating_add(step_ms),
            syllable: record.text.clone(),
            bhava: record.bhava.clone(),
        });
        current_ms = current_ms.saturating_add(step_ms);
    }

    let audio = ChantAudio {
        sample_rate_hz: config.sample_rate_hz,
        channels: 1,
        pcm_i16,
    };
    tracing::info!(
        target: LOG_TARGET,
        syllables = records.len(),
        style = %style,
        duration_ms = audio.duration_ms(),
        "chant synthesized"
    );

    ChantRender { audio, timestamps }
}
