mod chart;
mod fs;
mod null;
mod subtitle;
mod timestamps;
mod wav;

use crate::scan::SyllableRecord;
use crate::synth::{ChantAudio, ChantStyle, TimestampRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use chart::{intensity_chart, scroll_chart, vector_chart, LineChart};
pub use fs::FsExporter;
pub use null::NullExporter;
pub use subtitle::{format_cue_time, to_webvtt};
pub use timestamps::{read_timestamps, timestamps_json};
pub use wav::{encode_wav, read_wav, write_wav};

/// Everything produced by one synthesis run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChantArtifact {
    pub slug: String,
    pub style: ChantStyle,
    pub audio: ChantAudio,
    pub records: Vec<SyllableRecord>,
    pub timestamps: Vec<TimestampRecord>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportOptions {
    pub audio: bool,
    pub timestamps: bool,
    pub subtitles: bool,
    pub waveform_chart: bool,
    pub scroll_chart: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            audio: true,
            timestamps: true,
            subtitles: true,
            waveform_chart: false,
            scroll_chart: false,
        }
    }
}

impl ExportOptions {
    pub fn everything() -> Self {
        Self {
            audio: true,
            timestamps: true,
            subtitles: true,
            waveform_chart: true,
            scroll_chart: true,
        }
    }
}

/// Paths written by an exporter; `None` for artifacts that were skipped.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportReport {
    pub audio: Option<PathBuf>,
    pub timestamps: Option<PathBuf>,
    pub subtitles: Option<PathBuf>,
    pub waveform_chart: Option<PathBuf>,
    pub scroll_chart: Option<PathBuf>,
}

impl ExportReport {
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        [
            &self.audio,
            &self.timestamps,
            &self.subtitles,
            &self.waveform_chart,
            &self.scroll_chart,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart formatting failed")]
    Format(#[from] std::fmt::Error),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub trait ChantExporter: Send + Sync {
    fn export(&self, artifact: &ChantArtifact) -> Result<ExportReport, ExportError>;
}

/// File-name stem: alphanumerics kept, whitespace runs become `_`, the rest
/// is dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.chars() {
        if c.is_whitespace() || c == '_' {
            pending_sep = !slug.is_empty();
        } else if c.is_alphanumeric() {
            if pending_sep {
                slug.push('_');
                pending_sep = false;
            }
            slug.push(c);
        }
    }
    if slug.is_empty() {
        "chant".to_owned()
    } else {
        slug
    }
}
