use crate::export::{
    intensity_chart, scroll_chart, timestamps_json, to_webvtt, write_wav, ChantArtifact,
    ChantExporter, ExportError, ExportOptions, ExportReport,
};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "export::fs";

/// Writes artifacts as files under one directory.
#[derive(Clone, Debug)]
pub struct FsExporter {
    dir: PathBuf,
    options: ExportOptions,
}

impl FsExporter {
    pub fn new(dir: impl Into<PathBuf>, options: ExportOptions) -> Self {
        Self {
            dir: dir.into(),
            options,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn audio_path(&self, artifact: &ChantArtifact) -> PathBuf {
        self.dir
            .join(format!("{}_{}.wav", artifact.slug, artifact.style))
    }

    pub fn timestamps_path(&self, artifact: &ChantArtifact) -> PathBuf {
        self.dir
            .join(format!("{}_{}_timestamps.json", artifact.slug, artifact.style))
    }

    pub fn subtitles_path(&self, artifact: &ChantArtifact) -> PathBuf {
        self.dir
            .join(format!("{}_{}_sync.vtt", artifact.slug, artifact.style))
    }

    pub fn waveform_chart_path(&self, artifact: &ChantArtifact) -> PathBuf {
        self.dir.join(format!("{}_waveform.svg", artifact.slug))
    }

    pub fn scroll_chart_path(&self, artifact: &ChantArtifact) -> PathBuf {
        self.dir
            .join(format!("{}_{}_scroll.svg", artifact.slug, artifact.style))
    }

    fn write_text(path: &Path, contents: &str) -> Result<(), ExportError> {
        std::fs::write(path, contents).map_err(|e| ExportError::io(path, e))
    }
}

impl ChantExporter for FsExporter {
    fn export(&self, artifact: &ChantArtifact) -> Result<ExportReport, ExportError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ExportError::io(&self.dir, e))?;
        let mut report = ExportReport::default();

        if self.options.audio {
            let path = self.audio_path(artifact);
            write_wav(&path, &artifact.audio)?;
            report.audio = Some(path);
        }

        if self.options.timestamps {
            let path = self.timestamps_path(artifact);
            Self::write_text(&path, &timestamps_json(&artifact.timestamps)?)?;
            report.timestamps = Some(path);
        }

        if self.options.subtitles {
            let path = self.subtitles_path(artifact);
            Self::write_text(&path, &to_webvtt(&artifact.timestamps)?)?;
            report.subtitles = Some(path);
        }

        if self.options.waveform_chart {
            let path = self.waveform_chart_path(artifact);
            Self::write_text(&path, &intensity_chart(&artifact.records).to_svg()?)?;
            report.waveform_chart = Some(path);
        }

        if self.options.scroll_chart {
            let path = self.scroll_chart_path(artifact);
            let svg = scroll_chart(&artifact.timestamps).to_animated_svg(artifact.audio.duration_ms())?;
            Self::write_text(&path, &svg)?;
            report.scroll_chart = Some(path);
        }

        for path in report.written() {
            tracing::info!(target: LOG_TARGET, path = %path.display(), "artifact written");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SynthConfig;
    use crate::export::read_timestamps;
    use crate::scan::tag_syllables;
    use crate::synth::{synthesize, ChantStyle, SilentToneGenerator};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bhava-chant-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn artifact() -> ChantArtifact {
        let records = tag_syllables(&["oṃ", "na", "maḥ"], "Śāntiḥ");
        let render = synthesize(&records, ChantStyle::Svarita, &SilentToneGenerator, &SynthConfig::default());
        ChantArtifact {
            slug: "chant_Śāntiḥ".to_owned(),
            style: ChantStyle::Svarita,
            audio: render.audio,
            records,
            timestamps: render.timestamps,
        }
    }

    #[test]
    fn writes_selected_artifacts_with_fixed_names() {
        let dir = scratch_dir("fs-all");
        let exporter = FsExporter::new(&dir, ExportOptions::everything());
        let report = exporter.export(&artifact()).expect("export");

        assert_eq!(report.audio, Some(dir.join("chant_Śāntiḥ_svarita.wav")));
        assert_eq!(
            report.timestamps,
            Some(dir.join("chant_Śāntiḥ_svarita_timestamps.json"))
        );
        assert_eq!(report.subtitles, Some(dir.join("chant_Śāntiḥ_svarita_sync.vtt")));
        assert_eq!(report.waveform_chart, Some(dir.join("chant_Śāntiḥ_waveform.svg")));
        assert_eq!(report.scroll_chart, Some(dir.join("chant_Śāntiḥ_svarita_scroll.svg")));
        assert!(report.written().all(|p| p.exists()));

        let ts = read_timestamps(&dir.join("chant_Śāntiḥ_svarita_timestamps.json")).expect("read");
        assert_eq!(ts.len(), 3);
        assert_eq!(ts[2].end_ms, 1500);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn skipped_artifacts_are_not_written() {
        let dir = scratch_dir("fs-some");
        let options = ExportOptions {
            audio: false,
            subtitles: false,
            ..Default::default()
        };
        let report = FsExporter::new(&dir, options).export(&artifact()).expect("export");
        assert!(report.audio.is_none());
        assert!(report.subtitles.is_none());
        assert!(report.timestamps.is_some());
        assert!(!dir.join("chant_Śāntiḥ_svarita.wav").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
