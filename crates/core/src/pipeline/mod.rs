use crate::compose::{compose_multiple, Mantra, WordSource};
use crate::config::{AppConfig, ConfigError, SynthConfig};
use crate::export::{slugify, ChantArtifact, ChantExporter, ExportError, ExportReport};
use crate::scan::{scan_line, tag_syllables, SyllableRecord};
use crate::synth::{synthesize, ChantAudio, ChantStyle, TimestampRecord, ToneGenerator};

const LOG_TARGET: &str = "pipeline";

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    Config(#[from] ConfigError),
    #[error("no syllables found in chant text")]
    NoSyllables,
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    pub synth: SynthConfig,
}

impl PipelineConfig {
    pub fn from_app(app: &AppConfig) -> Self {
        Self { synth: app.synth }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeRequest {
    pub bhava: String,
    pub count: usize,
    pub length: usize,
    pub style: ChantStyle,
}

impl ComposeRequest {
    pub fn new(
        bhava: impl Into<String>,
        count: usize,
        length: usize,
        style: ChantStyle,
    ) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        Ok(Self {
            bhava: bhava.into(),
            count,
            length,
            style,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChantOutcome {
    pub slug: String,
    pub mantras: Vec<Mantra>,
    pub records: Vec<SyllableRecord>,
    pub timestamps: Vec<TimestampRecord>,
    pub audio: ChantAudio,
    pub exports: ExportReport,
}

pub struct Pipeline<W, G, E> {
    pub words: W,
    pub tones: G,
    pub exporter: E,
    pub config: PipelineConfig,
}

impl<W, G, E> Pipeline<W, G, E>
where
    W: WordSource,
    G: ToneGenerator,
    E: ChantExporter,
{
    pub fn compose(&mut self, request: &ComposeRequest) -> Result<ChantOutcome, PipelineError> {
        let request = ComposeRequest::new(
            request.bhava.clone(),
            request.count,
            request.length,
            request.style,
        )?;
        let mantras = compose_multiple(&mut self.words, &request.bhava, request.count, request.length);
        let line = mantras
            .iter()
            .map(Mantra::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(
            target: LOG_TARGET,
            bhava = %request.bhava,
            count = mantras.len(),
            "mantras composed"
        );

        let slug = format!("chant_{}", slugify(&request.bhava));
        self.render(slug, mantras, &line, &request.bhava, request.style)
    }

    /// Chants arbitrary text instead of composed mantras.
    pub fn chant_text(&self, text: &str, bhava: &str, style: ChantStyle) -> Result<ChantOutcome, PipelineError> {
        self.render(slugify(text), Vec::new(), text, bhava, style)
    }

    fn render(
        &self,
        slug: String,
        mantras: Vec<Mantra>,
        line: &str,
        bhava: &str,
        style: ChantStyle,
    ) -> Result<ChantOutcome, PipelineError> {
        let syllables = scan_line(line);
        if syllables.is_empty() {
            tracing::warn!(target: LOG_TARGET, line, "nothing to chant");
            return Err(PipelineError::NoSyllables);
        }

        let records = tag_syllables(&syllables, bhava);
        let render = synthesize(&records, style, &self.tones, &self.config.synth);
        let artifact = ChantArtifact {
            slug,
            style,
            audio: render.audio,
            records,
            timestamps: render.timestamps,
        };
        let exports = self.exporter.export(&artifact)?;

        Ok(ChantOutcome {
            slug: artifact.slug,
            mantras,
            records: artifact.records,
            timestamps: artifact.timestamps,
            audio: artifact.audio,
            exports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{RandomWordSource, WordBank};
    use crate::export::{read_wav, ExportOptions, FsExporter, NullExporter};
    use crate::synth::{OscillatorToneGenerator, SilentToneGenerator};

    fn offline() -> Pipeline<RandomWordSource, SilentToneGenerator, NullExporter> {
        Pipeline {
            words: RandomWordSource::seeded(WordBank::shared(), 99),
            tones: SilentToneGenerator,
            exporter: NullExporter,
            config: PipelineConfig::default(),
        }
    }

    #[test]
    fn compose_returns_requested_mantras() {
        let mut p = offline();
        let req = ComposeRequest::new("Śāntiḥ (peace)", 3, 5, ChantStyle::Default).expect("valid");
        let out = p.compose(&req).expect("compose");
        assert_eq!(out.mantras.len(), 3);
        assert_eq!(out.records.len(), 3 * 5);
        assert_eq!(out.slug, "chant_Śāntiḥ_peace");
        assert_eq!(out.timestamps.len(), out.records.len());
        assert!(out.records.iter().all(|r| r.bhava == "Śāntiḥ (peace)"));
        assert_eq!(out.exports, ExportReport::default());
    }

    #[test]
    fn timestamps_are_contiguous_for_composed_chant() {
        let mut p = offline();
        let req = ComposeRequest::new("Harṣa", 4, 7, ChantStyle::Zigzag).expect("valid");
        let out = p.compose(&req).expect("compose");
        for pair in out.timestamps.windows(2) {
            assert_eq!(pair[0].end_ms, pair[1].start_ms);
        }
        let expected = out.records.len() * 22_050;
        assert_eq!(out.audio.pcm_i16.len(), expected);
    }

    #[test]
    fn zero_count_is_rejected() {
        assert_eq!(
            ComposeRequest::new("Prema", 0, 5, ChantStyle::Default),
            Err(ConfigError::ZeroCount)
        );
        let mut p = offline();
        let bad = ComposeRequest {
            bhava: "Prema".into(),
            count: 2,
            length: 0,
            style: ChantStyle::Default,
        };
        assert!(matches!(
            p.compose(&bad),
            Err(PipelineError::Config(ConfigError::ZeroLength))
        ));
    }

    #[test]
    fn text_without_syllables_is_an_error() {
        let p = offline();
        assert!(matches!(
            p.chant_text("123 !!", "Prema", ChantStyle::Default),
            Err(PipelineError::NoSyllables)
        ));
    }

    #[test]
    fn om_namah_shivaya_exports_matching_wav_and_timestamps() {
        let dir = std::env::temp_dir().join(format!("bhava-chant-pipeline-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let p = Pipeline {
            words: RandomWordSource::seeded(WordBank::shared(), 1),
            tones: OscillatorToneGenerator,
            exporter: FsExporter::new(&dir, ExportOptions::default()),
            config: PipelineConfig::default(),
        };

        let out = p
            .chant_text("ॐ नमः शिवाय", "Śāntiḥ", ChantStyle::Default)
            .expect("chant");
        assert_eq!(out.records.len(), 6);
        assert_eq!(out.timestamps.len(), 6);

        let wav_path = out.exports.audio.as_ref().expect("audio written");
        let bytes = std::fs::read(wav_path).expect("read wav");
        let audio = read_wav(&bytes).expect("decode");
        assert_eq!(audio.sample_rate_hz, 44_100);
        assert_eq!(audio.duration_ms(), 6 * 500);

        let ts_path = out.exports.timestamps.as_ref().expect("timestamps written");
        let ts = crate::export::read_timestamps(ts_path).expect("read timestamps");
        assert_eq!(ts.len(), 6);
        assert_eq!(ts[5].end_ms, 3000);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
