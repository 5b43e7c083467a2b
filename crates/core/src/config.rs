use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_EXPORT_DIR: &str = "chant_exports";
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;
pub const DEFAULT_SYLLABLE_MS: u64 = 500;
pub const MAX_SYLLABLE_MS: u64 = 10_000;
pub const DEFAULT_PEAK_AMPLITUDE: f32 = 0.5;
pub const DEFAULT_FADE_FRACTION: f32 = 0.1;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const ENV_EXPORT_DIR: &str = "BHAVA_EXPORT_DIR";
pub const ENV_BIND_ADDR: &str = "BHAVA_BIND_ADDR";
pub const ENV_CLASSIFIER_URL: &str = "BHAVA_CLASSIFIER_URL";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sine => f.write_str("sine"),
            Self::Square => f.write_str("square"),
        }
    }
}

impl FromStr for Waveform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(Self::Sine),
            "square" => Ok(Self::Square),
            other => Err(ConfigError::UnknownWaveform(other.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyllableDuration {
    pub ms: u64,
}

impl SyllableDuration {
    pub fn new(ms: u64) -> Result<Self, ConfigError> {
        if ms == 0 {
            return Err(ConfigError::ZeroSyllableDuration);
        }
        if ms > MAX_SYLLABLE_MS {
            return Err(ConfigError::SyllableTooLong(ms));
        }
        Ok(Self { ms })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.ms)
    }

    pub fn frames_for_sample_rate(&self, sample_rate_hz: u32) -> usize {
        let sr = u64::from(sample_rate_hz);
        let frames = self.ms.saturating_mul(sr).saturating_div(1000);
        usize::try_from(frames).unwrap_or(usize::MAX)
    }
}

impl Default for SyllableDuration {
    fn default() -> Self {
        Self {
            ms: DEFAULT_SYLLABLE_MS,
        }
    }
}

/// Target peak of a normalized segment, as a fraction of full scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PeakAmplitude(f32);

impl PeakAmplitude {
    pub fn new(value: f32) -> Result<Self, ConfigError> {
        if !(value > 0.0 && value <= 1.0) {
            return Err(ConfigError::PeakOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}

impl Default for PeakAmplitude {
    fn default() -> Self {
        Self(DEFAULT_PEAK_AMPLITUDE)
    }
}

/// Share of a segment spent on each of the fade-in and fade-out ramps.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FadeFraction(f32);

impl FadeFraction {
    pub fn new(value: f32) -> Result<Self, ConfigError> {
        if !(0.0..0.5).contains(&value) {
            return Err(ConfigError::FadeOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}

impl Default for FadeFraction {
    fn default() -> Self {
        Self(DEFAULT_FADE_FRACTION)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SynthConfig {
    pub sample_rate_hz: u32,
    pub syllable: SyllableDuration,
    pub peak: PeakAmplitude,
    pub fade: FadeFraction,
    pub waveform: Waveform,
}

impl SynthConfig {
    pub fn new(sample_rate_hz: u32, syllable: SyllableDuration) -> Result<Self, ConfigError> {
        if sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        Ok(Self {
            sample_rate_hz,
            syllable,
            ..Default::default()
        })
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn frames_per_syllable(&self) -> usize {
        self.syllable.frames_for_sample_rate(self.sample_rate_hz)
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            syllable: SyllableDuration::default(),
            peak: PeakAmplitude::default(),
            fade: FadeFraction::default(),
            waveform: Waveform::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub export_dir: PathBuf,
    pub synth: SynthConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            synth: SynthConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub classifier_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            classifier_url: None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("syllable duration must be > 0 ms")]
    ZeroSyllableDuration,
    #[error("syllable duration must be at most 10000 ms, got {0}")]
    SyllableTooLong(u64),
    #[error("sample rate must be > 0 Hz")]
    ZeroSampleRate,
    #[error("peak amplitude must be in (0, 1], got {0}")]
    PeakOutOfRange(f32),
    #[error("fade fraction must be in [0, 0.5), got {0}")]
    FadeOutOfRange(f32),
    #[error("unknown waveform: {0}")]
    UnknownWaveform(String),
    #[error("unknown chant style: {0}")]
    UnknownStyle(String),
    #[error("mantra count must be > 0")]
    ZeroCount,
    #[error("mantra length must be > 0 syllables")]
    ZeroLength,
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_string_with_default(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &str,
) -> String {
    match cli_value {
        Some(v) => v,
        None => env.var(env_key).unwrap_or_else(|| default.to_owned()),
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_frames_simple() {
        let d = SyllableDuration::new(500).expect("nonzero");
        assert_eq!(d.frames_for_sample_rate(44_100), 22_050);
        assert_eq!(d.frames_for_sample_rate(16_000), 8_000);
    }

    #[test]
    fn zero_syllable_duration_rejected() {
        assert_eq!(
            SyllableDuration::new(0),
            Err(ConfigError::ZeroSyllableDuration)
        );
    }

    #[test]
    fn oversized_syllable_duration_rejected() {
        assert_eq!(
            SyllableDuration::new(MAX_SYLLABLE_MS + 1),
            Err(ConfigError::SyllableTooLong(MAX_SYLLABLE_MS + 1))
        );
        assert_eq!(
            SyllableDuration::new(u64::MAX / 1000),
            Err(ConfigError::SyllableTooLong(u64::MAX / 1000))
        );
        let longest = SyllableDuration::new(MAX_SYLLABLE_MS).expect("at the bound");
        assert_eq!(longest.frames_for_sample_rate(44_100), 441_000);
    }

    #[test]
    fn peak_and_fade_bounds() {
        assert!(PeakAmplitude::new(0.5).is_ok());
        assert!(PeakAmplitude::new(1.0).is_ok());
        assert!(PeakAmplitude::new(0.0).is_err());
        assert!(PeakAmplitude::new(1.5).is_err());
        assert!(FadeFraction::new(0.0).is_ok());
        assert!(FadeFraction::new(0.5).is_err());
    }

    #[test]
    fn waveform_parses_case_insensitively() {
        assert_eq!("Square".parse::<Waveform>(), Ok(Waveform::Square));
        assert_eq!(" sine ".parse::<Waveform>(), Ok(Waveform::Sine));
        assert!("saw".parse::<Waveform>().is_err());
    }

    #[test]
    fn default_synth_config_matches_constants() {
        let c = SynthConfig::default();
        assert_eq!(c.sample_rate_hz, DEFAULT_SAMPLE_RATE_HZ);
        assert_eq!(c.frames_per_syllable(), 22_050);
        assert_eq!(c.waveform, Waveform::Sine);
    }

    #[test]
    fn resolve_string_with_default_cli_takes_precedence() {
        let env = MapEnv::default().with_var(ENV_EXPORT_DIR, "env");
        let v = resolve_string_with_default(Some("cli".to_owned()), ENV_EXPORT_DIR, &env, "def");
        assert_eq!(v, "cli");
    }

    #[test]
    fn resolve_string_with_default_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_EXPORT_DIR, "env");
        let v = resolve_string_with_default(None, ENV_EXPORT_DIR, &env, "def");
        assert_eq!(v, "env");
    }

    #[test]
    fn resolve_string_with_default_default_used_when_both_missing() {
        let env = MapEnv::default();
        let v = resolve_string_with_default(None, ENV_BIND_ADDR, &env, DEFAULT_BIND_ADDR);
        assert_eq!(v, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn resolve_optional_string_falls_back_to_env() {
        let env = MapEnv::default().with_var(ENV_CLASSIFIER_URL, "http://localhost:8000/");
        assert_eq!(
            resolve_optional_string(None, ENV_CLASSIFIER_URL, &env).as_deref(),
            Some("http://localhost:8000/")
        );
        assert_eq!(resolve_optional_string(None, ENV_BIND_ADDR, &env), None);
    }
}
