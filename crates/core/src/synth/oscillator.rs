use crate::config::Waveform;
use crate::synth::{FrequencyContour, SegmentSpec, ToneGenerator};
use std::f64::consts::TAU;

/// Sine or square tones with a linear fade at both ends and a fixed peak.
#[derive(Clone, Copy, Debug, Default)]
pub struct OscillatorToneGenerator;

impl ToneGenerator for OscillatorToneGenerator {
    fn render(&self, spec: &SegmentSpec) -> Vec<i16> {
        let mut samples = oscillate(spec.contour, spec.frames, spec.sample_rate_hz, spec.waveform);
        apply_fade(&mut samples, spec.fade_fraction);
        normalize(&mut samples, f64::from(spec.peak));
        samples
            .into_iter()
            .map(|x| (x * f64::from(i16::MAX)).round() as i16)
            .collect()
    }
}

/// Phase is the running sum of `2π f / sr`, so a gliding frequency never
/// jumps in phase.
fn oscillate(contour: FrequencyContour, frames: usize, sample_rate_hz: u32, waveform: Waveform) -> Vec<f64> {
    let sr = f64::from(sample_rate_hz.max(1));
    let mut phase = 0.0f64;
    (0..frames)
        .map(|k| {
            phase += TAU * contour.at(k, frames) / sr;
            let s = phase.sin();
            match waveform {
                Waveform::Sine => s,
                Waveform::Square => sign(s),
            }
        })
        .collect()
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn apply_fade(samples: &mut [f64], fraction: f32) {
    let n = samples.len();
    let fade = ((n as f64) * f64::from(fraction)) as usize;
    if fade == 0 {
        return;
    }
    let fade = fade.min(n / 2);
    for k in 0..fade {
        let gain = k as f64 / fade as f64;
        samples[k] *= gain;
        samples[n - 1 - k] *= gain;
    }
}

/// Scales to `peak`; an all-zero segment stays silent.
fn normalize(samples: &mut [f64], peak: f64) {
    let max = samples.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    if max <= f64::EPSILON {
        return;
    }
    for x in samples.iter_mut() {
        *x = *x / max * peak;
    }
}
