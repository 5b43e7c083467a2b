use crate::synth::{SegmentSpec, ToneGenerator};

/// Zeroed segments of the requested length.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentToneGenerator;

impl ToneGenerator for SilentToneGenerator {
    fn render(&self, spec: &SegmentSpec) -> Vec<i16> {
        vec![0; spec.frames]
    }
}
