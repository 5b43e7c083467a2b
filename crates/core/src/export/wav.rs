use crate::export::ExportError;
use crate::synth::ChantAudio;
use std::io::Cursor;
use std::path::Path;

fn spec_for(audio: &ChantAudio) -> hound::WavSpec {
    hound::WavSpec {
        channels: audio.channels.max(1),
        sample_rate: audio.sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

pub fn write_wav(path: &Path, audio: &ChantAudio) -> Result<(), ExportError> {
    let mut writer = hound::WavWriter::create(path, spec_for(audio))?;
    for &s in &audio.pcm_i16 {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

/// In-memory WAV container, e.g. for uploads.
pub fn encode_wav(audio: &ChantAudio) -> Result<Vec<u8>, ExportError> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec_for(audio))?;
        for &s in &audio.pcm_i16 {
            writer.write_sample(s)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Reads 16-bit integer WAV data.
pub fn read_wav(bytes: &[u8]) -> Result<ChantAudio, ExportError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let pcm_i16 = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    Ok(ChantAudio {
        sample_rate_hz: spec.sample_rate,
        channels: spec.channels,
        pcm_i16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_16_bit_mono() {
        let audio = ChantAudio {
            sample_rate_hz: 44_100,
            channels: 1,
            pcm_i16: vec![0, 100, -100, i16::MAX, i16::MIN],
        };
        let bytes = encode_wav(&audio).expect("encode");
        assert_eq!(&bytes[..4], b"RIFF");

        let decoded = read_wav(&bytes).expect("decode");
        assert_eq!(decoded, audio);
    }

    #[test]
    fn empty_buffer_is_valid_wav() {
        let audio = ChantAudio {
            sample_rate_hz: 44_100,
            channels: 1,
            pcm_i16: Vec::new(),
        };
        let bytes = encode_wav(&audio).expect("encode");
        assert_eq!(read_wav(&bytes).expect("decode").pcm_i16.len(), 0);
    }
}
