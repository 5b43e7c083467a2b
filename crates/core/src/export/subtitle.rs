use crate::synth::TimestampRecord;
use std::fmt::{self, Write};

/// `hh:mm:ss,mmm`
pub fn format_cue_time(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// One numbered cue per syllable, captioned `"{syllable} ({bhava})"`.
pub fn to_webvtt(timestamps: &[TimestampRecord]) -> Result<String, fmt::Error> {
    let mut out = String::from("WEBVTT\n\n");
    for t in timestamps {
        writeln!(
            out,
            "{}\n{} --> {}\n{} ({})\n",
            t.index + 1,
            format_cue_time(t.start_ms),
            format_cue_time(t.end_ms),
            t.syllable,
            t.bhava
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(index: usize, syllable: &str) -> TimestampRecord {
        TimestampRecord {
            index,
            start_ms: index as u64 * 500,
            end_ms: (index as u64 + 1) * 500,
            syllable: syllable.to_owned(),
            bhava: "Prema".to_owned(),
        }
    }

    #[test]
    fn formats_cue_times() {
        assert_eq!(format_cue_time(0), "00:00:00,000");
        assert_eq!(format_cue_time(500), "00:00:00,500");
        assert_eq!(format_cue_time(61_250), "00:01:01,250");
        assert_eq!(format_cue_time(3_723_004), "01:02:03,004");
    }

    #[test]
    fn one_cue_per_syllable() {
        let vtt = to_webvtt(&[ts(0, "pre"), ts(1, "ma")]).expect("format");
        assert_eq!(
            vtt,
            "WEBVTT\n\n\
             1\n00:00:00,000 --> 00:00:00,500\npre (Prema)\n\n\
             2\n00:00:00,500 --> 00:00:01,000\nma (Prema)\n\n"
        );
    }

    #[test]
    fn empty_track_is_header_only() {
        assert_eq!(to_webvtt(&[]).expect("format"), "WEBVTT\n\n");
    }
}
