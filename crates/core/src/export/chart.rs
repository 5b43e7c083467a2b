// SVG line charts for chant intensity.
//
// Three views share one renderer. The static "bhava waveform" plots syllable
// index against the bhava ordinal. The vector view plots each word's bhava
// vector sum, the figure carried in a QR payload. The scroll view plots cue
// start time against the cursor position, with a cursor line that sweeps
// across the plot over the length of the chant. All are written as plain SVG
// text so any browser can display them.

use crate::bhava::{intensity_of, BhavaVector};
use crate::scan::SyllableRecord;
use crate::synth::TimestampRecord;
use std::fmt::{self, Write};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 360.0;
const MARGIN: f64 = 48.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

pub fn intensity_chart(records: &[SyllableRecord]) -> LineChart {
    LineChart {
        title: "Bhāva Intensity Waveform".to_owned(),
        x_label: "Syllable Index".to_owned(),
        y_label: "Bhāva Intensity".to_owned(),
        points: records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, f64::from(intensity_of(&r.bhava))))
            .collect(),
    }
}

/// One point per word: the sum of its bhava vector.
pub fn vector_chart(vectors: &[BhavaVector]) -> LineChart {
    if vectors.is_empty() {
        tracing::warn!("no bhava vectors to chart");
    }
    LineChart {
        title: "Bhāva Vector Intensity".to_owned(),
        x_label: "Word Index".to_owned(),
        y_label: "Vector Sum".to_owned(),
        points: vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, v.iter().map(|&b| f64::from(b)).sum()))
            .collect(),
    }
}

pub fn scroll_chart(timestamps: &[TimestampRecord]) -> LineChart {
    LineChart {
        title: "Chant Cursor".to_owned(),
        x_label: "Time (s)".to_owned(),
        y_label: "Syllable".to_owned(),
        points: timestamps
            .iter()
            .map(|t| (t.start_ms as f64 / 1000.0, (t.index + 1) as f64))
            .collect(),
    }
}

struct Frame {
    x_min: f64,
    x_span: f64,
    y_max: f64,
}

impl Frame {
    fn fit(points: &[(f64, f64)]) -> Self {
        let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let y_max = points.iter().map(|p| p.1).fold(0.0, f64::max);
        let x_min = if x_min.is_finite() { x_min } else { 0.0 };
        let x_span = if x_max.is_finite() && x_max > x_min {
            x_max - x_min
        } else {
            1.0
        };
        Self {
            x_min,
            x_span,
            y_max: y_max.max(1.0),
        }
    }

    fn project(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let px = MARGIN + (x - self.x_min) / self.x_span * (WIDTH - 2.0 * MARGIN);
        let py = HEIGHT - MARGIN - y / self.y_max * (HEIGHT - 2.0 * MARGIN);
        (px, py)
    }
}

impl LineChart {
    pub fn to_svg(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        self.write_body(&mut out)?;
        out.push_str("</svg>\n");
        Ok(out)
    }

    /// Same plot plus a vertical cursor sweeping left to right over
    /// `duration_ms`.
    pub fn to_animated_svg(&self, duration_ms: u64) -> Result<String, fmt::Error> {
        let mut out = String::new();
        self.write_body(&mut out)?;
        let top = MARGIN;
        let bottom = HEIGHT - MARGIN;
        writeln!(
            out,
            r##"<line x1="{MARGIN}" y1="{top}" x2="{MARGIN}" y2="{bottom}" stroke="#c0392b" stroke-width="2">"##
        )?;
        for attr in ["x1", "x2"] {
            writeln!(
                out,
                r#"<animate attributeName="{attr}" from="{MARGIN}" to="{}" dur="{}ms" fill="freeze"/>"#,
                WIDTH - MARGIN,
                duration_ms.max(1)
            )?;
        }
        out.push_str("</line>\n</svg>\n");
        Ok(out)
    }

    fn write_body(&self, out: &mut String) -> fmt::Result {
        let frame = Frame::fit(&self.points);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            out,
            r#"<text x="{}" y="24" text-anchor="middle" font-size="16">{}</text>"#,
            WIDTH / 2.0,
            escape(&self.title)
        )?;
        writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="12">{}</text>"#,
            WIDTH / 2.0,
            HEIGHT - 12.0,
            escape(&self.x_label)
        )?;
        writeln!(
            out,
            r#"<text x="14" y="{}" text-anchor="middle" font-size="12" transform="rotate(-90 14 {})">{}</text>"#,
            HEIGHT / 2.0,
            HEIGHT / 2.0,
            escape(&self.y_label)
        )?;
        writeln!(
            out,
            r#"<polyline points="{MARGIN},{top} {MARGIN},{bottom} {right},{bottom}" fill="none" stroke="black"/>"#,
            top = MARGIN,
            bottom = HEIGHT - MARGIN,
            right = WIDTH - MARGIN
        )?;

        if self.points.is_empty() {
            return Ok(());
        }

        let projected: Vec<(f64, f64)> = self.points.iter().map(|&p| frame.project(p)).collect();
        out.push_str(r##"<polyline fill="none" stroke="#1f77b4" stroke-width="2" points=""##);
        for (i, (x, y)) in projected.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write!(out, "{x:.1},{y:.1}")?;
        }
        out.push_str("\"/>\n");
        for (x, y) in &projected {
            writeln!(out, r##"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="#1f77b4"/>"##)?;
        }
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
