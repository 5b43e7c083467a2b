use crate::bhava::{bhava_vectors, tags_from_vectors, BhavaVector, Rasa};
use crate::crypto::{decrypt_vectors, encrypt_vectors};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use qrcode::render::svg;
use qrcode::QrCode;
use serde::{Deserialize, Serialize};

pub const PAYLOAD_VERSION: u8 = 1;
const MIN_QR_PX: u32 = 240;

/// JSON body carried inside the base64 payload. Vectors are stored
/// encrypted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QrEnvelope {
    pub version: u8,
    pub mantra: String,
    pub bhava_vectors: Vec<BhavaVector>,
}

/// Decoded payload with vectors back in the clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedPayload {
    pub mantra: String,
    pub vectors: Vec<BhavaVector>,
    pub tags: Vec<Rasa>,
}

#[derive(thiserror::Error, Debug)]
pub enum QrError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a valid envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported payload version {0}")]
    Version(u8),

    #[error("qr encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

pub fn encode_payload(mantra: &str) -> Result<String, QrError> {
    let envelope = QrEnvelope {
        version: PAYLOAD_VERSION,
        mantra: mantra.to_owned(),
        bhava_vectors: encrypt_vectors(&bhava_vectors(mantra)),
    };
    let json = serde_json::to_vec(&envelope)?;
    Ok(STANDARD.encode(json))
}

pub fn decode_payload(payload: &str) -> Result<DecodedPayload, QrError> {
    let raw = STANDARD.decode(payload.trim())?;
    let envelope: QrEnvelope = serde_json::from_slice(&raw)?;
    if envelope.version != PAYLOAD_VERSION {
        return Err(QrError::Version(envelope.version));
    }
    let vectors = decrypt_vectors(&envelope.bhava_vectors);
    let tags = tags_from_vectors(&vectors);
    Ok(DecodedPayload {
        mantra: envelope.mantra,
        vectors,
        tags,
    })
}

/// Black-on-white QR code of `payload` as an SVG document.
pub fn render_svg(payload: &str) -> Result<String, QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(MIN_QR_PX, MIN_QR_PX)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips() {
        let payload = encode_payload("oṃ namaḥ śivāya").expect("encode");
        let decoded = decode_payload(&payload).expect("decode");
        assert_eq!(decoded.mantra, "oṃ namaḥ śivāya");
        assert_eq!(decoded.vectors, bhava_vectors("oṃ namaḥ śivāya"));
        assert_eq!(decoded.tags.len(), 3);
    }

    #[test]
    fn payload_is_opaque() {
        let payload = encode_payload("jaya").expect("encode");
        assert!(!payload.contains('{'));
        let raw = STANDARD.decode(&payload).expect("base64");
        let envelope: QrEnvelope = serde_json::from_slice(&raw).expect("json");
        assert_ne!(envelope.bhava_vectors, bhava_vectors("jaya"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode_payload("***"), Err(QrError::Base64(_))));
        let not_json = STANDARD.encode(b"hello");
        assert!(matches!(decode_payload(&not_json), Err(QrError::Json(_))));
    }

    #[test]
    fn rejects_unknown_version() {
        let envelope = QrEnvelope {
            version: 9,
            mantra: String::new(),
            bhava_vectors: vec![],
        };
        let payload = STANDARD.encode(serde_json::to_vec(&envelope).expect("json"));
        assert!(matches!(decode_payload(&payload), Err(QrError::Version(9))));
    }

    #[test]
    fn renders_svg_document() {
        let svg = render_svg(&encode_payload("oṃ").expect("encode")).expect("render");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }
}
