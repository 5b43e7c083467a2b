//! Placeholder obfuscation for bhava vectors.
//!
//! Every byte is XORed with a fixed key. This hides nothing from anyone who
//! knows the key and is only here so the QR payload is not plain text.

use crate::bhava::BhavaVector;

pub const XOR_KEY: u8 = 42;

pub fn encrypt_vectors(vectors: &[BhavaVector]) -> Vec<BhavaVector> {
    xor_all(vectors)
}

pub fn decrypt_vectors(vectors: &[BhavaVector]) -> Vec<BhavaVector> {
    xor_all(vectors)
}

fn xor_all(vectors: &[BhavaVector]) -> Vec<BhavaVector> {
    vectors
        .iter()
        .map(|v| v.iter().map(|b| b ^ XOR_KEY).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bhava::bhava_vectors;

    #[test]
    fn decrypt_restores_every_byte_value() {
        let all: Vec<u8> = (0..=255).collect();
        let vectors = vec![all, vec![], vec![42, 0, 255]];
        assert_eq!(decrypt_vectors(&encrypt_vectors(&vectors)), vectors);
    }

    #[test]
    fn encryption_changes_bytes() {
        let vectors = bhava_vectors("oṃ namaḥ śivāya");
        let enc = encrypt_vectors(&vectors);
        assert_ne!(enc, vectors);
        assert_eq!(enc[0][0], XOR_KEY);
    }
}
