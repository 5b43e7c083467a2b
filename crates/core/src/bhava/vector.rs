use crate::bhava::Rasa;

pub const VECTOR_WIDTH: usize = 6;

pub type BhavaVector = Vec<u8>;

/// One vector per whitespace-separated word: `(chars * i) % 256` for each
/// lane `i`.
pub fn bhava_vectors(text: &str) -> Vec<BhavaVector> {
    text.split_whitespace()
        .map(|word| {
            let len = word.chars().count();
            (0..VECTOR_WIDTH)
                .map(|i| (len.wrapping_mul(i) % 256) as u8)
                .collect()
        })
        .collect()
}

/// Even lane sums read as Śāntiḥ, odd ones as Vīraḥ.
pub fn tags_from_vectors(vectors: &[BhavaVector]) -> Vec<Rasa> {
    vectors
        .iter()
        .map(|v| {
            let sum: u32 = v.iter().map(|&x| u32::from(x)).sum();
            if sum % 2 == 0 {
                Rasa::Santih
            } else {
                Rasa::Virah
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_scale_with_word_length() {
        let v = bhava_vectors("oṃ namaḥ");
        assert_eq!(v, vec![vec![0, 2, 4, 6, 8, 10], vec![0, 5, 10, 15, 20, 25]]);
    }

    #[test]
    fn long_words_wrap_at_256() {
        let word = "a".repeat(100);
        let v = bhava_vectors(&word);
        assert_eq!(v[0][3], (300 % 256) as u8);
    }

    #[test]
    fn parity_picks_tag() {
        let tags = tags_from_vectors(&bhava_vectors("oṃ namaḥ"));
        // 30 is even, 75 is odd
        assert_eq!(tags, vec![Rasa::Santih, Rasa::Virah]);
        assert!(tags_from_vectors(&[]).is_empty());
    }
}
