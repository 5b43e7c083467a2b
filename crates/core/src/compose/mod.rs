mod bank;
mod random;

use crate::scan::is_iast_vowel;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use bank::{WordBank, DEFAULT_WORDS};
pub use random::RandomWordSource;

const LOG_TARGET: &str = "compose";

/// One-syllable word used to land exactly on the requested length.
pub const FILLER_WORD: &str = "oṃ";

/// Draws allowed for a single slot before padding with fillers.
pub const MAX_DRAWS_PER_WORD: usize = 64;

/// Syllable estimate for a transliterated word: one per vowel letter.
pub fn count_syllables(word: &str) -> usize {
    word.chars().filter(|&c| is_iast_vowel(c)).count()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mantra {
    pub words: Vec<String>,
    pub syllables: usize,
}

impl Mantra {
    fn push(&mut self, word: String, syllables: usize) {
        self.words.push(word);
        self.syllables += syllables;
    }
}

impl fmt::Display for Mantra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

/// Source of candidate words for a bhava label.
pub trait WordSource {
    fn draw(&mut self, label: &str) -> String;
}

pub fn compose_mantra<W: WordSource + ?Sized>(source: &mut W, label: &str, length: usize) -> Mantra {
    let mut mantra = Mantra::default();
    let mut draws = 0usize;

    while mantra.syllables < length {
        let needed = length - mantra.syllables;
        if draws >= MAX_DRAWS_PER_WORD {
            tracing::debug!(target: LOG_TARGET, label, needed, "draw budget spent, padding with filler");
            for _ in 0..needed {
                mantra.push(FILLER_WORD.to_owned(), 1);
            }
            break;
        }

        let word = source.draw(label);
        let syllables = count_syllables(&word);
        draws += 1;

        if syllables == 0 {
            continue;
        }
        if syllables <= needed {
            mantra.push(word, syllables);
            draws = 0;
        } else if needed == 1 {
            mantra.push(FILLER_WORD.to_owned(), 1);
        }
    }

    mantra
}

pub fn compose_multiple<W: WordSource + ?Sized>(
    source: &mut W,
    label: &str,
    count: usize,
    length: usize,
) -> Vec<Mantra> {
    let mantras: Vec<Mantra> = (0..count)
        .map(|_| compose_mantra(&mut *source, label, length))
        .collect();
    tracing::debug!(target: LOG_TARGET, label, count, length, "mantras composed");
    mantras
}
