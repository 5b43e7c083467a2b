//! Syllable scanning for transliterated (IAST) and Devanagari text.
//!
//! A syllable is a maximal run of consonants around a single vowel. Letters
//! outside the fixed sets are dropped without error.

mod tags;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use tags::{chandas_tag, tag_syllables, ChandasTag, SyllableRecord};

pub(crate) const IAST_VOWELS: &str = "aāiīuūṛṝḷḹeo";
pub(crate) const IAST_CONSONANTS: &str = "bcdghjklmnprstvyṅñṭḍṇśṣḥṃṁ";

const DEV_CONSONANT: &str = r"[\x{0915}-\x{0939}\x{0958}-\x{095F}]\x{093C}?";
const DEV_VOWEL_SIGN: &str = r"[\x{093E}-\x{094C}\x{0962}\x{0963}]";
const DEV_INDEPENDENT_VOWEL: &str = r"[\x{0904}-\x{0914}\x{0950}\x{0960}\x{0961}]";
const DEV_MODIFIER: &str = r"[\x{0901}-\x{0903}]";

static SYLLABLE: Lazy<Regex> = Lazy::new(|| {
    let iast = format!("[{IAST_CONSONANTS}]*[{IAST_VOWELS}][{IAST_CONSONANTS}]*");
    let akshara = format!(
        r"(?:{DEV_CONSONANT}\x{{094D}})*{DEV_CONSONANT}(?:{DEV_VOWEL_SIGN}|\x{{094D}})?{DEV_MODIFIER}?"
    );
    let vowel = format!("{DEV_INDEPENDENT_VOWEL}{DEV_MODIFIER}?");
    Regex::new(&format!("{iast}|{akshara}|{vowel}")).expect("syllable pattern is valid")
});

pub fn is_iast_vowel(c: char) -> bool {
    IAST_VOWELS.contains(c)
}

pub fn is_iast_consonant(c: char) -> bool {
    IAST_CONSONANTS.contains(c)
}

/// Syllables of every word of `line`, in reading order.
pub fn scan_line(line: &str) -> Vec<String> {
    line.split_whitespace()
        .flat_map(|word| SYLLABLE.find_iter(word).map(|m| m.as_str().to_owned()))
        .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineScan {
    pub line: String,
    pub syllables: Vec<String>,
}

pub fn scan_text_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LineScan> {
    lines
        .iter()
        .map(|l| {
            let line = l.as_ref();
            LineScan {
                line: line.to_owned(),
                syllables: scan_line(line),
            }
        })
        .collect()
}
