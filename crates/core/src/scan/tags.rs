use crate::scan::is_iast_consonant;
use serde::{Deserialize, Serialize};
use std::fmt;

const IAST_LONG_VOWELS: &str = "āīūṝḹeo";
const DEV_LONG_VOWELS: &[char] = &[
    '\u{0906}', '\u{0908}', '\u{090A}', '\u{090F}', '\u{0910}', '\u{0913}', '\u{0914}', '\u{0950}',
    '\u{0960}', '\u{0961}', '\u{093E}', '\u{0940}', '\u{0942}', '\u{0944}', '\u{0947}', '\u{0948}',
    '\u{094B}', '\u{094C}',
];
const DEV_VIRAMA: char = '\u{094D}';

/// Prosodic weight of a syllable.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChandasTag {
    /// guru
    #[serde(rename = "heavy")]
    Heavy,
    /// laghu
    #[serde(rename = "light")]
    Light,
}

impl fmt::Display for ChandasTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heavy => f.write_str("heavy"),
            Self::Light => f.write_str("light"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyllableRecord {
    pub text: String,
    pub bhava: String,
    pub tag: ChandasTag,
}

/// Heavy when the syllable holds a long vowel or two adjacent consonants.
pub fn chandas_tag(syllable: &str) -> ChandasTag {
    let long_vowel = syllable
        .chars()
        .any(|c| IAST_LONG_VOWELS.contains(c) || DEV_LONG_VOWELS.contains(&c));
    if long_vowel || has_cluster(syllable) {
        ChandasTag::Heavy
    } else {
        ChandasTag::Light
    }
}

fn has_cluster(syllable: &str) -> bool {
    let mut run = 0usize;
    for c in syllable.chars() {
        if c == DEV_VIRAMA {
            return true;
        }
        if is_iast_consonant(c) {
            run += 1;
            if run >= 2 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Every record carries the bhava chosen for the whole chant.
pub fn tag_syllables<S: AsRef<str>>(syllables: &[S], bhava: &str) -> Vec<SyllableRecord> {
    syllables
        .iter()
        .map(|s| {
            let text = s.as_ref();
            SyllableRecord {
                text: text.to_owned(),
                bhava: bhava.to_owned(),
                tag: chandas_tag(text),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_vowels_are_heavy() {
        assert_eq!(chandas_tag("śā"), ChandasTag::Heavy);
        assert_eq!(chandas_tag("oṃ"), ChandasTag::Heavy);
        assert_eq!(chandas_tag("वा"), ChandasTag::Heavy);
        assert_eq!(chandas_tag("ॐ"), ChandasTag::Heavy);
    }

    #[test]
    fn clusters_are_heavy() {
        assert_eq!(chandas_tag("kṣa"), ChandasTag::Heavy);
        assert_eq!(chandas_tag("tra"), ChandasTag::Heavy);
        assert_eq!(chandas_tag("क्ष"), ChandasTag::Heavy);
    }

    #[test]
    fn short_open_syllables_are_light() {
        assert_eq!(chandas_tag("na"), ChandasTag::Light);
        assert_eq!(chandas_tag("śiv"), ChandasTag::Light);
        assert_eq!(chandas_tag("शि"), ChandasTag::Light);
    }

    #[test]
    fn records_share_the_chant_bhava() {
        let records = tag_syllables(&["ja", "yā"], "Vīrya");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.bhava == "Vīrya"));
        assert_eq!(records[0].tag, ChandasTag::Light);
        assert_eq!(records[1].tag, ChandasTag::Heavy);
    }

    #[test]
    fn tag_serializes_lowercase() {
        let json = serde_json::to_string(&ChandasTag::Heavy).expect("serialize");
        assert_eq!(json, "\"heavy\"");
    }
}
