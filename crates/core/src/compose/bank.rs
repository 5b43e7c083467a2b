use crate::bhava::Bhava;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Bank used when a label does not name a known bhava.
pub const DEFAULT_WORDS: &[&str] = &["oṃ", "namaḥ", "svāhā"];

static DEFAULT_BANK: Lazy<WordBank> = Lazy::new(WordBank::builtin);

/// Immutable per-bhava word lists.
#[derive(Clone, Debug)]
pub struct WordBank {
    words: HashMap<Bhava, &'static [&'static str]>,
    fallback: &'static [&'static str],
}

impl WordBank {
    fn builtin() -> Self {
        let words = Bhava::ALL
            .into_iter()
            .map(|b| (b, builtin_words(b)))
            .collect();
        Self {
            words,
            fallback: DEFAULT_WORDS,
        }
    }

    /// The process-wide bank, built on first use.
    pub fn shared() -> &'static WordBank {
        &DEFAULT_BANK
    }

    pub fn for_bhava(&self, bhava: Bhava) -> &'static [&'static str] {
        self.words.get(&bhava).copied().unwrap_or(self.fallback)
    }

    pub fn for_label(&self, label: &str) -> &'static [&'static str] {
        match Bhava::parse(label) {
            Some(b) => self.for_bhava(b),
            None => self.fallback,
        }
    }
}

fn builtin_words(bhava: Bhava) -> &'static [&'static str] {
    match bhava {
        Bhava::Santih => &["śānti", "oṃ", "śam", "namaḥ", "sukha", "prasāda"],
        Bhava::Prema => &["prema", "priya", "sneha", "hṛdaya", "rasa", "madhu"],
        Bhava::Virya => &["vīrya", "bala", "jaya", "śūra", "tejas", "vikrama"],
        Bhava::Bhaya => &["bhaya", "rakṣa", "trāhi", "śaraṇa", "abhaya", "kavaca"],
        Bhava::Ascarya => &["adbhuta", "āścarya", "vismaya", "divya", "ananta", "jyoti"],
        Bhava::Karuna => &["karuṇā", "dayā", "kṛpā", "mitra", "anukampā", "sevā"],
        Bhava::Harsa => &["harṣa", "ānanda", "mudā", "utsava", "hāsa", "prīti"],
        Bhava::Titiksa => &["titikṣā", "kṣamā", "dhṛti", "sahana", "tapas", "sthira"],
        Bhava::Dhairya => &["dhīra", "śānta", "dhyāna", "sthiti", "nitya", "acala"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::count_syllables;

    #[test]
    fn every_bhava_has_words() {
        let bank = WordBank::shared();
        for b in Bhava::ALL {
            let words = bank.for_bhava(b);
            assert!(!words.is_empty(), "{b} has no words");
            assert!(words.iter().all(|w| count_syllables(w) > 0), "{b}");
        }
    }

    #[test]
    fn unknown_label_uses_default_bank() {
        let bank = WordBank::shared();
        assert_eq!(bank.for_label("Raudraḥ"), DEFAULT_WORDS);
        assert_eq!(bank.for_label(""), DEFAULT_WORDS);
        assert_eq!(DEFAULT_WORDS.len(), 3);
    }

    #[test]
    fn display_name_resolves_to_bank() {
        let bank = WordBank::shared();
        assert_eq!(
            bank.for_label("Vīrya (valor)"),
            bank.for_bhava(Bhava::Virya)
        );
    }
}
