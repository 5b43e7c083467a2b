mod vector;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use vector::{bhava_vectors, tags_from_vectors, BhavaVector, VECTOR_WIDTH};

/// Emotion categories offered by the composer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Bhava {
    #[serde(rename = "Śāntiḥ")]
    Santih,
    #[serde(rename = "Prema")]
    Prema,
    #[serde(rename = "Vīrya")]
    Virya,
    #[serde(rename = "Bhaya")]
    Bhaya,
    #[serde(rename = "Āścarya")]
    Ascarya,
    #[serde(rename = "Karunā")]
    Karuna,
    #[serde(rename = "Harṣa")]
    Harsa,
    #[serde(rename = "Titikṣā")]
    Titiksa,
    #[serde(rename = "Dhairya")]
    Dhairya,
}

impl Bhava {
    pub const ALL: [Bhava; 9] = [
        Bhava::Santih,
        Bhava::Prema,
        Bhava::Virya,
        Bhava::Bhaya,
        Bhava::Ascarya,
        Bhava::Karuna,
        Bhava::Harsa,
        Bhava::Titiksa,
        Bhava::Dhairya,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Santih => "Śāntiḥ",
            Self::Prema => "Prema",
            Self::Virya => "Vīrya",
            Self::Bhaya => "Bhaya",
            Self::Ascarya => "Āścarya",
            Self::Karuna => "Karunā",
            Self::Harsa => "Harṣa",
            Self::Titiksa => "Titikṣā",
            Self::Dhairya => "Dhairya",
        }
    }

    pub fn gloss(&self) -> &'static str {
        match self {
            Self::Santih => "peace",
            Self::Prema => "love",
            Self::Virya => "valor",
            Self::Bhaya => "fear",
            Self::Ascarya => "wonder",
            Self::Karuna => "compassion",
            Self::Harsa => "joy",
            Self::Titiksa => "forbearance",
            Self::Dhairya => "patience",
        }
    }

    fn ascii_alias(&self) -> &'static str {
        match self {
            Self::Santih => "shanti",
            Self::Prema => "prema",
            Self::Virya => "virya",
            Self::Bhaya => "bhaya",
            Self::Ascarya => "ascharya",
            Self::Karuna => "karuna",
            Self::Harsa => "harsha",
            Self::Titiksa => "titiksha",
            Self::Dhairya => "dhairya",
        }
    }

    /// `"Śāntiḥ (peace)"`, the form shown in selection lists.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.label(), self.gloss())
    }

    /// 1-based position in [`Bhava::ALL`], used as the chart intensity.
    pub fn ordinal(&self) -> u32 {
        Self::ALL
            .iter()
            .position(|b| b == self)
            .map_or(0, |i| i as u32 + 1)
    }

    /// Lenient lookup: accepts the label, the display name, the gloss or
    /// the ASCII alias.
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim();
        if v.is_empty() {
            return None;
        }
        let lower = v.to_lowercase();
        Self::ALL.into_iter().find(|b| {
            v == b.label()
                || v == b.display_name()
                || lower == b.gloss()
                || lower == b.ascii_alias()
                || lower == b.label().to_lowercase()
        })
    }
}

impl fmt::Display for Bhava {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Intensity of an arbitrary label: the bhava ordinal, or 0 when unknown.
pub fn intensity_of(label: &str) -> u32 {
    Bhava::parse(label).map_or(0, |b| b.ordinal())
}

/// Labels a classifier may predict.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rasa {
    #[serde(rename = "Śāntiḥ")]
    Santih,
    #[serde(rename = "Bhaktiḥ")]
    Bhaktih,
    #[serde(rename = "Premaḥ")]
    Premah,
    #[serde(rename = "Vīraḥ")]
    Virah,
    #[serde(rename = "Karunā")]
    Karuna,
    #[serde(rename = "Raudraḥ")]
    Raudrah,
    #[serde(rename = "Adbhutam")]
    Adbhutam,
    #[serde(rename = "Hāsyaḥ")]
    Hasyah,
    #[serde(rename = "Bhayānakaḥ")]
    Bhayanakah,
    #[serde(rename = "Bībhatsaḥ")]
    Bibhatsah,
}

impl Rasa {
    pub const ALL: [Rasa; 10] = [
        Rasa::Santih,
        Rasa::Bhaktih,
        Rasa::Premah,
        Rasa::Virah,
        Rasa::Karuna,
        Rasa::Raudrah,
        Rasa::Adbhutam,
        Rasa::Hasyah,
        Rasa::Bhayanakah,
        Rasa::Bibhatsah,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Santih => "Śāntiḥ",
            Self::Bhaktih => "Bhaktiḥ",
            Self::Premah => "Premaḥ",
            Self::Virah => "Vīraḥ",
            Self::Karuna => "Karunā",
            Self::Raudrah => "Raudraḥ",
            Self::Adbhutam => "Adbhutam",
            Self::Hasyah => "Hāsyaḥ",
            Self::Bhayanakah => "Bhayānakaḥ",
            Self::Bibhatsah => "Bībhatsaḥ",
        }
    }

    /// Exact or case-insensitive label match; a trailing `(gloss)` is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let head = value.split('(').next().unwrap_or(value).trim();
        if head.is_empty() {
            return None;
        }
        let lower = head.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| head == r.label() || lower == r.label().to_lowercase())
    }
}

impl fmt::Display for Rasa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasa_parse_ignores_gloss_and_case() {
        assert_eq!(Rasa::parse("Vīraḥ"), Some(Rasa::Virah));
        assert_eq!(Rasa::parse("vīraḥ (heroism)"), Some(Rasa::Virah));
        assert_eq!(Rasa::parse(" Bhaktiḥ "), Some(Rasa::Bhaktih));
        assert_eq!(Rasa::parse("Prema"), None);
        assert_eq!(Rasa::parse(""), None);
        for r in Rasa::ALL {
            assert_eq!(Rasa::parse(r.label()), Some(r));
        }
    }

    #[test]
    fn parse_accepts_every_spelling() {
        assert_eq!(Bhava::parse("Śāntiḥ"), Some(Bhava::Santih));
        assert_eq!(Bhava::parse("Śāntiḥ (peace)"), Some(Bhava::Santih));
        assert_eq!(Bhava::parse("peace"), Some(Bhava::Santih));
        assert_eq!(Bhava::parse("SHANTI"), Some(Bhava::Santih));
        assert_eq!(Bhava::parse("Titikṣā (forbearance)"), Some(Bhava::Titiksa));
        assert_eq!(Bhava::parse("rage"), None);
        assert_eq!(Bhava::parse("  "), None);
    }

    #[test]
    fn ordinals_are_one_based_and_unique() {
        let ords: Vec<u32> = Bhava::ALL.iter().map(Bhava::ordinal).collect();
        assert_eq!(ords, (1..=9).collect::<Vec<_>>());
        assert_eq!(intensity_of("Dhairya"), 9);
        assert_eq!(intensity_of("unknown"), 0);
    }

    #[test]
    fn rasa_serializes_as_label() {
        for rasa in Rasa::ALL {
            let json = serde_json::to_string(&rasa).expect("serialize");
            assert_eq!(json, format!("\"{}\"", rasa.label()));
        }
    }
}
