use std::collections::BTreeSet;

/// Fixed set of lower-case substrings whose presence in page text signals a
/// promotion. Immutable for the process lifetime.
#[derive(Clone, Debug)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    /// The built-in promotion vocabulary.
    pub fn promo() -> Self {
        Self::from_words(&[
            "sale",
            "discount",
            "off",
            "promo",
            "coupon",
            "clearance",
            "% off",
            "special offer",
        ])
    }

    pub fn from_words(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Substring containment per keyword against already lower-cased text.
    /// Returns the full matched subset so logs/alerts can carry evidence.
    pub fn matches(&self, text: &str) -> BTreeSet<String> {
        self.words
            .iter()
            .filter(|w| text.contains(w.as_str()))
            .cloned()
            .collect()
    }
}
