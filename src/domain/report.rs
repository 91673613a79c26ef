use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Evidence handed to a notifier when a cycle detects a promotion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountReport {
    pub url: String,
    pub matched_keywords: BTreeSet<String>,
    /// Wall-clock detection time, local, `YYYY-MM-DD HH:MM:SS`.
    pub detected_at: String,
}

impl DiscountReport {
    pub fn keywords_joined(&self) -> String {
        self.matched_keywords
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}
