//! Keyword-based skill classification over raw text

use crate::error::{AutoApplyError, Result};
use crate::matching::taxonomy::SkillTaxonomy;
use aho_corasick::AhoCorasick;
use std::collections::{BTreeMap, HashSet};

/// Classifies free text against a skill taxonomy.
///
/// A keyword counts as found if it appears anywhere in the text,
/// case-insensitively, as a substring. Deliberately recall-biased: "go"
/// inside an unrelated word still matches.
pub struct SkillClassifier {
    automaton: AhoCorasick,
    // pattern id → (category, keyword), in taxonomy order
    keywords: Vec<(String, String)>,
}

impl SkillClassifier {
    pub fn new(taxonomy: &SkillTaxonomy) -> Result<Self> {
        let mut keywords = Vec::new();
        for (category, category_keywords) in taxonomy.categories() {
            for keyword in category_keywords {
                keywords.push((category.to_string(), keyword.clone()));
            }
        }

        let patterns: Vec<&str> = keywords.iter().map(|(_, k)| k.as_str()).collect();
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| {
                AutoApplyError::Configuration(format!("failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            automaton,
            keywords,
        })
    }

    /// Returns category → matched keywords. Categories with no hits are
    /// dropped; keyword order within a category follows the taxonomy.
    pub fn classify(&self, text: &str) -> BTreeMap<String, Vec<String>> {
        let mut found: HashSet<usize> = HashSet::new();
        // Overlapping search so that a short keyword nested inside a longer
        // one (e.g. "go" within "golang") is still reported.
        for mat in self.automaton.find_overlapping_iter(text) {
            found.insert(mat.pattern().as_usize());
        }

        let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (id, (category, keyword)) in self.keywords.iter().enumerate() {
            if found.contains(&id) {
                by_category
                    .entry(category.clone())
                    .or_default()
                    .push(keyword.clone());
            }
        }
        by_category
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}
