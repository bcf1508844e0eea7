//! Skill taxonomy: fixed category → keyword mapping

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorized skill keyword table. Immutable at runtime; deployments that
/// need a different lexicon supply their own table through the config.
///
/// Keywords are stored lowercase; matching against text is case-insensitive
/// substring containment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    categories: BTreeMap<String, Vec<String>>,
}

impl SkillTaxonomy {
    pub fn from_categories(categories: BTreeMap<String, Vec<String>>) -> Self {
        let categories = categories
            .into_iter()
            .map(|(name, keywords)| {
                let keywords = keywords.into_iter().map(|k| k.to_lowercase()).collect();
                (name, keywords)
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }

    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(|k| k.as_slice())
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.values().map(|k| k.len()).sum()
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        let table: [(&str, &[&str]); 6] = [
            (
                "programming",
                &[
                    "python",
                    "java",
                    "c++",
                    "javascript",
                    "typescript",
                    "go",
                    "rust",
                    "csharp",
                    "php",
                    "ruby",
                ],
            ),
            (
                "frameworks",
                &[
                    "react", "angular", "vue", "django", "flask", "fastapi", "spring", "rails",
                    "asp.net",
                ],
            ),
            (
                "databases",
                &[
                    "sql",
                    "mysql",
                    "postgresql",
                    "mongodb",
                    "redis",
                    "cassandra",
                    "elasticsearch",
                ],
            ),
            (
                "cloud",
                &[
                    "aws",
                    "azure",
                    "gcp",
                    "docker",
                    "kubernetes",
                    "heroku",
                    "firebase",
                ],
            ),
            (
                "tools",
                &["git", "jenkins", "gitlab", "github", "jira", "figma", "notion"],
            ),
            (
                "other",
                &[
                    "machine learning",
                    "ai",
                    "blockchain",
                    "api",
                    "rest",
                    "graphql",
                    "microservices",
                ],
            ),
        ];

        let categories = table
            .iter()
            .map(|(name, keywords)| {
                (
                    name.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect();

        Self { categories }
    }
}
