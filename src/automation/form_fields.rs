//! Heuristic classification of form fields in serialized page markup.
//!
//! No DOM is parsed: the classifier pattern-matches `name=`/`id=` attribute
//! occurrences against a fixed role → keyword table. Target sites are
//! arbitrary and unknown in advance, so over- and under-detection are
//! accepted; every hit only produces a *candidate* selector to try.

use crate::error::{AutoApplyError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic form-field category, independent of any site's actual markup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    Name,
    Email,
    Phone,
    Location,
    Experience,
    Resume,
    CoverLetter,
    Skills,
    Linkedin,
}

impl FieldRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Name => "name",
            FieldRole::Email => "email",
            FieldRole::Phone => "phone",
            FieldRole::Location => "location",
            FieldRole::Experience => "experience",
            FieldRole::Resume => "resume",
            FieldRole::CoverLetter => "cover_letter",
            FieldRole::Skills => "skills",
            FieldRole::Linkedin => "linkedin",
        }
    }
}

/// Keyword patterns recognized for one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPattern {
    pub role: FieldRole,
    pub keywords: Vec<String>,
}

/// The full role → keyword table, carried in the config so deployments can
/// extend it without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPatternTable {
    pub patterns: Vec<FieldPattern>,
}

impl Default for FieldPatternTable {
    fn default() -> Self {
        let table: [(FieldRole, &[&str]); 9] = [
            (
                FieldRole::Name,
                &["fullname", "full_name", "fname", "name", "first_name", "applicant_name"],
            ),
            (
                FieldRole::Email,
                &["email", "email_address", "work_email", "personal_email"],
            ),
            (
                FieldRole::Phone,
                &["phone", "phone_number", "mobile", "contact_phone", "telephone"],
            ),
            (
                FieldRole::Location,
                &["location", "city", "residence", "current_location", "address"],
            ),
            (
                FieldRole::Experience,
                &["years_experience", "experience", "years", "total_experience"],
            ),
            (
                FieldRole::Resume,
                &["resume", "cv", "document", "resume_file", "attachment"],
            ),
            (
                FieldRole::CoverLetter,
                &["cover_letter", "cover_letter_text", "message", "additional_info", "comments"],
            ),
            (
                FieldRole::Skills,
                &["skills", "technical_skills", "expertise", "competencies"],
            ),
            (
                FieldRole::Linkedin,
                &["linkedin", "linkedin_profile", "linkedin_url", "profile_url"],
            ),
        ];

        let patterns = table
            .iter()
            .map(|(role, keywords)| FieldPattern {
                role: *role,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();

        Self { patterns }
    }
}

/// Role → ordered candidate selectors found on one page. Rebuilt per page,
/// never cached across pages.
pub type FieldClassification = BTreeMap<FieldRole, Vec<String>>;

struct CompiledKeyword {
    keyword: String,
    name_re: Regex,
    id_re: Regex,
}

pub struct FormFieldClassifier {
    rules: Vec<(FieldRole, Vec<CompiledKeyword>)>,
}

impl FormFieldClassifier {
    pub fn new(table: &FieldPatternTable) -> Result<Self> {
        let mut rules = Vec::new();
        for pattern in &table.patterns {
            let mut compiled = Vec::new();
            for keyword in &pattern.keywords {
                let escaped = regex::escape(keyword);
                let name_re = Regex::new(&format!(r#"(?i)name=["']?{}"#, escaped));
                let id_re = Regex::new(&format!(r#"(?i)id=["']?{}"#, escaped));
                match (name_re, id_re) {
                    (Ok(name_re), Ok(id_re)) => compiled.push(CompiledKeyword {
                        keyword: keyword.clone(),
                        name_re,
                        id_re,
                    }),
                    (Err(e), _) | (_, Err(e)) => {
                        return Err(AutoApplyError::Configuration(format!(
                            "invalid field pattern '{}': {}",
                            keyword, e
                        )));
                    }
                }
            }
            rules.push((pattern.role, compiled));
        }
        Ok(Self { rules })
    }

    /// Scan serialized markup for attribute values matching the role table.
    /// Roles with no hits are absent from the result; candidate order within
    /// a role follows the pattern table.
    pub fn classify(&self, markup: &str) -> FieldClassification {
        let mut detected: FieldClassification = BTreeMap::new();
        for (role, keywords) in &self.rules {
            for compiled in keywords {
                if compiled.name_re.is_match(markup) {
                    detected
                        .entry(*role)
                        .or_default()
                        .push(format!("[name*=\"{}\"]", compiled.keyword));
                }
                if compiled.id_re.is_match(markup) {
                    detected
                        .entry(*role)
                        .or_default()
                        .push(format!("#{}", compiled.keyword));
                }
            }
        }
        detected
    }
}
