//! Resume parsing: byte stream in, structured candidate data out

use crate::error::{AutoApplyError, Result};
use crate::input::contact::ContactExtractor;
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor;
use crate::matching::classifier::SkillClassifier;
use crate::matching::taxonomy::SkillTaxonomy;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured data pulled from one uploaded resume. Immutable after parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub raw_text: String,
    pub skills: BTreeMap<String, Vec<String>>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct ResumeParser {
    classifier: SkillClassifier,
    contacts: ContactExtractor,
}

impl ResumeParser {
    pub fn new(taxonomy: &SkillTaxonomy) -> Result<Self> {
        Ok(Self {
            classifier: SkillClassifier::new(taxonomy)?,
            contacts: ContactExtractor::new(),
        })
    }

    /// Parse resume bytes, routing on the declared file name's extension.
    /// Unknown extensions are the only hard failure; malformed documents of
    /// a supported format degrade to empty text.
    pub fn parse(&self, bytes: &[u8], file_name: &str) -> Result<ParsedResume> {
        let text = match DocumentFormat::from_file_name(file_name) {
            DocumentFormat::Pdf => {
                info!("Extracting text from PDF resume: {}", file_name);
                text_extractor::extract_pdf(bytes)
            }
            DocumentFormat::Docx => {
                info!("Extracting text from DOCX resume: {}", file_name);
                text_extractor::extract_docx(bytes)
            }
            DocumentFormat::Unknown => {
                return Err(AutoApplyError::UnsupportedFormat(format!(
                    "Unsupported resume file type: {}",
                    file_name
                )));
            }
        };

        let skills = self.classifier.classify(&text);
        let email = self.contacts.extract_email(&text);
        let phone = self.contacts.extract_phone(&text);

        Ok(ParsedResume {
            raw_text: text,
            skills,
            email,
            phone,
        })
    }
}
