//! Application form filling and submission.
//!
//! One attempt walks navigate → wait for form → classify fields → fill →
//! submit → detect outcome. Every failure is contained within the attempt
//! and converted into an `ApplicationResult`; partially filled/skipped
//! field lists survive into the result.

use crate::automation::browser::BrowserDriver;
use crate::automation::form_fields::{FieldRole, FormFieldClassifier};
use crate::config::Config;
use crate::error::{AutoApplyError, Result};
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Candidate information used to fill application forms. Supplied by the
/// caller per run and never mutated during it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub resume_text: String,
    pub adapted_resume_text: String,
    pub cover_letter: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub current_company: Option<String>,
    pub linkedin_url: Option<String>,
}

impl CandidateProfile {
    /// Fixed role → profile field mapping used when filling classified
    /// fields. Roles handled by dedicated steps (resume upload, skills) or
    /// with no direct profile value return `None`.
    pub fn value_for(&self, role: FieldRole) -> Option<String> {
        match role {
            FieldRole::Name => Some(self.full_name.clone()),
            FieldRole::Email => Some(self.email.clone()),
            FieldRole::Phone => Some(self.phone.clone()),
            FieldRole::Location => Some(self.location.clone()),
            FieldRole::Experience => Some(self.experience_years.to_string()),
            FieldRole::CoverLetter => Some(self.cover_letter.clone()),
            FieldRole::Linkedin => self.linkedin_url.clone(),
            FieldRole::Resume | FieldRole::Skills => None,
        }
    }
}

/// Outcome of one application attempt. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResult {
    pub success: bool,
    pub job_id: String,
    pub job_title: String,
    pub timestamp: String,
    pub application_url: String,
    pub filled_fields: Vec<String>,
    pub skipped_fields: Vec<String>,
    pub error_message: Option<String>,
    pub notes: Option<String>,
}

const FILE_UPLOAD_SELECTOR: &str =
    r#"input[type="file"][accept*="pdf"], input[type="file"][accept*="doc"]"#;
const SKILL_FIELD_SELECTOR: &str = r#"input[name*="skill"], select[name*="skill"]"#;
const SUBMIT_CONTROL_SELECTOR: &str = r#"button[type="submit"], input[type="submit"], button:has-text("Submit"), button:has-text("Apply")"#;
const CONFIRMATION_KEYWORDS: [&str; 3] = ["confirm", "success", "thank"];

/// Drives a single application attempt against a browser backend.
pub struct FormFiller {
    classifier: FormFieldClassifier,
    form_timeout: Duration,
    confirmation_timeout: Duration,
}

impl FormFiller {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            classifier: FormFieldClassifier::new(&config.field_patterns)?,
            form_timeout: config.automation.form_timeout(),
            confirmation_timeout: config.automation.confirmation_timeout(),
        })
    }

    /// Fill and submit the application form at `job_url`. Never returns an
    /// error: any failure becomes a `success: false` result carrying the
    /// message and whatever fields were processed before it.
    pub async fn apply(
        &self,
        driver: &dyn BrowserDriver,
        job_url: &str,
        profile: &CandidateProfile,
    ) -> ApplicationResult {
        let mut filled = Vec::new();
        let mut skipped = Vec::new();

        match self
            .run_attempt(driver, job_url, profile, &mut filled, &mut skipped)
            .await
        {
            Ok(()) => {
                let notes = format!(
                    "Filled {} fields, skipped {} fields",
                    filled.len(),
                    skipped.len()
                );
                info!("Application to {} completed: {}", job_url, notes);
                ApplicationResult {
                    success: true,
                    job_id: "job_auto_detect".to_string(),
                    job_title: "Auto-detected Job".to_string(),
                    timestamp: Utc::now().to_rfc3339(),
                    application_url: job_url.to_string(),
                    filled_fields: filled,
                    skipped_fields: skipped,
                    error_message: None,
                    notes: Some(notes),
                }
            }
            Err(e) => {
                warn!("Application to {} failed: {}", job_url, e);
                ApplicationResult {
                    success: false,
                    job_id: "job_auto_detect".to_string(),
                    job_title: "Auto-detected Job".to_string(),
                    timestamp: Utc::now().to_rfc3339(),
                    application_url: job_url.to_string(),
                    filled_fields: filled,
                    skipped_fields: skipped,
                    error_message: Some(e.to_string()),
                    notes: None,
                }
            }
        }
    }

    async fn run_attempt(
        &self,
        driver: &dyn BrowserDriver,
        job_url: &str,
        profile: &CandidateProfile,
        filled: &mut Vec<String>,
        skipped: &mut Vec<String>,
    ) -> Result<()> {
        driver.navigate(job_url).await.map_err(|e| {
            AutoApplyError::Navigation(format!("failed to load {}: {}", job_url, e))
        })?;

        driver
            .wait_for_selector("form", self.form_timeout)
            .await
            .map_err(|e| AutoApplyError::Timeout(format!("no form appeared: {}", e)))?;

        let markup = driver.page_content().await?;
        let classification = self.classifier.classify(&markup);
        debug!("Detected {} field roles", classification.len());

        // Classified fields: try each candidate selector in order; the role
        // is filled on first success, skipped when the chain is exhausted.
        for (role, candidates) in &classification {
            let value = match profile.value_for(*role) {
                Some(v) if !v.is_empty() => v,
                _ => continue,
            };

            let mut succeeded = false;
            for selector in candidates {
                if driver.fill(selector, &value).await.is_ok() {
                    succeeded = true;
                    break;
                }
            }
            if succeeded {
                filled.push(role.as_str().to_string());
            } else {
                skipped.push(role.as_str().to_string());
            }
        }

        // Resume file inputs are detected but never auto-filled; staging a
        // file handle is a manual-intervention boundary.
        let uploads = driver.query_all(FILE_UPLOAD_SELECTOR).await?;
        if !uploads.is_empty() && !profile.resume_text.is_empty() {
            info!("Found {} resume upload field(s); leaving for manual upload", uploads.len());
            skipped.push("resume_upload".to_string());
        }

        // Skill inputs found by the broader pattern get a comma-joined list
        // when text-typed.
        let skill_fields = driver.query_all(SKILL_FIELD_SELECTOR).await?;
        if !skill_fields.is_empty() && !profile.skills.is_empty() {
            for field in skill_fields {
                let field_type = driver.get_attribute(field, "type").await?;
                if field_type.as_deref() == Some("text") {
                    if driver
                        .fill_element(field, &profile.skills.join(", "))
                        .await
                        .is_ok()
                    {
                        filled.push("skills".to_string());
                    }
                    break;
                }
            }
        }

        // Any leftover free-form textarea receives the cover letter; covers
        // the "additional info" fields the role table does not enumerate.
        let textareas = driver.query_all("textarea").await?;
        if let Some(first) = textareas.first() {
            if !profile.cover_letter.is_empty()
                && driver.fill_element(*first, &profile.cover_letter).await.is_ok()
            {
                filled.push("cover_letter_textarea".to_string());
            }
        }

        let submit_controls = driver.query_all(SUBMIT_CONTROL_SELECTOR).await?;
        match submit_controls.first() {
            Some(control) => {
                info!("Found {} submit control(s)", submit_controls.len());
                driver.click(*control).await?;

                // Absence of a confirmation redirect is not proof of failure;
                // assume success on timeout.
                if driver
                    .wait_for_url_contains(&CONFIRMATION_KEYWORDS, self.confirmation_timeout)
                    .await
                    .is_err()
                {
                    debug!("No confirmation URL observed; assuming success");
                }
            }
            None => {
                warn!("No submit control found on {}", job_url);
                filled.push("manual_submit_needed".to_string());
            }
        }

        Ok(())
    }
}
