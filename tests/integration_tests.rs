//! Integration tests driving the full pipeline against a scripted browser

use async_trait::async_trait;
use job_autopilot::automation::applier::{CandidateProfile, FormFiller};
use job_autopilot::automation::batch::BatchRunner;
use job_autopilot::automation::browser::{BrowserDriver, ElementHandle};
use job_autopilot::error::{AutoApplyError, Result};
use job_autopilot::input::parser::ResumeParser;
use job_autopilot::matching::scorer::MatchScorer;
use job_autopilot::matching::taxonomy::SkillTaxonomy;
use job_autopilot::providers::JobPosting;
use job_autopilot::Config;
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Write};
use std::sync::Mutex;
use std::time::Duration;

// Selector strings the applier issues against the driver.
const FILE_UPLOAD_SELECTOR: &str =
    r#"input[type="file"][accept*="pdf"], input[type="file"][accept*="doc"]"#;
const SKILL_FIELD_SELECTOR: &str = r#"input[name*="skill"], select[name*="skill"]"#;
const SUBMIT_CONTROL_SELECTOR: &str = r#"button[type="submit"], input[type="submit"], button:has-text("Submit"), button:has-text("Apply")"#;

/// Scripted behavior for one URL.
#[derive(Default, Clone)]
struct PageScript {
    markup: String,
    fail_navigation: bool,
    has_form: bool,
    fillable: HashSet<String>,
    elements: HashMap<String, Vec<u64>>,
    attributes: HashMap<u64, HashMap<String, String>>,
    confirmation_redirect: bool,
}

impl PageScript {
    fn form(markup: &str) -> Self {
        Self {
            markup: markup.to_string(),
            has_form: true,
            confirmation_redirect: true,
            ..Self::default()
        }
    }

    fn fillable(mut self, selectors: &[&str]) -> Self {
        self.fillable = selectors.iter().map(|s| s.to_string()).collect();
        self
    }

    fn elements(mut self, selector: &str, handles: &[u64]) -> Self {
        self.elements.insert(selector.to_string(), handles.to_vec());
        self
    }

    fn attribute(mut self, handle: u64, name: &str, value: &str) -> Self {
        self.attributes
            .entry(handle)
            .or_default()
            .insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Default)]
struct DriverState {
    current: Option<String>,
    fills: Vec<(String, String)>,
    element_fills: Vec<(u64, String)>,
    clicks: Vec<u64>,
}

/// In-memory fake implementing the browser capability interface.
struct FakeBrowser {
    pages: HashMap<String, PageScript>,
    state: Mutex<DriverState>,
}

impl FakeBrowser {
    fn new(pages: Vec<(&str, PageScript)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(url, script)| (url.to_string(), script))
                .collect(),
            state: Mutex::new(DriverState::default()),
        }
    }

    fn current_script(&self) -> Result<PageScript> {
        let state = self.state.lock().unwrap();
        let url = state
            .current
            .as_ref()
            .ok_or_else(|| AutoApplyError::Browser("no page loaded".to_string()))?;
        Ok(self.pages[url].clone())
    }

    fn element_fills(&self) -> Vec<(u64, String)> {
        self.state.lock().unwrap().element_fills.clone()
    }

    fn clicks(&self) -> Vec<u64> {
        self.state.lock().unwrap().clicks.clone()
    }
}

#[async_trait]
impl BrowserDriver for FakeBrowser {
    async fn navigate(&self, url: &str) -> Result<()> {
        let script = self
            .pages
            .get(url)
            .ok_or_else(|| AutoApplyError::Navigation(format!("unknown url {}", url)))?;
        if script.fail_navigation {
            return Err(AutoApplyError::Navigation("connection refused".to_string()));
        }
        self.state.lock().unwrap().current = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        let script = self.current_script()?;
        if selector == "form" && script.has_form {
            Ok(())
        } else if script.elements.contains_key(selector) {
            Ok(())
        } else {
            Err(AutoApplyError::Timeout(format!(
                "selector {} never appeared",
                selector
            )))
        }
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let script = self.current_script()?;
        if script.fillable.contains(selector) {
            self.state
                .lock()
                .unwrap()
                .fills
                .push((selector.to_string(), value.to_string()));
            Ok(())
        } else {
            Err(AutoApplyError::Browser(format!(
                "no fillable element for {}",
                selector
            )))
        }
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>> {
        let script = self.current_script()?;
        Ok(script
            .elements
            .get(selector)
            .map(|ids| ids.iter().map(|id| ElementHandle(*id)).collect())
            .unwrap_or_default())
    }

    async fn fill_element(&self, element: ElementHandle, value: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .element_fills
            .push((element.0, value.to_string()));
        Ok(())
    }

    async fn click(&self, element: ElementHandle) -> Result<()> {
        self.state.lock().unwrap().clicks.push(element.0);
        Ok(())
    }

    async fn get_attribute(&self, element: ElementHandle, name: &str) -> Result<Option<String>> {
        let script = self.current_script()?;
        Ok(script
            .attributes
            .get(&element.0)
            .and_then(|attrs| attrs.get(name))
            .cloned())
    }

    async fn page_content(&self) -> Result<String> {
        Ok(self.current_script()?.markup)
    }

    async fn wait_for_url_contains(&self, _keywords: &[&str], _timeout: Duration) -> Result<()> {
        let script = self.current_script()?;
        if script.confirmation_redirect {
            Ok(())
        } else {
            Err(AutoApplyError::Timeout("no matching url".to_string()))
        }
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn profile() -> CandidateProfile {
    CandidateProfile {
        full_name: "Jane Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        phone: "555-123-4567".to_string(),
        location: "Berlin".to_string(),
        resume_text: "Jane Doe, engineer".to_string(),
        adapted_resume_text: String::new(),
        cover_letter: "Dear hiring team".to_string(),
        skills: vec!["python".to_string(), "sql".to_string()],
        experience_years: 7,
        current_company: None,
        linkedin_url: Some("https://linkedin.com/in/janedoe".to_string()),
    }
}

fn fast_config() -> Config {
    let mut config = Config::default();
    config.automation.inter_application_delay_ms = 0;
    config
}

fn job(id: &str, url: &str) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: format!("Engineer {}", id),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        required_skills: vec!["python".to_string()],
        description: String::new(),
        url: url.to_string(),
    }
}

#[tokio::test]
async fn successful_application_fills_detected_fields() {
    init_logging();
    let markup = r#"<form>
        <input name="full_name"><input name="email"><input name="phone">
    </form>"#;
    let page = PageScript::form(markup)
        .fillable(&[
            r#"[name*="full_name"]"#,
            r#"[name*="email"]"#,
            r#"[name*="phone"]"#,
        ])
        .elements("textarea", &[10])
        .elements(SUBMIT_CONTROL_SELECTOR, &[20]);

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/1", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/1", &profile())
        .await;

    assert!(result.success);
    assert!(result.error_message.is_none());
    for role in ["name", "email", "phone", "cover_letter_textarea"] {
        assert!(result.filled_fields.contains(&role.to_string()), "{}", role);
    }
    assert!(result.skipped_fields.is_empty());
    assert_eq!(browser.clicks(), vec![20]);
    // the lone textarea received the cover letter
    assert_eq!(
        browser.element_fills(),
        vec![(10, "Dear hiring team".to_string())]
    );
}

#[tokio::test]
async fn candidate_selectors_fall_back_in_order() {
    // "email" hits on both name= and id=, "email_address" on id= only;
    // only the last candidate is actually fillable
    let markup = r#"<form><input name="email" id="email_address"></form>"#;
    let page = PageScript::form(markup)
        .fillable(&["#email_address"])
        .elements(SUBMIT_CONTROL_SELECTOR, &[1]);

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/2", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/2", &profile())
        .await;

    assert!(result.success);
    assert!(result.filled_fields.contains(&"email".to_string()));
    assert!(!result.skipped_fields.contains(&"email".to_string()));
}

#[tokio::test]
async fn unfillable_role_is_skipped_not_failed() {
    let markup = r#"<form><input name="phone"></form>"#;
    // nothing fillable: the phone candidate chain exhausts
    let page = PageScript::form(markup).elements(SUBMIT_CONTROL_SELECTOR, &[1]);

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/3", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/3", &profile())
        .await;

    assert!(result.success);
    assert!(result.skipped_fields.contains(&"phone".to_string()));
    assert!(!result.filled_fields.contains(&"phone".to_string()));
}

#[tokio::test]
async fn resume_uploads_are_detected_but_left_manual() {
    let markup = r#"<form><input type="file" accept="application/pdf" name="cv"></form>"#;
    let page = PageScript::form(markup)
        .elements(FILE_UPLOAD_SELECTOR, &[30])
        .elements(SUBMIT_CONTROL_SELECTOR, &[1]);

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/4", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/4", &profile())
        .await;

    assert!(result.success);
    assert!(result.skipped_fields.contains(&"resume_upload".to_string()));
}

#[tokio::test]
async fn text_typed_skill_inputs_get_joined_skill_list() {
    let markup = r#"<form><input name="skills" type="text"></form>"#;
    let page = PageScript::form(markup)
        .elements(SKILL_FIELD_SELECTOR, &[40])
        .attribute(40, "type", "text")
        .elements(SUBMIT_CONTROL_SELECTOR, &[1]);

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/5", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/5", &profile())
        .await;

    assert!(result.success);
    assert!(result.filled_fields.contains(&"skills".to_string()));
    assert!(browser
        .element_fills()
        .contains(&(40, "python, sql".to_string())));
}

#[tokio::test]
async fn missing_submit_control_still_reports_success() {
    let markup = r#"<form><input name="email"></form>"#;
    let page = PageScript::form(markup).fillable(&[r#"[name*="email"]"#]);

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/6", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/6", &profile())
        .await;

    assert!(result.success);
    assert!(result
        .filled_fields
        .contains(&"manual_submit_needed".to_string()));
    assert!(browser.clicks().is_empty());
}

#[tokio::test]
async fn missing_confirmation_redirect_assumes_success() {
    let markup = r#"<form><input name="email"></form>"#;
    let mut page = PageScript::form(markup)
        .fillable(&[r#"[name*="email"]"#])
        .elements(SUBMIT_CONTROL_SELECTOR, &[1]);
    page.confirmation_redirect = false;

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/7", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/7", &profile())
        .await;

    assert!(result.success);
    assert_eq!(browser.clicks(), vec![1]);
}

#[tokio::test]
async fn navigation_failure_produces_failed_result() {
    let mut page = PageScript::form("<form></form>");
    page.fail_navigation = true;

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/down", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/down", &profile())
        .await;

    assert!(!result.success);
    assert!(result.error_message.is_some());
    assert!(result.filled_fields.is_empty());
}

#[tokio::test]
async fn form_timeout_produces_failed_result() {
    let mut page = PageScript::form("<p>no form here</p>");
    page.has_form = false;

    let browser = FakeBrowser::new(vec![("https://jobs.example.com/slow", page)]);
    let filler = FormFiller::new(&fast_config()).unwrap();

    let result = filler
        .apply(&browser, "https://jobs.example.com/slow", &profile())
        .await;

    assert!(!result.success);
    assert!(result.error_message.unwrap().contains("no form appeared"));
}

#[tokio::test]
async fn batch_failure_does_not_abort_remaining_jobs() {
    init_logging();
    let good = PageScript::form(r#"<form><input name="email"></form>"#)
        .fillable(&[r#"[name*="email"]"#])
        .elements(SUBMIT_CONTROL_SELECTOR, &[1]);
    let mut bad = PageScript::form("<form></form>");
    bad.fail_navigation = true;

    let browser = FakeBrowser::new(vec![
        ("https://jobs.example.com/a", good.clone()),
        ("https://jobs.example.com/b", bad),
        ("https://jobs.example.com/c", good),
    ]);

    let mut runner = BatchRunner::new(&fast_config()).unwrap();
    let urls: Vec<String> = ["a", "b", "c"]
        .iter()
        .map(|p| format!("https://jobs.example.com/{}", p))
        .collect();

    let results = runner.apply_batch(&browser, &urls, &profile()).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[2].success);

    let stats = runner.statistics();
    assert_eq!(stats.total_applications, 3);
    assert_eq!(stats.successful + stats.failed, stats.total_applications);
    assert!((stats.success_rate - 2.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn batch_returns_one_result_per_url_even_when_all_fail() {
    let mut bad = PageScript::form("<form></form>");
    bad.fail_navigation = true;

    let browser = FakeBrowser::new(vec![
        ("https://jobs.example.com/x", bad.clone()),
        ("https://jobs.example.com/y", bad),
    ]);

    let mut runner = BatchRunner::new(&fast_config()).unwrap();
    let urls = vec![
        "https://jobs.example.com/x".to_string(),
        "https://jobs.example.com/y".to_string(),
    ];

    let results = runner.apply_batch(&browser, &urls, &profile()).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| !r.success));

    let stats = runner.statistics();
    assert_eq!(stats.total_applications, 2);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.success_rate, 0.0);
}

#[tokio::test]
async fn record_only_mode_produces_records_in_input_order() {
    let jobs: Vec<JobPosting> = (0..4)
        .map(|i| {
            job(
                &format!("job-{}", i),
                &format!("https://jobs.example.com/{}", i),
            )
        })
        .collect();

    let mut runner = BatchRunner::new(&fast_config()).unwrap();
    let results = runner.record_applications(&jobs, &profile()).await;

    assert_eq!(results.len(), 4);
    for (i, result) in results.iter().enumerate() {
        assert!(result.success);
        assert_eq!(result.job_id, format!("job-{}", i));
        assert!(result.filled_fields.is_empty());
    }

    let stats = runner.statistics();
    assert_eq!(stats.total_applications, 4);
    assert_eq!(stats.successful, 4);
}

#[tokio::test]
async fn docx_resume_flows_through_matching_pipeline() {
    // Minimal DOCX: a ZIP container holding word/document.xml
    let document_xml = "<w:document><w:body>\
        <w:p><w:r><w:t>Jane Doe - jane.doe@example.com - (555) 123-4567</w:t></w:r></w:p>\
        <w:p><w:r><w:t>Skills: Python, SQL, Docker</w:t></w:r></w:p>\
        </w:body></w:document>";
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let taxonomy = SkillTaxonomy::default();
    let parser = ResumeParser::new(&taxonomy).unwrap();
    let resume = parser.parse(&bytes, "jane_doe.docx").unwrap();

    assert_eq!(resume.email.as_deref(), Some("jane.doe@example.com"));
    assert_eq!(resume.phone.as_deref(), Some("(555) 123-4567"));
    assert_eq!(resume.skills["programming"], ["python"]);

    let scorer = MatchScorer::new(60.0);
    let jobs = vec![
        job("match", "https://jobs.example.com/match"),
        JobPosting {
            required_skills: vec!["haskell".to_string(), "prolog".to_string()],
            ..job("mismatch", "https://jobs.example.com/mismatch")
        },
    ];

    let ranked = scorer.filter_and_rank(jobs, &resume.skills);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].job.id, "match");
    assert_eq!(ranked[0].match_score, 100.0);
}
