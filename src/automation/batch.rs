//! Batch orchestration over many job applications.
//!
//! Two modes with genuinely different concurrency semantics:
//! record-only mode launches all per-job bookkeeping together (no shared
//! browser), while real automation runs strictly sequentially because one
//! page context is reused across the whole batch.

use crate::automation::applier::{ApplicationResult, CandidateProfile, FormFiller};
use crate::automation::browser::BrowserDriver;
use crate::config::Config;
use crate::error::Result;
use crate::providers::JobPosting;
use chrono::Utc;
use futures::future::join_all;
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Append-only log of attempted applications plus running counters.
#[derive(Debug, Default)]
pub struct ApplicationLog {
    results: Vec<ApplicationResult>,
    successful: usize,
    failed: usize,
}

impl ApplicationLog {
    pub fn record(&mut self, result: &ApplicationResult) {
        if result.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result.clone());
    }

    pub fn results(&self) -> &[ApplicationResult] {
        &self.results
    }

    /// Derive statistics over everything recorded so far. `recent_window`
    /// bounds the trailing slice of results, most recent last.
    pub fn statistics(&self, recent_window: usize) -> ApplicationStatistics {
        let total = self.results.len();
        let start = total.saturating_sub(recent_window);
        ApplicationStatistics {
            total_applications: total,
            successful: self.successful,
            failed: self.failed,
            success_rate: self.successful as f64 / std::cmp::max(1, total) as f64,
            recent_applications: self.results[start..].to_vec(),
        }
    }
}

/// Point-in-time snapshot derived from the application log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationStatistics {
    pub total_applications: usize,
    pub successful: usize,
    pub failed: usize,
    pub success_rate: f64,
    pub recent_applications: Vec<ApplicationResult>,
}

/// Sequences applications across a batch of jobs, feeding one shared log.
pub struct BatchRunner {
    filler: FormFiller,
    inter_application_delay: Duration,
    recent_window: usize,
    log: ApplicationLog,
}

impl BatchRunner {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            filler: FormFiller::new(config)?,
            inter_application_delay: config.automation.inter_application_delay(),
            recent_window: config.automation.recent_window,
            log: ApplicationLog::default(),
        })
    }

    /// Record-only mode: one bookkeeping record per already-selected job,
    /// without any form automation. All records are produced together and
    /// collected once complete; there is no shared mutable resource to
    /// serialize on. Results come back in input order.
    pub async fn record_applications(
        &mut self,
        jobs: &[JobPosting],
        _profile: &CandidateProfile,
    ) -> Vec<ApplicationResult> {
        let records = join_all(jobs.iter().map(make_record)).await;
        for record in &records {
            self.log.record(record);
        }
        info!("Recorded {} applications without automation", records.len());
        records
    }

    /// Real automation mode: one attempt at a time on the shared browser
    /// page, with a fixed pause after every attempt to avoid hammering
    /// target sites. A failed attempt never aborts the batch; exactly one
    /// result is returned per input URL.
    pub async fn apply_batch(
        &mut self,
        driver: &dyn BrowserDriver,
        job_urls: &[String],
        profile: &CandidateProfile,
    ) -> Vec<ApplicationResult> {
        let mut results = Vec::with_capacity(job_urls.len());
        for (i, job_url) in job_urls.iter().enumerate() {
            info!("Processing job {}/{}: {}", i + 1, job_urls.len(), job_url);

            let result = self.filler.apply(driver, job_url, profile).await;
            self.log.record(&result);
            results.push(result);

            tokio::time::sleep(self.inter_application_delay).await;
        }
        results
    }

    pub fn statistics(&self) -> ApplicationStatistics {
        self.log.statistics(self.recent_window)
    }

    pub fn log(&self) -> &ApplicationLog {
        &self.log
    }
}

async fn make_record(job: &JobPosting) -> ApplicationResult {
    ApplicationResult {
        success: true,
        job_id: job.id.clone(),
        job_title: job.title.clone(),
        timestamp: Utc::now().to_rfc3339(),
        application_url: job.url.clone(),
        filled_fields: Vec::new(),
        skipped_fields: Vec::new(),
        error_message: None,
        notes: Some("recorded without form automation".to_string()),
    }
}
