//! Interfaces for external collaborators consumed as opaque services:
//! the job-listing source and the text-transformation (resume rewriting /
//! cover letter) backend. The core never depends on a concrete transport.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A job posting as supplied by the job source. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub description: String,
    pub url: String,
}

/// Search parameters for the job source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobQuery {
    pub title: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub max_age_days: u32,
    pub limit: usize,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            title: None,
            location: None,
            job_type: None,
            max_age_days: 30,
            limit: 20,
        }
    }
}

/// Job-listing source. Implementations wrap whatever HTTP API backs them;
/// callers treat transport failures as "no jobs" rather than crashing.
#[async_trait]
pub trait JobProvider: Send + Sync {
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>>;
}

/// Opaque text-transformation service (resume rewriting, cover letter
/// generation). Only the produced text is observable.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32, timeout: Duration)
        -> Result<String>;
}
