//! Compatibility scoring between a candidate's skills and job requirements

use crate::providers::JobPosting;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A job paired with its 0–100 compatibility score. Derived and ephemeral;
/// recomputed on every scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub job: JobPosting,
    pub match_score: f64,
}

/// Scores jobs against extracted candidate skills and filters/ranks them.
pub struct MatchScorer {
    min_match_score: f64,
}

impl MatchScorer {
    pub fn new(min_match_score: f64) -> Self {
        Self { min_match_score }
    }

    /// Percentage of the job's required skills found among the candidate's
    /// skills. A required skill matches when either string contains the
    /// other, case-insensitively. Empty requirements score 0.
    pub fn match_score(
        &self,
        skills_by_category: &BTreeMap<String, Vec<String>>,
        required_skills: &[String],
    ) -> f64 {
        if required_skills.is_empty() {
            return 0.0;
        }

        let candidate_skills: Vec<String> = skills_by_category
            .values()
            .flatten()
            .map(|s| s.to_lowercase())
            .collect();

        let mut matched = 0usize;
        for required in required_skills {
            let required = required.to_lowercase();
            if candidate_skills
                .iter()
                .any(|skill| required.contains(skill.as_str()) || skill.contains(&required))
            {
                matched += 1;
            }
        }

        let score = (matched as f64 / required_skills.len() as f64) * 100.0;
        score.min(100.0)
    }

    /// Keeps jobs scoring at or above the threshold, sorted descending by
    /// score. Ties preserve the input order.
    pub fn filter_and_rank(
        &self,
        jobs: Vec<JobPosting>,
        skills_by_category: &BTreeMap<String, Vec<String>>,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = jobs
            .into_iter()
            .map(|job| {
                let match_score = self.match_score(skills_by_category, &job.required_skills);
                MatchResult { job, match_score }
            })
            .filter(|r| r.match_score >= self.min_match_score)
            .collect();

        // Vec::sort_by is stable, so equal scores keep their relative order
        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }

    pub fn min_match_score(&self) -> f64 {
        self.min_match_score
    }
}
