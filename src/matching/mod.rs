//! Skill taxonomy, classification, and job match scoring

pub mod classifier;
pub mod scorer;
pub mod taxonomy;
