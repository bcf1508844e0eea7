//! Form field classification, application filling, and batch orchestration

pub mod applier;
pub mod batch;
pub mod browser;
pub mod form_fields;
