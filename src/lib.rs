//! Job autopilot library: resume parsing, skill matching, and best-effort
//! application form automation.

pub mod automation;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod providers;

pub use config::Config;
pub use error::{AutoApplyError, Result};
