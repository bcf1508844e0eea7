//! Resume document handling
//! Format detection, text extraction, and contact/skill parsing

pub mod contact;
pub mod file_detector;
pub mod parser;
pub mod text_extractor;
