//! Text extraction from resume byte streams
//!
//! Extraction is best-effort: a malformed document degrades to an empty
//! string instead of failing the whole parse, since partial contact/skill
//! information is still useful downstream.

use log::warn;
use regex::Regex;
use std::io::{Cursor, Read};

/// Extract text from PDF bytes. Returns an empty string on malformed input.
pub fn extract_pdf(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF extraction failed, continuing with empty text: {}", e);
            String::new()
        }
    }
}

/// Extract text from DOCX bytes. Returns an empty string on malformed input.
///
/// A DOCX file is a ZIP container; the paragraph text lives in
/// `word/document.xml`. Paragraph ends become newlines, remaining markup is
/// stripped.
pub fn extract_docx(bytes: &[u8]) -> String {
    match docx_document_xml(bytes) {
        Ok(xml) => xml_to_text(&xml),
        Err(e) => {
            warn!("DOCX extraction failed, continuing with empty text: {}", e);
            String::new()
        }
    }
}

fn docx_document_xml(bytes: &[u8]) -> std::io::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

fn xml_to_text(xml: &str) -> String {
    let text = xml
        .replace("</w:p>", "\n")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    let tag_re = Regex::new(r"<[^>]*>").unwrap();
    let clean = tag_re.replace_all(&text, "");

    let lines: Vec<String> = clean
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}
