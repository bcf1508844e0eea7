//! Contact detail extraction via pattern matching

use regex::Regex;

/// Pulls the first plausible email address and phone number out of resume
/// text. Syntactic plausibility only; nothing is validated beyond shape.
pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        // Optional country code, optional (possibly parenthesized) area code,
        // separators tolerated between groups.
        let phone_regex =
            Regex::new(r"(?:\+?1[-. ]?)?(?:\(?[0-9]{3}\)?[-. ]?)?[0-9]{3}[-. ]?[0-9]{4}\b")
                .expect("Invalid phone regex");

        Self {
            email_regex,
            phone_regex,
        }
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regex.find(text).map(|m| m.as_str().to_string())
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}
