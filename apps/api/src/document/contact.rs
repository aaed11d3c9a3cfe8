//! Contact details pulled from raw CV text with regular expressions.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const EMAIL_PATTERN: &str = r"([a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+)";
const PHONE_PATTERN: &str = r"((?:\+|00)[1-9][0-9 \-\(\)\.]{7,32})|(0\d{10})";

/// A first line with this many words or more is not taken as a name.
const MAX_NAME_WORDS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

pub fn extract_contact(text: &str) -> ContactDetails {
    ContactDetails {
        name: guess_name(text),
        email: email_regex().find(text).map(|m| m.as_str().to_string()),
        phone: phone_regex()
            .find(text)
            .map(|m| m.as_str().trim().to_string()),
    }
}

/// The first non-empty line, when it is short enough to plausibly be a name.
fn guess_name(text: &str) -> Option<String> {
    let first_line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    (first_line.split(' ').count() < MAX_NAME_WORDS).then(|| first_line.to_string())
}
