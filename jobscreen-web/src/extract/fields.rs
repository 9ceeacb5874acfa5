//! Display field extraction
//!
//! Regex scan of the posting text for a handful of fields shown next to
//! the verdict. Absence of a match yields an empty value, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Maximum unique emails kept
pub const MAX_EMAILS: usize = 3;
/// Maximum unique phone numbers kept
pub const MAX_PHONES: usize = 3;
/// Maximum unique links kept
pub const MAX_LINKS: usize = 5;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\n)\s*(?:title|job title)[:\-]\s*(.+)").expect("valid title regex")
});

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\n)\s*location[:\-]\s*(.+)").expect("valid location regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
        .expect("valid phone regex")
});

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid link regex"));

/// Fields pulled out of a posting for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    /// Text after a leading "Title:" / "Job title:" label
    pub title: String,
    /// Text after a leading "Location:" label
    pub location: String,
    /// Unique email addresses, at most [`MAX_EMAILS`]
    pub emails: Vec<String>,
    /// Unique phone numbers, at most [`MAX_PHONES`]
    pub phones: Vec<String>,
    /// Unique http(s):// or www. links, at most [`MAX_LINKS`]
    pub links: Vec<String>,
    /// Whitespace-delimited token count
    pub length: usize,
}

/// Scan `text` for display fields
pub fn extract_fields(text: &str) -> ExtractedFields {
    ExtractedFields {
        title: first_capture(&TITLE_RE, text),
        location: first_capture(&LOCATION_RE, text),
        emails: unique_matches(&EMAIL_RE, text, MAX_EMAILS),
        phones: unique_matches(&PHONE_RE, text, MAX_PHONES),
        links: unique_matches(&LINK_RE, text, MAX_LINKS),
        length: text.split_whitespace().count(),
    }
}

fn first_capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// All matches, deduplicated in first-seen order, then truncated to `limit`
fn unique_matches(re: &Regex, text: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    re.find_iter(text)
        .map(|m| m.as_str())
        .filter(|s| seen.insert(*s))
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_defaults() {
        let fields = extract_fields("");
        assert_eq!(fields, ExtractedFields::default());
        assert_eq!(fields.length, 0);
    }

    #[test]
    fn test_title_location_and_dedup_email() {
        let text = "Title: Data Analyst\nLocation: Remote\nContact: a@b.com, a@b.com";
        let fields = extract_fields(text);

        assert_eq!(fields.title, "Data Analyst");
        assert_eq!(fields.location, "Remote");
        assert_eq!(fields.emails, vec!["a@b.com".to_string()]);
        assert_eq!(fields.length, 8);
    }

    #[test]
    fn test_job_title_label_and_dash_separator() {
        let fields = extract_fields("Acme Corp\n  JOB TITLE- Senior Engineer  \nlocation:Berlin");
        assert_eq!(fields.title, "Senior Engineer");
        assert_eq!(fields.location, "Berlin");
    }

    #[test]
    fn test_first_title_wins() {
        let fields = extract_fields("Title: First\nTitle: Second");
        assert_eq!(fields.title, "First");
    }

    #[test]
    fn test_label_must_start_line() {
        let fields = extract_fields("The title: is not at line start");
        assert_eq!(fields.title, "");
    }

    #[test]
    fn test_ten_duplicate_emails_yield_one() {
        let text = vec!["hr@example.com"; 10].join(" ");
        let fields = extract_fields(&text);
        assert_eq!(fields.emails, vec!["hr@example.com".to_string()]);
    }

    #[test]
    fn test_emails_truncated_after_dedup() {
        let text = "a@x.io a@x.io b@x.io c@x.io d@x.io e@x.io";
        let fields = extract_fields(text);
        assert_eq!(fields.emails, vec!["a@x.io", "b@x.io", "c@x.io"]);
    }

    #[test]
    fn test_phone_formats() {
        let text = "Call (555) 123-4567 or +1 555.987.6543 or 5551112222. Again (555) 123-4567";
        let fields = extract_fields(text);
        assert_eq!(fields.phones.len(), 3);
        assert!(fields.phones.contains(&"(555) 123-4567".to_string()));
        assert!(fields.phones.iter().any(|p| p.contains("555.987.6543")));
        assert!(fields.phones.contains(&"5551112222".to_string()));
    }

    #[test]
    fn test_links_dedup_and_limit() {
        let text = "https://a.com https://a.com http://b.com www.c.com https://d.com https://e.com https://f.com";
        let fields = extract_fields(text);
        assert_eq!(
            fields.links,
            vec!["https://a.com", "http://b.com", "www.c.com", "https://d.com", "https://e.com"]
        );
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        let fields = extract_fields("  one\ttwo \n\n three  ");
        assert_eq!(fields.length, 3);
    }
}
