//! Form input resolution
//!
//! The form has a free-text field and a URL field. A URL pasted into the
//! text field is treated as if it had been entered in the URL field.

/// Warning shown when neither field carries anything
pub const EMPTY_INPUT_MESSAGE: &str = "Please paste a job description or provide a job link.";
/// Warning shown when a URL was given but no text could be extracted from it
pub const EMPTY_FETCH_MESSAGE: &str = "Could not extract text from the provided link.";

/// What the user submitted, after trimming and URL detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostingInput {
    Text(String),
    Url(String),
    Empty,
}

/// True for `http://`, `https://` or `www.` prefixes
pub fn looks_like_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with("www.")
}

/// Decide which field to use
///
/// Free text wins over the URL field unless the text itself looks like a URL.
pub fn resolve_input(job_post: &str, job_url: &str) -> PostingInput {
    let mut text = job_post.trim();
    let mut url = job_url.trim();

    if !text.is_empty() && looks_like_url(text) {
        url = text;
        text = "";
    }

    if !text.is_empty() {
        PostingInput::Text(text.to_string())
    } else if !url.is_empty() {
        PostingInput::Url(url.to_string())
    } else {
        PostingInput::Empty
    }
}
