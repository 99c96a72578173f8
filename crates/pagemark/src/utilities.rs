//! Helpers for page generation around the conversion pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{PagemarkError, Result};

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s(.*)").expect("valid title regex"));

/// Extract the page title from the level-1 heading that opens the document.
///
/// Surrounding whitespace of the whole document is ignored. The heading marker
/// is a single `#` followed by one whitespace character; the rest of that line
/// is returned as written. Anything else fails with [`PagemarkError::NoTitle`].
pub fn extract_title(markdown: &str) -> Result<String> {
    TITLE_RE
        .captures(markdown.trim())
        .and_then(|caps| caps.get(1))
        .map(|title| title.as_str().to_string())
        .ok_or(PagemarkError::NoTitle)
}
