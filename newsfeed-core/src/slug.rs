//! URL slugs for articles.
//!
//! A slug is `{normalized-title}-{post_id}`. The identifier is always the
//! segment after the last hyphen, so titles ending in numbers ("Top 10") are
//! still resolved by their trailing id.

use crate::error::ArticleError;
use std::fmt::Display;

/// Croatian letters and their ASCII spellings. Everything else passes through
/// to the lowercase/strip stage unchanged.
fn transliterate(c: char) -> Option<&'static str> {
    match c {
        'č' | 'ć' => Some("c"),
        'ž' => Some("z"),
        'đ' => Some("dj"),
        'š' => Some("s"),
        'Č' | 'Ć' => Some("C"),
        'Ž' => Some("Z"),
        'Đ' => Some("Dj"),
        'Š' => Some("S"),
        _ => None,
    }
}

/// Convert a title into the URL-safe part of a slug.
///
/// Output only contains `[a-z0-9-]`, never starts or ends with a hyphen and
/// never contains `--`. Empty or all-punctuation titles give an empty string.
pub fn normalize_title(title: &str) -> String {
    let mut ascii = String::with_capacity(title.len());
    for c in title.chars() {
        match transliterate(c) {
            Some(s) => ascii.push_str(s),
            None => ascii.push(c),
        }
    }

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;
    for c in ascii.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
        // anything else is dropped without acting as a separator
    }
    slug
}

/// Build the full slug for an article. The id is rendered verbatim.
pub fn build_slug(title: &str, id: impl Display) -> String {
    format!("{}-{}", normalize_title(title), id)
}

/// Return the identifier segment of a slug (the text after the last hyphen).
pub fn extract_id(slug: &str) -> Result<&str, ArticleError> {
    let candidate = match slug.rfind('-') {
        Some(idx) => &slug[idx + 1..],
        None => "",
    };

    if candidate.is_empty() || !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ArticleError::InvalidSlug {
            slug: slug.to_string(),
        });
    }

    Ok(candidate)
}
