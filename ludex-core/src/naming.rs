//! Canonical folder names for catalog candidates.

use ludex_model::CandidateRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Characters rejected by at least one common target filesystem.
const ILLEGAL_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

static COLLAPSE_WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("whitespace regex should compile")
});
static CANONICAL_FOLDER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.+ \(\d{4}\)$").expect("canonical folder regex should compile")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("candidate name {name:?} is empty after sanitization")]
    InvalidCandidateName { name: String },
}

/// Replace illegal and control characters with spaces and collapse runs of
/// whitespace.
pub fn sanitize_component(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|ch| {
            if ILLEGAL_CHARS.contains(&ch) || ch.is_control() {
                ' '
            } else {
                ch
            }
        })
        .collect();
    COLLAPSE_WHITESPACE
        .replace_all(replaced.trim(), " ")
        .into_owned()
}

/// `"<name> (<year>)"`, or just `"<name>"` when the year is unknown.
pub fn format_folder_name(
    candidate: &CandidateRecord,
) -> Result<String, NamingError> {
    let name = sanitize_component(&candidate.canonical_name);
    if name.is_empty() {
        return Err(NamingError::InvalidCandidateName {
            name: candidate.canonical_name.clone(),
        });
    }

    Ok(match candidate.release_year {
        Some(year) => format!("{name} ({year})"),
        None => name,
    })
}

/// Whether a folder already follows the `"<title> (<year>)"` convention.
pub fn is_canonical_folder_name(name: &str) -> bool {
    CANONICAL_FOLDER_NAME.is_match(name)
}
