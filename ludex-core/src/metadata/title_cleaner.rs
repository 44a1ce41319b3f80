use chrono::{Datelike, Utc};
use ludex_model::CleanedQuery;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::release_groups::ReleaseGroupMatcher;

/// Earliest year accepted as a release-year hint.
pub const EARLIEST_HINT_YEAR: u16 = 1970;

static BRACKETED_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([^()]*)\)|\[([^\[\]]*)\]|\{([^{}]*)\}")
        .expect("bracketed tag regex should compile")
});
static RELEASE_GROUP_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*-\s*([A-Za-z0-9]+)\s*$")
        .expect("release group suffix regex should compile")
});
static VERSION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bv\d+(?:\.\d+)*[a-z]?\b")
        .expect("version marker regex should compile")
});
static BUILD_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bbuild[\s.-]*\d+(?:\.\d+)*\b")
        .expect("build marker regex should compile")
});
static UPDATE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bupdate(?:[\s.-]*\d+(?:\.\d+)*[a-z]?)?\b")
        .expect("update marker regex should compile")
});
static SCENE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:goty|repack|proper|internal|readnfo|multi\d*)$")
        .expect("scene tag regex should compile")
});
static COLLAPSE_WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("whitespace regex should compile")
});

const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "of", "on", "or",
    "the", "to", "vs", "with",
];

/// Tunables for the token cleaner. Both lists extend the built-in sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleanerConfig {
    /// Additional release group names stripped from folder name suffixes.
    pub release_groups: Vec<String>,
    /// Additional standalone tokens treated as edition markers
    /// (matched case-insensitively, removed from the title).
    pub edition_markers: Vec<String>,
}

/// Strips scene artifacts from raw folder names.
///
/// Cleaning never fails: a name that would be stripped to nothing keeps its
/// separator-normalized form instead.
#[derive(Debug, Clone)]
pub struct TitleCleaner {
    groups: ReleaseGroupMatcher,
    edition_markers: Vec<String>,
    latest_year: u16,
}

impl Default for TitleCleaner {
    fn default() -> Self {
        Self::new(&CleanerConfig::default())
    }
}

impl TitleCleaner {
    pub fn new(config: &CleanerConfig) -> Self {
        let latest_year = u16::try_from(Utc::now().year() + 1)
            .unwrap_or(u16::MAX);
        Self {
            groups: ReleaseGroupMatcher::new(&config.release_groups),
            edition_markers: config
                .edition_markers
                .iter()
                .map(|marker| marker.trim().to_ascii_lowercase())
                .filter(|marker| !marker.is_empty())
                .collect(),
            latest_year,
        }
    }

    /// Override the upper bound of the plausible release-year range
    /// (defaults to next calendar year).
    pub fn with_latest_year(mut self, year: u16) -> Self {
        self.latest_year = year;
        self
    }

    pub fn clean(&self, raw: &str) -> CleanedQuery {
        let (without_tags, tag_year, tag_edition) = self.strip_bracketed_tags(raw);
        let spaced = without_tags.replace('_', " ");
        let without_group = self.strip_release_groups(&spaced);
        let without_versions = strip_version_markers(&without_group);

        let mut edition = tag_edition;
        let mut tokens: Vec<String> = without_versions
            .split(|c: char| c == '.' || c == '-' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .filter(|token| {
                if self.is_edition_marker(token) {
                    edition.get_or_insert_with(|| (*token).to_string());
                    false
                } else {
                    true
                }
            })
            .map(str::to_string)
            .collect();

        let year = match tag_year {
            Some(year) => Some(year),
            None => self.take_year_token(&mut tokens),
        };

        let title = if tokens.is_empty() {
            separators_to_spaces(raw)
        } else {
            title_case(&tokens)
        };

        debug!(raw, title = %title, ?year, ?edition, "cleaned folder name");

        CleanedQuery::new(title)
            .with_year(year)
            .with_edition(edition)
    }

    fn strip_bracketed_tags(
        &self,
        raw: &str,
    ) -> (String, Option<u16>, Option<String>) {
        let mut year = None;
        let mut edition = None;

        for captures in BRACKETED_TAG.captures_iter(raw) {
            let inner = captures
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            if inner.is_empty() || is_version_tag(inner) {
                continue;
            }
            if let Some(found) = self.plausible_year(inner) {
                year.get_or_insert(found);
            } else {
                edition.get_or_insert_with(|| inner.to_string());
            }
        }

        let stripped = BRACKETED_TAG.replace_all(raw, " ").into_owned();
        (stripped, year, edition)
    }

    fn strip_release_groups(&self, name: &str) -> String {
        let mut current = name.trim_end().to_string();

        while let Some(captures) = RELEASE_GROUP_SUFFIX.captures(&current) {
            let (Some(whole), Some(token)) = (captures.get(0), captures.get(1))
            else {
                break;
            };
            if !self.groups.is_release_group(token.as_str()) {
                break;
            }
            let remainder = current[..whole.start()].trim_end();
            if !has_title_token(remainder) {
                break;
            }
            debug!(group = token.as_str(), "stripped release group suffix");
            current = remainder.to_string();
        }

        current
    }

    fn is_edition_marker(&self, token: &str) -> bool {
        SCENE_TAG.is_match(token)
            || self
                .edition_markers
                .iter()
                .any(|marker| marker.eq_ignore_ascii_case(token))
    }

    /// Removes and returns the last plausible year token. The first token is
    /// never taken, so numeric titles such as "1942" survive.
    fn take_year_token(&self, tokens: &mut Vec<String>) -> Option<u16> {
        let position = tokens
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find_map(|(idx, token)| self.plausible_year(token).map(|_| idx))?;
        let token = tokens.remove(position);
        self.plausible_year(&token)
    }

    fn plausible_year(&self, token: &str) -> Option<u16> {
        if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token
            .parse::<u16>()
            .ok()
            .filter(|year| (EARLIEST_HINT_YEAR..=self.latest_year).contains(year))
    }
}

fn strip_version_markers(name: &str) -> String {
    let name = VERSION_MARKER.replace_all(name, " ");
    let name = BUILD_MARKER.replace_all(&name, " ");
    UPDATE_MARKER.replace_all(&name, " ").into_owned()
}

fn is_version_tag(inner: &str) -> bool {
    [&*VERSION_MARKER, &*BUILD_MARKER, &*UPDATE_MARKER]
        .iter()
        .any(|pattern| {
            pattern
                .find(inner)
                .is_some_and(|m| m.start() == 0 && m.end() == inner.len())
        })
}

fn has_title_token(value: &str) -> bool {
    value
        .split(|c: char| c == '.' || c == '-' || c.is_whitespace())
        .any(|token| !token.is_empty())
}

fn separators_to_spaces(raw: &str) -> String {
    let spaced = raw.replace(['.', '_', '-'], " ");
    COLLAPSE_WHITESPACE
        .replace_all(spaced.trim(), " ")
        .into_owned()
}

/// Capitalizes all-lowercase words; anything already carrying an uppercase
/// letter is left alone so stylized titles keep their casing.
fn title_case(tokens: &[String]) -> String {
    tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            let all_lower = token.chars().any(char::is_lowercase)
                && !token.chars().any(char::is_uppercase);
            if !all_lower || (idx > 0 && MINOR_WORDS.contains(&token.as_str())) {
                return token.clone();
            }
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
