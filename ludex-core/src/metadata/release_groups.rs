use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Groups that regularly tag PC game releases. Matched case-insensitively.
pub const DEFAULT_RELEASE_GROUPS: &[&str] = &[
    "RUNE",
    "CODEX",
    "PLAZA",
    "SKIDROW",
    "RELOADED",
    "CPY",
    "HOODLUM",
    "FLT",
    "TENOKE",
    "EMPRESS",
    "DOGE",
    "TiNYiSO",
    "DARKSiDERS",
    "SiMPLEX",
    "Razor1911",
    "PROPHET",
    "HI2U",
    "ALI213",
    "3DM",
    "P2P",
    "KaOs",
    "GOG",
    "GOLDBERG",
    "ElAmigos",
    "FitGirl",
    "DODI",
    "DINOByTES",
    "Chronos",
    "ANOMALY",
    "VACE",
    "ACTiVATED",
    "POSTMORTEM",
];

/// Longest trailing token the heuristic will treat as a group tag.
const MAX_HEURISTIC_LEN: usize = 12;

static ROMAN_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[IVXLC]+$").expect("roman numeral regex should compile")
});

/// Decides whether a trailing hyphen-delimited token is a release group.
///
/// A token counts when it is on the denylist, or when it looks like a tag
/// rather than a title word: short, contains a letter, is not a roman
/// numeral, and is either free of lowercase letters or free of vowels.
#[derive(Debug, Clone)]
pub struct ReleaseGroupMatcher {
    denylist: HashSet<String>,
}

impl Default for ReleaseGroupMatcher {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl ReleaseGroupMatcher {
    /// Build a matcher from the default denylist plus `extra` entries.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let denylist = DEFAULT_RELEASE_GROUPS
            .iter()
            .map(|group| group.to_ascii_uppercase())
            .chain(
                extra
                    .into_iter()
                    .map(|group| group.as_ref().trim().to_ascii_uppercase())
                    .filter(|group| !group.is_empty()),
            )
            .collect();
        Self { denylist }
    }

    pub fn is_listed(&self, token: &str) -> bool {
        self.denylist.contains(&token.to_ascii_uppercase())
    }

    pub fn is_release_group(&self, token: &str) -> bool {
        self.is_listed(token) || looks_like_group_tag(token)
    }
}

fn looks_like_group_tag(token: &str) -> bool {
    let len = token.chars().count();
    if !(2..=MAX_HEURISTIC_LEN).contains(&len) {
        return false;
    }
    if !token.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    if ROMAN_NUMERAL.is_match(token) {
        return false;
    }

    let has_lowercase = token.chars().any(char::is_lowercase);
    let has_vowel = token.chars().any(|c| {
        matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
    });

    !has_lowercase || !has_vowel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denylist_is_case_insensitive() {
        let matcher = ReleaseGroupMatcher::default();
        assert!(matcher.is_release_group("rune"));
        assert!(matcher.is_release_group("FITGIRL"));
        assert!(matcher.is_release_group("ElAmigos"));
    }

    #[test]
    fn extra_entries_extend_the_denylist() {
        let matcher = ReleaseGroupMatcher::new(["Scenerz"]);
        assert!(matcher.is_listed("scenerz"));
        assert!(!ReleaseGroupMatcher::default().is_listed("scenerz"));
    }

    #[test]
    fn heuristic_accepts_caps_tags_and_rejects_title_words() {
        let matcher = ReleaseGroupMatcher::default();
        assert!(matcher.is_release_group("SKIDZ"));
        assert!(matcher.is_release_group("x64"));
        assert!(!matcher.is_release_group("Life"));
        assert!(!matcher.is_release_group("Man"));
        assert!(!matcher.is_release_group("II"));
        assert!(!matcher.is_release_group("2"));
        assert!(!matcher.is_release_group("V"));
        assert!(!matcher.is_release_group("ABCDEFGHIJKLMN"));
    }
}
