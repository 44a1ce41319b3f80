#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search-ready view of a raw folder name.
///
/// `search_title` never contains separator artifacts, a release-group
/// suffix, or a version token. The hints are taken from the folder name
/// itself and only bias ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CleanedQuery {
    pub search_title: String,
    pub hinted_year: Option<u16>,
    pub hinted_edition: Option<String>,
}

impl CleanedQuery {
    pub fn new(search_title: impl Into<String>) -> Self {
        Self {
            search_title: search_title.into(),
            hinted_year: None,
            hinted_edition: None,
        }
    }

    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.hinted_year = year;
        self
    }

    pub fn with_edition(mut self, edition: Option<String>) -> Self {
        self.hinted_edition = edition;
        self
    }
}
