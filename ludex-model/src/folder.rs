use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// On-disk folder basename exactly as discovered during a scan pass.
///
/// The value is read once and never mutated; every later stage derives new
/// values from it instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RawFolderName(String);

impl RawFolderName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RawFolderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawFolderName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RawFolderName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RawFolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
