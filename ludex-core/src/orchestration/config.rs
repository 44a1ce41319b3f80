use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How ambiguous candidate sets are settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolverMode {
    /// Ask a human, one folder at a time.
    #[default]
    Interactive,
    /// Skip every ambiguous folder.
    AutoSkip,
    /// Answer from a pre-recorded file.
    Scripted,
}

impl ResolverMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverMode::Interactive => "interactive",
            ResolverMode::AutoSkip => "auto-skip",
            ResolverMode::Scripted => "scripted",
        }
    }
}

impl fmt::Display for ResolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolverMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(ResolverMode::Interactive),
            "auto-skip" | "auto_skip" | "autoskip" => Ok(ResolverMode::AutoSkip),
            "scripted" => Ok(ResolverMode::Scripted),
            other => Err(format!(
                "unknown resolver mode '{other}' (expected interactive, auto-skip or scripted)"
            )),
        }
    }
}

/// Run-level knobs for the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenamerOptions {
    /// Compute decisions without touching the filesystem.
    pub dry_run: bool,
    pub resolver_mode: ResolverMode,
    /// Folders processed concurrently. Forced to 1 for interactive runs.
    pub workers: usize,
    /// Cancel the remaining folders after the first failure.
    pub fail_fast: bool,
    /// Leave folders already named `<title> (<year>)` untouched.
    pub skip_canonical: bool,
}

impl Default for RenamerOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            resolver_mode: ResolverMode::Interactive,
            workers: 1,
            fail_fast: false,
            skip_canonical: true,
        }
    }
}
