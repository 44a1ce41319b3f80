use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use ludex_core::{CatalogProvider, ProviderError};
use ludex_core::model::CandidateRecord;

/// In-memory catalog keyed by exact search title.
#[derive(Default)]
pub struct FakeCatalog {
    entries: HashMap<String, Vec<CandidateRecord>>,
    unavailable: HashSet<String>,
    rate_limited: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, title: &str, candidates: Vec<CandidateRecord>) -> Self {
        self.entries.insert(title.to_string(), candidates);
        self
    }

    pub fn unavailable_for(mut self, title: &str) -> Self {
        self.unavailable.insert(title.to_string());
        self
    }

    pub fn rate_limited_for(mut self, title: &str) -> Self {
        self.rate_limited.insert(title.to_string());
        self
    }

    /// Titles searched so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock").clone()
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn verify(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn search(&self, title: &str) -> Result<Vec<CandidateRecord>, ProviderError> {
        self.queries
            .lock()
            .expect("queries lock")
            .push(title.to_string());

        if self.unavailable.contains(title) {
            return Err(ProviderError::Unavailable(format!("no route to catalog for {title}")));
        }
        if self.rate_limited.contains(title) {
            return Err(ProviderError::RateLimited);
        }
        Ok(self.entries.get(title).cloned().unwrap_or_default())
    }
}
