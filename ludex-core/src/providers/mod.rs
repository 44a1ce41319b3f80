//! Game catalog providers.

pub mod config;
pub mod igdb;
pub mod throttle;
pub mod traits;

pub use config::CatalogConfig;
pub use igdb::{IgdbCredentials, IgdbProvider};
pub use throttle::RequestThrottle;
pub use traits::{CatalogProvider, ProviderError};

#[cfg(test)]
pub use traits::MockCatalogProvider;
