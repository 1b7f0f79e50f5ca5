// PostNL address verification - the single upstream this service talks to

pub mod client;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::AddressQuery;

pub use client::PostNlClient;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid provider configuration: {0}")]
    Configuration(String),
}

/// Raw outcome of one upstream lookup
///
/// `body` is `None` when the provider answered with something that is not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of address candidates
///
/// Exactly one call is made per inbound request; implementations must not retry.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    async fn lookup(&self, query: &AddressQuery) -> Result<ProviderResponse, ProviderError>;
}
