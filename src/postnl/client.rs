use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::{debug, info};

use super::{AddressProvider, ProviderError, ProviderResponse};
use crate::config::Config;
use crate::models::AddressQuery;

pub const BENELUX_PATH: &str = "/address/benelux";

/// reqwest-backed client for the PostNL Benelux address check
#[derive(Debug, Clone)]
pub struct PostNlClient {
    client: Client,
    endpoint: String,
}

impl PostNlClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ProviderError> {
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|_| ProviderError::Configuration("POSTNL_API_KEY is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()?;

        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), BENELUX_PATH);
        info!(endpoint = %endpoint, "PostNL client configured");

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(&config.postnl_base_url, &config.postnl_api_key)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AddressProvider for PostNlClient {
    #[tracing::instrument(
        skip(self, query),
        fields(
            country_iso = %query.country_iso,
            postal_code = %query.postal_code,
            status
        )
    )]
    async fn lookup(&self, query: &AddressQuery) -> Result<ProviderResponse, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&query.to_query_params())
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::Span::current().record("status", status);

        // The provider does not always answer with JSON (gateway errors, HTML maintenance pages)
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).ok();

        debug!(status, body_is_json = body.is_some(), "PostNL responded");

        Ok(ProviderResponse { status, body })
    }
}
