//! Optional cache collaborator: a hosted key-value store with TTL reached
//! over REST.
//!
//! The cache is a pure optimization. When it is not configured the retrieval
//! path behaves as always-miss with no functional change.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::CacheConfig;
use crate::errors::Result;
use crate::errors::TwinRagError;

/// Abstract cache collaborator. Implemented by [`RestCacheClient`] for the
/// hosted service and by in-memory stubs in tests.
#[async_trait]
pub trait ContextCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;
}

pub struct RestCacheClient {
    client: Client,
    rest_url: String,
    rest_token: String,
}

impl RestCacheClient {
    /// Create a new client from config.
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| TwinRagError::Http(e.to_string()))?;

        Ok(Self {
            client,
            rest_url: config.rest_url.trim_end_matches('/').to_string(),
            rest_token: config.rest_token.clone(),
        })
    }

    /// Keys carry raw query text, so they must be percent-encoded into the
    /// path.
    fn encode_key(key: &str) -> String {
        url::form_urlencoded::byte_serialize(key.as_bytes()).collect()
    }
}

#[async_trait]
impl ContextCache for RestCacheClient {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct GetResponse {
            result: Option<String>,
        }

        let url = format!("{}/get/{}", self.rest_url, Self::encode_key(key));
        debug!("Cache GET {key}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.rest_token)
            .send()
            .await
            .map_err(|e| TwinRagError::Cache(format!("GET error: {e}")))?;

        if !response.status().is_success() {
            return Err(TwinRagError::Cache(format!(
                "GET failed ({})",
                response.status()
            )));
        }

        let result: GetResponse = response
            .json()
            .await
            .map_err(|e| TwinRagError::Cache(format!("GET parse error: {e}")))?;

        Ok(result.result)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let url = format!(
            "{}/setex/{}/{}",
            self.rest_url,
            Self::encode_key(key),
            ttl_secs
        );
        debug!("Cache SETEX {key} ttl={ttl_secs}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.rest_token)
            .body(value.to_string())
            .send()
            .await
            .map_err(|e| TwinRagError::Cache(format!("SETEX error: {e}")))?;

        if !response.status().is_success() {
            return Err(TwinRagError::Cache(format!(
                "SETEX failed ({})",
                response.status()
            )));
        }
        Ok(())
    }
}
