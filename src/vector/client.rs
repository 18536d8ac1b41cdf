//! REST client for the hosted vector-search collaborator.
//!
//! Speaks an Upstash-style data-plane API: `/upsert-data`, `/query-data` and
//! `/info` with bearer-token auth. The service embeds the submitted text
//! itself, so requests carry raw text rather than vectors.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::VectorConfig;
use crate::errors::Result;
use crate::errors::TwinRagError;
use crate::vector::IndexInfo;
use crate::vector::QueryMatch;
use crate::vector::UpsertItem;
use crate::vector::VectorIndex;

pub struct VectorRestClient {
    client: Client,
    rest_url: String,
    rest_token: String,
}

impl VectorRestClient {
    /// Create a new client from config.
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &VectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| TwinRagError::Http(e.to_string()))?;

        Ok(Self {
            client,
            rest_url: config.rest_url.trim_end_matches('/').to_string(),
            rest_token: config.rest_token.clone(),
        })
    }

    async fn error_text(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        format!("({status}): {body}")
    }
}

#[async_trait]
impl VectorIndex for VectorRestClient {
    async fn upsert(&self, items: Vec<UpsertItem>) -> Result<()> {
        let url = format!("{}/upsert-data", self.rest_url);
        debug!("Upserting {} items to vector index", items.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.rest_token)
            .json(&items)
            .send()
            .await
            .map_err(|e| TwinRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TwinRagError::VectorStore(format!(
                "upsert failed {}",
                Self::error_text(response).await
            )));
        }
        Ok(())
    }

    async fn query(
        &self,
        text: &str,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<QueryMatch>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct QueryRequest<'a> {
            data: &'a str,
            top_k: usize,
            include_metadata: bool,
        }

        #[derive(Deserialize)]
        struct QueryResponse {
            result: Vec<QueryMatch>,
        }

        let url = format!("{}/query-data", self.rest_url);
        debug!("Querying vector index: top_k={}", top_k);

        let request = QueryRequest {
            data: text,
            top_k,
            include_metadata,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.rest_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| TwinRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TwinRagError::VectorStore(format!(
                "query failed {}",
                Self::error_text(response).await
            )));
        }

        let result: QueryResponse = response
            .json()
            .await
            .map_err(|e| TwinRagError::VectorStore(format!("failed to parse response: {e}")))?;

        Ok(result.result)
    }

    async fn info(&self) -> Result<IndexInfo> {
        #[derive(Deserialize)]
        struct InfoResponse {
            result: IndexInfo,
        }

        let url = format!("{}/info", self.rest_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.rest_token)
            .send()
            .await
            .map_err(|e| TwinRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TwinRagError::VectorStore(format!(
                "info failed {}",
                Self::error_text(response).await
            )));
        }

        let result: InfoResponse = response
            .json()
            .await
            .map_err(|e| TwinRagError::VectorStore(format!("failed to parse response: {e}")))?;

        Ok(result.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = VectorRestClient::new(&VectorConfig {
            rest_url: "https://vector.example.com/".to_string(),
            rest_token: "token".to_string(),
        })
        .unwrap();
        assert_eq!(client.rest_url, "https://vector.example.com");
    }

    #[tokio::test]
    #[ignore = "Requires live vector service credentials"]
    async fn test_live_info() {
        let client = VectorRestClient::new(&VectorConfig {
            rest_url: std::env::var("VECTOR_REST_URL").unwrap(),
            rest_token: std::env::var("VECTOR_REST_TOKEN").unwrap(),
        })
        .unwrap();
        let info = client.info().await.unwrap();
        println!("vector count: {}", info.vector_count);
    }
}
