pub mod arxiv;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::SearchError;

/// Performs the GET request for a search and returns the raw response body.
///
/// Implementations must not retry; the service allows one request every
/// three seconds and pacing is left to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, params: &[(&'static str, String)]) -> Result<Vec<u8>, SearchError>;
}

/// `Transport` backed by a reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, params: &[(&'static str, String)]) -> Result<Vec<u8>, SearchError> {
        // Error statuses still carry an Atom body describing the problem.
        let resp = self.client.get(&self.base_url).query(params).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        tracing::debug!(%status, bytes = body.len(), "arxiv response received");
        Ok(body.to_vec())
    }
}
