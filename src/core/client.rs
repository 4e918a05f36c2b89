// decision service client - one POST per query, no retries

use async_trait::async_trait;

use super::contract::{ControlResponse, QueryRequest};
use crate::Error;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Anything that can turn a query into a verdict.
#[async_trait]
pub trait DecisionService: Send + Sync {
    async fn evaluate(&self, request: &QueryRequest) -> Result<ControlResponse, Error>;
}

pub struct HttpDecisionService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDecisionService {
    /// `base_url` is the service root; requests go to `{base_url}/query`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base = base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "service url must start with http:// or https://, got {base_url}"
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("{base}/query"),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DecisionService for HttpDecisionService {
    async fn evaluate(&self, request: &QueryRequest) -> Result<ControlResponse, Error> {
        tracing::debug!(
            endpoint = %self.endpoint,
            model = request.embedding_model.as_deref().unwrap_or("-"),
            "posting query"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // error bodies are never decoded as verdicts
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "decision service rejected query");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let verdict = ControlResponse::parse(&body)?;
        tracing::info!(
            status = %verdict.status,
            reason = %verdict.reason_code,
            evidence = verdict.evidence_count,
            "verdict received"
        );

        Ok(verdict)
    }
}
