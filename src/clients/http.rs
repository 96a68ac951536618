use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::clients::traits::AskTransport;
use crate::config::Config;
use crate::error::{AskError, Result};
use crate::models::{AnswerResponse, QuestionRequest};

const MAX_ERROR_BODY: usize = 500;

/// JSON-over-HTTP client for the `/ask` endpoint
#[derive(Clone, Debug)]
pub struct HttpAskClient {
    endpoint: String,
    client: Client,
}

impl HttpAskClient {
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let endpoint = normalize_endpoint(&endpoint.into());
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AskError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { endpoint, client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.client.endpoint.clone(), config.client.timeout_ms)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Append `/ask` when given a bare server address.
fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim_end_matches('/');
    if trimmed.ends_with("/ask") {
        trimmed.to_string()
    } else {
        format!("{}/ask", trimmed)
    }
}

#[async_trait]
impl AskTransport for HttpAskClient {
    async fn ask(&self, request: &QuestionRequest) -> Result<AnswerResponse> {
        let res = self.client.post(&self.endpoint).json(request).send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let mut body = res.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(AskError::Status { status, body });
        }

        let bytes = res.bytes().await?;
        let answer: AnswerResponse = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            steps = answer.steps.len(),
            visualization = answer.visualization_data.is_some(),
            "answer received"
        );
        Ok(answer)
    }
}
