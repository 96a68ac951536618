use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AnswerResponse, QuestionRequest};

/// Anything that can answer a [`QuestionRequest`]: the HTTP client in
/// production, scripted fakes in tests.
#[async_trait]
pub trait AskTransport: Send + Sync {
    async fn ask(&self, request: &QuestionRequest) -> Result<AnswerResponse>;
}
