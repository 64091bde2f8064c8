//! Chat Endpoint

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{ChatRequest, ChatResponse};

impl ApiClient {
    /// Ask the assistant; returns its reply text.
    pub async fn send_chat(&self, message: &str) -> ApiResult<String> {
        let reply: ChatResponse = self.post_json("/api/chat", &ChatRequest { message }).await?;
        Ok(reply.response)
    }
}
