//! Assistant Chat Transcript
//!
//! In-memory conversation shown on the dashboard. Not persisted.

use log::warn;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{ChatMessage, ChatRole};

pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that request.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl ChatTranscript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append the user's message and mark a reply as pending.
    /// Returns the text to send, or `None` for blank input or a busy transcript.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage { role: ChatRole::User, content: text.to_string() });
        self.pending = true;
        Some(text.to_string())
    }

    pub fn receive(&mut self, reply: ApiResult<String>) {
        let content = match reply {
            Ok(text) => text,
            Err(err) => {
                warn!("[CHAT] Request failed: {}", err);
                FALLBACK_REPLY.to_string()
            }
        };
        self.messages.push(ChatMessage { role: ChatRole::Assistant, content });
        self.pending = false;
    }

    pub async fn send(&mut self, api: &ApiClient, input: &str) -> bool {
        let Some(message) = self.begin(input) else {
            return false;
        };
        let reply = api.send_chat(&message).await;
        self.receive(reply);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{client, MockTransport};
    use crate::api::Method;
    use crate::error::ApiError;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_appends_both_sides() {
        let transport = MockTransport::new();
        transport.respond(Method::Post, "/api/chat", 200, json!({"response": "Try the pink tower."}));
        let (api, _) = client(&transport, Some("tok"));

        let mut transcript = ChatTranscript::default();
        assert!(transcript.send(&api, "  Ideas for Ana?  ").await);

        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[0].content, "Ideas for Ana?");
        assert_eq!(messages[1].content, "Try the pink tower.");
        assert_eq!(transport.requests()[0].body, Some(json!({"message": "Ideas for Ana?"})));
        assert!(!transcript.is_pending());
    }

    #[test]
    fn test_failure_uses_fallback() {
        let mut transcript = ChatTranscript::default();
        transcript.begin("hello");
        transcript.receive(Err(ApiError::Transport("offline".into())));
        assert_eq!(transcript.messages()[1].content, FALLBACK_REPLY);
        assert_eq!(transcript.messages()[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_blank_or_busy_is_ignored() {
        let mut transcript = ChatTranscript::default();
        assert_eq!(transcript.begin("   "), None);
        assert_eq!(transcript.begin("first"), Some("first".to_string()));
        assert_eq!(transcript.begin("second"), None);
        assert_eq!(transcript.messages().len(), 1);
    }
}
