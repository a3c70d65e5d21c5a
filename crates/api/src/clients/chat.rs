//! Client for the `/api/chat` route group.

use std::sync::Arc;

use crate::config::{endpoints, TimeoutTier};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{ApiEnvelope, ChatAnswer, ChatContext, ChatRequest, ChatTurn};

#[derive(Debug, Clone)]
pub struct ChatClient {
    transport: Arc<Transport>,
}

impl ChatClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Send a question to the assistant with the prior turns as explicit
    /// conversation history. Uses the extended timeout tier: AI inference
    /// latency is structurally longer than CRUD round-trips.
    ///
    /// POST /api/chat/query
    pub async fn send(&self, query: &str, history: &[ChatTurn]) -> Result<ChatAnswer> {
        let backend = self.transport.config().backend;
        let request = ChatRequest {
            query: query.to_string(),
            conversation_history: if history.is_empty() {
                None
            } else {
                Some(history.to_vec())
            },
        };
        self.transport
            .post_json(
                endpoints::chat_query(backend),
                &request,
                TimeoutTier::Extended,
            )
            .await
    }

    /// Fetch the knowledge-base context the assistant answers from.
    ///
    /// GET /api/chat/context
    pub async fn context(&self) -> Result<ChatContext> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<ChatContext> = self
            .transport
            .get_json(endpoints::chat_context(backend), &[], TimeoutTier::Short)
            .await?;
        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::testutil::{start_mock_server, MockOutcome};
    use crate::types::ChatRole;

    #[tokio::test]
    async fn send_posts_query_with_history() {
        let (base_url, captured, server) = start_mock_server(vec![MockOutcome::json(
            200,
            r#"{"status":"success","query":"how many members?","response":"There are 128 members.","documents_used":3}"#,
        )])
        .await;

        let client = ChatClient::new(Arc::new(Transport::new(ApiConfig::new(&base_url))));
        let history = vec![
            ChatTurn {
                role: ChatRole::User,
                content: "hello".to_string(),
            },
            ChatTurn {
                role: ChatRole::Assistant,
                content: "Hi! Ask me about the organization.".to_string(),
            },
        ];
        let answer = client
            .send("how many members?", &history)
            .await
            .expect("chat answer");
        assert_eq!(answer.response, "There are 128 members.");
        assert_eq!(answer.documents_used, Some(3));

        let requests = captured.lock().await.clone();
        assert_eq!(requests[0].target, "/api/chat/query");
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["query"], "how many members?");
        assert_eq!(body["conversation_history"][1]["role"], "assistant");
        server.abort();
    }

    #[tokio::test]
    async fn empty_history_is_omitted_from_payload() {
        let (base_url, captured, server) = start_mock_server(vec![MockOutcome::json(
            200,
            r#"{"status":"success","query":"hi","response":"hello"}"#,
        )])
        .await;

        let client = ChatClient::new(Arc::new(Transport::new(ApiConfig::new(&base_url))));
        client.send("hi", &[]).await.expect("chat answer");

        let requests = captured.lock().await.clone();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("conversation_history").is_none());
        server.abort();
    }

    #[tokio::test]
    async fn answer_visualization_parses_when_present() {
        let (base_url, _captured, server) = start_mock_server(vec![MockOutcome::json(
            200,
            r#"{"status":"success","query":"members per year","response":"See the chart.","visualization":{"chart_type":"bar","data":[{"year":2023,"count":40},{"year":2024,"count":88}]}}"#,
        )])
        .await;

        let client = ChatClient::new(Arc::new(Transport::new(ApiConfig::new(&base_url))));
        let answer = client.send("members per year", &[]).await.expect("answer");
        let visualization = answer.visualization.expect("visualization attached");
        assert_eq!(visualization.chart_type, "bar");
        assert_eq!(visualization.data.len(), 2);
        server.abort();
    }
}
