//! Multi-turn chat session over the retriever
//!
//! The session owns its message history and drives one retrieval plus one
//! generation per turn. Turns are strictly sequential: `submit_turn` takes
//! `&mut self`, so a second turn cannot start before the first returns.

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::{assemble, grounded_user_message};
use crate::providers::ChatProvider;
use crate::retrieval::Retriever;
use crate::types::Message;

/// Externally observable session state.
///
/// The retrieving/generating phases of a turn live inside `submit_turn`;
/// between calls the session is either waiting for a query or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready to accept the next query
    AwaitingQuery,
    /// Terminal; reached via the exit token
    Closed,
}

/// Result of one submitted turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Assistant reply content
    Reply(String),
    /// The exit token was submitted; no reply, session is closed
    Closed,
}

/// A chat session: message history plus shared read-only retrieval state.
///
/// History is append-only and always starts with the system message. A
/// failed turn leaves history exactly as it was before the turn.
pub struct ChatSession {
    history: Vec<Message>,
    retriever: Retriever,
    chat: Arc<dyn ChatProvider>,
    state: SessionState,
    top_k: usize,
    exit_token: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatSession {
    /// Create a session seeded with the configured system prompt
    pub fn new(retriever: Retriever, chat: Arc<dyn ChatProvider>, config: &RagConfig) -> Self {
        Self {
            history: vec![Message::system(config.chat.system_prompt.clone())],
            retriever,
            chat,
            state: SessionState::AwaitingQuery,
            top_k: config.retrieval.top_k,
            exit_token: config.chat.exit_token.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        }
    }

    /// Run one turn: retrieve grounding, append the grounded user message,
    /// generate the assistant reply, append it.
    ///
    /// The exit token (case-insensitive, surrounding whitespace ignored)
    /// closes the session without touching history. A retrieval failure
    /// aborts the turn before any history mutation; a generation failure
    /// rolls the user message back so no unanswered turn lingers in
    /// history.
    pub async fn submit_turn(&mut self, query: &str) -> Result<TurnOutcome> {
        if self.state == SessionState::Closed {
            return Err(Error::SessionClosed);
        }

        let query = query.trim();
        if query.eq_ignore_ascii_case(&self.exit_token) {
            self.state = SessionState::Closed;
            tracing::info!("Session closed by exit token");
            return Ok(TurnOutcome::Closed);
        }

        let context = {
            let retrieved = self.retriever.retrieve(query, self.top_k).await?;
            tracing::debug!("Retrieved {} products for grounding", retrieved.len());
            assemble(&retrieved)
        };

        self.history
            .push(Message::user(grounded_user_message(query, &context)));

        match self
            .chat
            .complete(&self.history, self.temperature, self.max_tokens)
            .await
        {
            Ok(reply) => {
                let content = reply.content.clone();
                self.history.push(reply);
                Ok(TurnOutcome::Reply(content))
            }
            Err(e) => {
                // Keep history well-formed for the next turn
                self.history.pop();
                Err(e)
            }
        }
    }

    /// Full message history, oldest first
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the exit token has been seen
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::indexing::build_index;
    use crate::providers::mock::{MockChat, MockEmbedder};
    use crate::providers::EmbeddingProvider;
    use crate::types::{Product, Role};

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            Product {
                id: 1,
                name: "Mug".to_string(),
                description: "Ceramic mug".to_string(),
                price: 10.0,
            },
            Product {
                id: 2,
                name: "Pen".to_string(),
                description: "Blue ink pen".to_string(),
                price: 2.0,
            },
        ])
        .unwrap()
    }

    async fn session_with(
        embedder: MockEmbedder,
        chat: Arc<dyn ChatProvider>,
    ) -> ChatSession {
        let catalog = Arc::new(catalog());
        let good: Arc<dyn EmbeddingProvider> = Arc::new(MockEmbedder::new(8));
        let index = Arc::new(build_index(&catalog, good.as_ref()).await.unwrap());
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(embedder);
        let retriever = Retriever::new(catalog, index, embedder);
        ChatSession::new(retriever, chat, &RagConfig::default())
    }

    #[tokio::test]
    async fn test_successful_turn_appends_exactly_two_messages() {
        let mut session = session_with(
            MockEmbedder::new(8),
            Arc::new(MockChat::with_reply("The mug costs 10.")),
        )
        .await;

        let outcome = session.submit_turn("how much is the mug?").await.unwrap();

        assert_eq!(outcome, TurnOutcome::Reply("The mug costs 10.".to_string()));
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history()[0].role, Role::System);
        assert_eq!(session.history()[1].role, Role::User);
        assert_eq!(session.history()[2].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_user_message_delimits_context_from_query() {
        let mut session = session_with(
            MockEmbedder::new(8),
            Arc::new(MockChat::with_reply("ok")),
        )
        .await;

        session.submit_turn("how much is the mug?").await.unwrap();

        let user = &session.history()[1];
        assert!(user.content.starts_with("how much is the mug?"));
        assert!(user.content.contains("Context with related products:"));
    }

    #[tokio::test]
    async fn test_exit_token_as_first_turn_closes_without_appending() {
        let mut session = session_with(
            MockEmbedder::new(8),
            Arc::new(MockChat::with_reply("unused")),
        )
        .await;

        let outcome = session.submit_turn("EXIT").await.unwrap();

        assert_eq!(outcome, TurnOutcome::Closed);
        assert!(session.is_closed());
        // Only the seed system message remains
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, Role::System);
    }

    #[tokio::test]
    async fn test_submitting_to_closed_session_is_rejected() {
        let mut session = session_with(
            MockEmbedder::new(8),
            Arc::new(MockChat::with_reply("unused")),
        )
        .await;
        session.submit_turn("exit").await.unwrap();

        let result = session.submit_turn("still there?").await;

        assert!(matches!(result, Err(Error::SessionClosed)));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_rolls_back_the_user_message() {
        let mut session =
            session_with(MockEmbedder::new(8), Arc::new(MockChat::failing())).await;

        let result = session.submit_turn("how much is the mug?").await;

        assert!(matches!(result, Err(Error::Generation(_))));
        // Net zero appended-but-unanswered turns
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.state(), SessionState::AwaitingQuery);
    }

    #[tokio::test]
    async fn test_retrieval_failure_leaves_history_untouched() {
        let mut session = session_with(
            MockEmbedder::new(8).fail_on("mug"),
            Arc::new(MockChat::with_reply("unreached")),
        )
        .await;

        let result = session.submit_turn("how much is the mug?").await;

        assert!(matches!(result, Err(Error::Retrieval(_))));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.state(), SessionState::AwaitingQuery);
    }

    #[tokio::test]
    async fn test_session_recovers_after_failed_turn() {
        let mut session = session_with(
            MockEmbedder::new(8).fail_on("broken"),
            Arc::new(MockChat::with_reply("Here you go.")),
        )
        .await;

        assert!(session.submit_turn("broken query").await.is_err());
        let outcome = session.submit_turn("show me pens").await.unwrap();

        assert_eq!(outcome, TurnOutcome::Reply("Here you go.".to_string()));
        assert_eq!(session.history().len(), 3);
    }
}
