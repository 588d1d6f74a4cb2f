//! Expert Advisor
//!
//! Relays a user question to the remote text-generation provider with the
//! fixed diamond-expert persona, generation parameters, and safety
//! policy. Stateless per call: the session transcript is owned by the
//! caller and only appended to around each exchange.
//!
//! On any provider failure the advisor substitutes a fixed apology
//! string embedding the error detail, so the session always has a
//! displayable assistant turn. This availability-over-correctness
//! swallow is the one deliberate failure-recovery point in the system.

use std::sync::Arc;

use advisor_core::{
    message::Message,
    provider::{GenerationOptions, LlmProvider, SafetySetting},
};

use crate::DIAMOND_ADVISOR_PROMPT;

/// Default model identifier for the remote endpoint
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Fixed sampling temperature for advisory answers
pub const ADVISOR_TEMPERATURE: f32 = 0.2;

/// Fixed output-token ceiling for advisory answers
pub const ADVISOR_MAX_TOKENS: u32 = 500;

/// Diamond expert chat client
pub struct ExpertAdvisor {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl ExpertAdvisor {
    /// Create an advisor using the default model
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self::with_model(provider, DEFAULT_MODEL)
    }

    /// Create an advisor targeting a specific model
    pub fn with_model(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            options: GenerationOptions {
                model: model.into(),
                temperature: ADVISOR_TEMPERATURE,
                max_tokens: ADVISOR_MAX_TOKENS,
                safety_settings: SafetySetting::block_medium_and_above(),
            },
        }
    }

    /// The fixed generation parameters sent with every request
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Ask the expert a question. Always returns displayable text: on
    /// provider failure the apology fallback carries the error detail
    /// instead of propagating it.
    pub async fn ask(&self, question: &str) -> String {
        let messages = [
            Message::system(DIAMOND_ADVISOR_PROMPT),
            Message::user(question),
        ];

        match self.provider.complete(&messages, &self.options).await {
            Ok(completion) => completion.content,
            Err(e) => {
                tracing::warn!("advisor request failed: {}", e);
                apology(&e.to_string())
            }
        }
    }
}

/// The fixed-format fallback reply for a failed remote call
fn apology(detail: &str) -> String {
    format!(
        "I apologize, but I'm having trouble connecting to my knowledge base at the moment. \
         Please try again in a few moments. (Error: {})",
        detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::error::{AgentError, Result as CoreResult};
    use advisor_core::provider::{Completion, FinishReason};
    use async_trait::async_trait;

    /// Provider that replies with canned text
    struct CannedProvider(&'static str);

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "Canned"
        }

        async fn health_check(&self) -> CoreResult<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> CoreResult<Completion> {
            Ok(Completion {
                content: self.0.into(),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some(FinishReason::Stop),
            })
        }
    }

    /// Provider that always fails
    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn health_check(&self) -> CoreResult<bool> {
            Ok(false)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _options: &GenerationOptions,
        ) -> CoreResult<Completion> {
            Err(AgentError::ProviderUnavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_fixed_generation_parameters() {
        let advisor = ExpertAdvisor::new(Arc::new(CannedProvider("ok")));
        let options = advisor.options();
        assert_eq!(options.temperature, 0.2);
        assert_eq!(options.max_tokens, 500);
        assert_eq!(options.safety_settings.len(), 4);
        assert_eq!(options.model, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_ask_returns_provider_reply() {
        let advisor = ExpertAdvisor::new(Arc::new(CannedProvider(
            "Cut matters most for brilliance.",
        )));
        let reply = advisor.ask("Which of the 4Cs matters most?").await;
        assert_eq!(reply, "Cut matters most for brilliance.");
    }

    #[tokio::test]
    async fn test_failure_substitutes_apology() {
        let advisor = ExpertAdvisor::new(Arc::new(FailingProvider));
        let reply = advisor.ask("Is a J color diamond worth buying?").await;

        assert!(reply.contains("apologize"));
        assert!(reply.contains("connection refused"));
    }
}
