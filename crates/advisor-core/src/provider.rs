//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for remote text-generation backends so the
//! advisor can work with any provider without code changes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_core::provider::{LlmProvider, GenerationOptions};
//!
//! let provider = GeminiProvider::from_env();
//! let completion = provider.complete(&messages, &options).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gemini-1.5-pro-latest")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Content-safety thresholds applied to the request
    #[serde(default)]
    pub safety_settings: Vec<SafetySetting>,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro-latest".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            safety_settings: Vec::new(),
        }
    }
}

/// Harm category recognized by the content-safety filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmCategory {
    Harassment,
    HateSpeech,
    SexuallyExplicit,
    DangerousContent,
}

/// Sensitivity at which generation is blocked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// A single content-safety rule sent with a generation request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub const fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }

    /// The standard policy: all four harm categories blocked at medium
    /// sensitivity and above.
    pub fn block_medium_and_above() -> Vec<Self> {
        use HarmBlockThreshold::BlockMediumAndAbove;
        vec![
            Self::new(HarmCategory::Harassment, BlockMediumAndAbove),
            Self::new(HarmCategory::HateSpeech, BlockMediumAndAbove),
            Self::new(HarmCategory::SexuallyExplicit, BlockMediumAndAbove),
            Self::new(HarmCategory::DangerousContent, BlockMediumAndAbove),
        ]
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    Safety,
    Error,
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new text-generation backends.
/// The advisor works exclusively through this interface. Each call is a
/// single synchronous round trip: no retries, no streaming.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Check if the provider is available and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.temperature, 0.7);
        assert_eq!(opts.max_tokens, 2048);
        assert!(opts.safety_settings.is_empty());
    }

    #[test]
    fn test_standard_safety_policy_covers_all_categories() {
        let policy = SafetySetting::block_medium_and_above();
        assert_eq!(policy.len(), 4);
        assert!(policy
            .iter()
            .all(|s| s.threshold == HarmBlockThreshold::BlockMediumAndAbove));
    }
}
