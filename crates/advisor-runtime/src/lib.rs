//! # advisor-runtime
//!
//! Runtime providers for the Adamas advisor system.
//!
//! ## Providers
//!
//! - **Gemini** (default): Google Generative Language REST API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_runtime::gemini::GeminiProvider;
//!
//! let provider = GeminiProvider::from_env()?;
//! let completion = provider.complete(&messages, &options).await?;
//! ```

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiProvider};

// Re-export core types for convenience
pub use advisor_core::{AgentError, LlmProvider, Message, Result, Role, Session, Transcript};
