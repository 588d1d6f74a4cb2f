//! # advisor-core
//!
//! Provider-agnostic chat plumbing for the Adamas advisor system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Chat Path                              │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │   Session   │  │  Transcript │  │   LlmProvider       │  │
//! │  │    Store    │──│ (append-only│──│   (Strategy)        │  │
//! │  │             │  │  greeting)  │  │                     │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping the remote text-generation
//! backend without changing advisor logic. Each call is one synchronous
//! round trip; history lives in the per-session `Transcript`.

pub mod error;
pub mod message;
pub mod provider;
pub mod session;

pub use error::{AgentError, Result};
pub use message::{Message, Role, Transcript};
pub use provider::{Completion, GenerationOptions, LlmProvider, SafetySetting};
pub use session::{MemorySessionStore, Session, SessionId, SessionStore};
