//! # diamond-advisor
//!
//! Diamond valuation and advisory: ordinal attribute encoding, price
//! prediction through a pre-trained gradient-boosted tree model,
//! fixed-rate currency quotes, qualitative insights, and an LLM-backed
//! expert chat.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  DiamondAttributes                                           │
//! │   carat, cut, color, clarity, depth, table, x, y, z          │
//! └───────────────┬──────────────────────────────────────────────┘
//!                 │ encode (ordinal codes, fail-closed)
//!                 ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  FeatureVector [carat, cut, color, clarity, depth, table,    │
//! │                 x, y, z]  — order is load-bearing            │
//! └───────────────┬──────────────────────────────────────────────┘
//!                 │ GbtModel::predict (one forward pass)
//!                 ▼
//!        PricePrediction ──► CurrencyQuote (fixed rates)
//!                        └─► InsightBundle (static lookups)
//! ```
//!
//! Independently, [`advisor::ExpertAdvisor`] relays free-text questions
//! to the remote LLM endpoint and always returns a displayable reply.

pub mod advisor;
pub mod attributes;
pub mod currency;
pub mod error;
pub mod insight;
pub mod predictor;

pub use advisor::ExpertAdvisor;
pub use attributes::{Clarity, Color, Cut, DiamondAttributes, FeatureVector};
pub use currency::{CurrencyQuote, convert};
pub use error::{AdvisorError, Result};
pub use insight::InsightBundle;
pub use predictor::{GbtModel, PricePrediction};

/// Assistant greeting that seeds every chat session
pub const ADVISOR_GREETING: &str = "Hello! I'm the DiamondGenius AI advisor. Ask me anything \
     about diamonds, from selection tips to investment advice!";

/// System prompt for the diamond expert advisor
pub const DIAMOND_ADVISOR_PROMPT: &str = r#"You are DiamondGenius, an expert AI advisor specializing in diamonds. Provide accurate, helpful information about:
- Diamond quality factors (4Cs: Cut, Color, Clarity, Carat)
- Pricing considerations and market trends
- Diamond investment advice
- Ethical considerations and lab-grown diamonds
- Diamond maintenance and care
- Diamond price estimation
- Diamond shopping tips

Keep responses concise (under 250 words) yet informative. Use formal but accessible language.
Always provide balanced information, considering both traditional and modern perspectives on diamonds."#;
