//! Flood-assistant text completion.
//!
//! Wraps an OpenAI-compatible chat-completions provider behind the
//! [`Assistant`] trait so the API route can run against a test double. The
//! shipped provider targets the xAI endpoint the product uses.

pub mod models;
pub mod prompt;
pub mod providers;

use anyhow::Result;
use async_trait::async_trait;

/// A text-completion backend answering flood-domain questions.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Provider name (e.g., `"xai"`).
    fn provider(&self) -> &str;

    /// Completes the user prompt, already wrapped in the flood-domain
    /// context, into a single response string.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub use providers::grok::GrokProvider;
