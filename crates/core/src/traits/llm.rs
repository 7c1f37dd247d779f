//! Language Model trait

use async_trait::async_trait;

use crate::{GenerateOutcome, Result};

/// Language Model interface
///
/// The gateway owns the fixed system persona and token cap; callers only
/// supply the user prompt.
///
/// Implementations:
/// - `ClaudeGateway` - Anthropic Messages API
///
/// # Example
///
/// ```ignore
/// let llm: Arc<dyn LanguageModel> = Arc::new(ClaudeGateway::new(config)?);
/// match llm.query("What are symptoms of preeclampsia?").await? {
///     GenerateOutcome::Reply(reply) => println!("{}", reply.text),
///     GenerateOutcome::ApiFailure { status, message } => eprintln!("{status}: {message}"),
/// }
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generate a completion for a user prompt.
    ///
    /// A single attempt: no retries, no timeout beyond the transport
    /// default. Non-success HTTP statuses from the backend are reported as
    /// `Ok(GenerateOutcome::ApiFailure)`; `Err` is reserved for transport
    /// and decoding failures.
    async fn query(&self, prompt: &str) -> Result<GenerateOutcome>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}
