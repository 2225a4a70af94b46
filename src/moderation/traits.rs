// Moderation model trait: the seam between the CLI and the provider.

use async_trait::async_trait;

use crate::error::ModerationError;

/// A hosted model that classifies a prompt and answers in free text.
#[async_trait]
pub trait ModerationModel: Send + Sync {
    /// Model identifier sent with each request.
    fn model_id(&self) -> &str;

    /// Send one prompt and return the model's raw reply.
    async fn moderate(&self, prompt: &str) -> Result<String, ModerationError>;
}
