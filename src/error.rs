// Typed failures for a moderation request.
//
// An unreadable reply is not an error; it parses to ModerationVerdict::Invalid.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    /// Missing or empty credential.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Nothing to moderate.
    #[error("input error: {0}")]
    Input(String),

    /// The remote call failed. Carries the provider's message unchanged.
    #[error("upstream error: {0}")]
    Upstream(String),
}
