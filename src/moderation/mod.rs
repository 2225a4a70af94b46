// Moderation dispatch: trait-based seam over the hosted model.
//
// The ModerationModel trait defines the interface. GroqModerator implements
// it against Groq's OpenAI-compatible chat completions endpoint.

pub mod groq;
pub mod traits;

pub use groq::{dispatch, GroqModerator, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use traits::ModerationModel;
