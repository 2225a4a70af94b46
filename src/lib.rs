// Guardcheck: prompt safety checks against Llama Guard.
//
// This is the library root. A check is one pass through three modules:
// moderation (send the prompt), parser (read the reply) and output (show it).

pub mod config;
pub mod error;
pub mod moderation;
pub mod output;
pub mod parser;
pub mod status;
pub mod taxonomy;
