// Status display: the effective configuration, without the secret.

use colored::Colorize;

use crate::config::Config;

/// Display the effective configuration to the terminal.
pub fn show(config: &Config) {
    println!("Model: {}", config.model);
    println!("Endpoint: {}", config.api_url);
    println!("Parse policy: {}", config.parse_policy);

    if config.groq_api_key.trim().is_empty() {
        println!("API key: {}", "not set".yellow());
        println!("  Set GROQ_API_KEY in your .env file, or pass --api-key to `check`");
    } else {
        println!("API key: {}", "set".green());
    }
}
