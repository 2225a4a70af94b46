// Colored terminal output for verdicts and the taxonomy.
//
// main.rs delegates all human-facing formatting here; the `--json` path
// goes through output::json instead.

use colored::Colorize;

use crate::parser::ModerationVerdict;
use crate::taxonomy::CategoryCode;

/// Display a verdict with its violated categories.
pub fn display_verdict(verdict: &ModerationVerdict, raw_reply: &str) {
    println!();
    match verdict {
        ModerationVerdict::Safe => {
            println!(
                "  {} This content appears to be safe for AI interactions.",
                "Safe:".green().bold()
            );
        }
        ModerationVerdict::Unsafe(categories) => {
            println!(
                "  {} This content may not be appropriate for AI interactions.",
                "Unsafe:".red().bold()
            );
            if categories.is_empty() {
                println!("  {}", "No categories identified in the response.".yellow());
            } else {
                println!("\n  {}", "Violated safety categories".bold());
                for category in categories {
                    println!("    {} {}", "!".red(), category.to_string().yellow());
                }
            }
        }
        ModerationVerdict::Invalid => {
            println!(
                "  {} The model reply could not be interpreted.",
                "Invalid:".yellow().bold()
            );
            let preview = super::truncate_chars(raw_reply.trim(), 120);
            if preview.is_empty() {
                println!("  Raw reply: {}", "(empty)".dimmed());
            } else {
                println!("  Raw reply: {}", preview.dimmed());
            }
        }
    }
    println!();
}

/// Display the hazard taxonomy the model classifies against.
pub fn display_categories() {
    println!("\n{}", "=== MLCommons Taxonomy of Hazards ===".bold());
    println!();
    for code in CategoryCode::ALL {
        println!("  {:>4}  {}", code.as_str().cyan(), code.label());
    }
    println!();
    println!(
        "  {}",
        "Safe input yields `safe`; otherwise `unsafe` followed by the violated codes.".dimmed()
    );
}
