// Machine-readable verdict output for `--json`.

use anyhow::Result;
use serde::Serialize;

use crate::parser::{ModerationVerdict, ParsePolicy};

/// One moderation result as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct VerdictReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub policy: ParsePolicy,
    #[serde(flatten)]
    pub verdict: &'a ModerationVerdict,
    pub raw_reply: &'a str,
}

/// Render a verdict report as pretty-printed JSON.
pub fn render(report: &VerdictReport<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
