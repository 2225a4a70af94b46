// Llama Guard reply parsing: raw model text in, structured verdict out.
//
// Llama Guard answers with "safe", or "unsafe" followed by the violated
// category codes (e.g. "unsafe\nS1/S4"). Two reading strategies are
// supported: a structured token reader that expects exactly that shape, and
// a substring scan that tolerates free-form replies. Lenient mode tries the
// structured reader first and falls back to the scan.

use serde::Serialize;

use crate::taxonomy::{CategoryCode, ViolatedCategory};

/// How to interpret the model's reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// First token is the verdict, second token lists the codes.
    #[default]
    Structured,
    /// Starts-with "safe" check, then scan the whole text for S1-S14.
    Substring,
    /// Structured first, substring scan if the first token isn't a verdict.
    Lenient,
}

impl ParsePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsePolicy::Structured => "structured",
            ParsePolicy::Substring => "substring",
            ParsePolicy::Lenient => "lenient",
        }
    }
}

impl std::fmt::Display for ParsePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParsePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(ParsePolicy::Structured),
            "substring" => Ok(ParsePolicy::Substring),
            "lenient" => Ok(ParsePolicy::Lenient),
            other => anyhow::bail!(
                "Unknown parse policy '{other}' (expected structured, substring or lenient)"
            ),
        }
    }
}

/// The outcome of a single moderation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationVerdict {
    Safe,
    /// Flagged content, with the categories in the order the parser found them.
    /// May be empty when the model gave no codes.
    Unsafe(Vec<ViolatedCategory>),
    /// The reply could not be read as a verdict.
    Invalid,
}

impl ModerationVerdict {
    /// Violated categories; always empty unless the verdict is `Unsafe`.
    pub fn categories(&self) -> &[ViolatedCategory] {
        match self {
            ModerationVerdict::Unsafe(categories) => categories,
            ModerationVerdict::Safe | ModerationVerdict::Invalid => &[],
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, ModerationVerdict::Safe)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationVerdict::Safe => "safe",
            ModerationVerdict::Unsafe(_) => "unsafe",
            ModerationVerdict::Invalid => "invalid",
        }
    }
}

impl Serialize for ModerationVerdict {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ModerationVerdict", 2)?;
        state.serialize_field("verdict", self.as_str())?;
        state.serialize_field("categories", self.categories())?;
        state.end()
    }
}

/// Parse a raw moderation reply with the given policy.
///
/// Under `Structured` (and the structured half of `Lenient`), the code list
/// may be separated by `/` or `,`, and codes match the table ignoring case:
/// `unsafe s4,S99` yields `Known(S4)` followed by `Unrecognized("S99")`.
pub fn parse_moderation_reply(text: &str, policy: ParsePolicy) -> ModerationVerdict {
    match policy {
        ParsePolicy::Structured => parse_structured(text).unwrap_or(ModerationVerdict::Invalid),
        ParsePolicy::Substring => parse_substring(text),
        ParsePolicy::Lenient => {
            if text.trim().is_empty() {
                return ModerationVerdict::Invalid;
            }
            parse_structured(text).unwrap_or_else(|| parse_substring(text))
        }
    }
}

/// Token reader. Returns `None` when the first token isn't "safe"/"unsafe"
/// (or there are no tokens at all).
fn parse_structured(text: &str) -> Option<ModerationVerdict> {
    let mut tokens = text.split_whitespace();
    let verdict = tokens.next()?.to_lowercase();

    match verdict.as_str() {
        "safe" => Some(ModerationVerdict::Safe),
        "unsafe" => {
            // Llama Guard 4 separates codes with '/', Llama Guard 3 with ','
            let categories: Vec<ViolatedCategory> = tokens
                .next()
                .map(|codes| {
                    codes
                        .split(['/', ','])
                        .filter(|code| !code.is_empty())
                        .map(ViolatedCategory::from_raw)
                        .collect()
                })
                .unwrap_or_default();
            Some(ModerationVerdict::Unsafe(categories))
        }
        _ => None,
    }
}

/// Substring scan. Never fails: anything not starting with "safe" is unsafe.
///
/// Codes are reported in taxonomy order regardless of where they appear.
/// This is a literal scan, so "S10" in the text also matches S1.
fn parse_substring(text: &str) -> ModerationVerdict {
    let text = text.trim();

    if text.to_lowercase().starts_with("safe") {
        return ModerationVerdict::Safe;
    }

    let categories: Vec<ViolatedCategory> = CategoryCode::ALL
        .iter()
        .filter(|code| text.contains(code.as_str()))
        .map(|code| ViolatedCategory::Known(*code))
        .collect();

    ModerationVerdict::Unsafe(categories)
}
