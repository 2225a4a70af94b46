// MLCommons hazard taxonomy: the fixed S1-S14 categories Llama Guard reports.
//
// The table is compiled in and never changes at runtime. Lookups go through
// CategoryCode::lookup so every caller agrees on how raw codes are matched.

use serde::Serialize;

/// One hazard class in the Llama Guard taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryCode {
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
    S11,
    S12,
    S13,
    S14,
}

impl CategoryCode {
    /// Every category, in taxonomy order.
    pub const ALL: [CategoryCode; 14] = [
        CategoryCode::S1,
        CategoryCode::S2,
        CategoryCode::S3,
        CategoryCode::S4,
        CategoryCode::S5,
        CategoryCode::S6,
        CategoryCode::S7,
        CategoryCode::S8,
        CategoryCode::S9,
        CategoryCode::S10,
        CategoryCode::S11,
        CategoryCode::S12,
        CategoryCode::S13,
        CategoryCode::S14,
    ];

    /// The code as the model writes it ("S1" .. "S14").
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryCode::S1 => "S1",
            CategoryCode::S2 => "S2",
            CategoryCode::S3 => "S3",
            CategoryCode::S4 => "S4",
            CategoryCode::S5 => "S5",
            CategoryCode::S6 => "S6",
            CategoryCode::S7 => "S7",
            CategoryCode::S8 => "S8",
            CategoryCode::S9 => "S9",
            CategoryCode::S10 => "S10",
            CategoryCode::S11 => "S11",
            CategoryCode::S12 => "S12",
            CategoryCode::S13 => "S13",
            CategoryCode::S14 => "S14",
        }
    }

    /// Human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryCode::S1 => "Violent Crimes",
            CategoryCode::S2 => "Non-Violent Crimes",
            CategoryCode::S3 => "Sex-Related Crimes",
            CategoryCode::S4 => "Child Sexual Exploitation",
            CategoryCode::S5 => "Defamation",
            CategoryCode::S6 => "Specialized Advice",
            CategoryCode::S7 => "Privacy",
            CategoryCode::S8 => "Intellectual Property",
            CategoryCode::S9 => "Indiscriminate Weapons",
            CategoryCode::S10 => "Hate",
            CategoryCode::S11 => "Suicide & Self-Harm",
            CategoryCode::S12 => "Sexual Content",
            CategoryCode::S13 => "Elections",
            CategoryCode::S14 => "Code Interpreter Abuse",
        }
    }

    /// Map a raw code from a model reply to a category.
    ///
    /// Matching ignores case and surrounding whitespace, so "s4" and " S4"
    /// both resolve. Anything else (including "S15" or "S01") is `None`.
    pub fn lookup(raw: &str) -> Option<CategoryCode> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(raw))
    }
}

impl std::fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category flagged in an unsafe verdict.
///
/// Codes outside the fixed table are kept verbatim rather than dropped, so
/// a newer model revision that reports extra categories still shows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolatedCategory {
    Known(CategoryCode),
    Unrecognized(String),
}

impl ViolatedCategory {
    /// Resolve a raw code, passing it through unchanged if it has no mapping.
    pub fn from_raw(raw: &str) -> Self {
        match CategoryCode::lookup(raw) {
            Some(code) => ViolatedCategory::Known(code),
            None => ViolatedCategory::Unrecognized(raw.to_string()),
        }
    }

    /// The category label, or the raw code for unrecognized entries.
    pub fn label(&self) -> &str {
        match self {
            ViolatedCategory::Known(code) => code.label(),
            ViolatedCategory::Unrecognized(raw) => raw,
        }
    }

    /// The code as reported ("S4", or the raw unmapped token).
    pub fn code(&self) -> &str {
        match self {
            ViolatedCategory::Known(code) => code.as_str(),
            ViolatedCategory::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for ViolatedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolatedCategory::Known(code) => write!(f, "{}: {}", code.as_str(), code.label()),
            ViolatedCategory::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for ViolatedCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let known = matches!(self, ViolatedCategory::Known(_));
        let mut state = serializer.serialize_struct("ViolatedCategory", 3)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("known", &known)?;
        state.end()
    }
}
