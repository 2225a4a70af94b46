// Unit tests for Llama Guard reply parsing.
//
// Covers the structured token reader (default), the substring scan, and the
// lenient mode that combines them. All pure, no network access.

use guardcheck::parser::{parse_moderation_reply, ModerationVerdict, ParsePolicy};
use guardcheck::taxonomy::{CategoryCode, ViolatedCategory};

fn labels(verdict: &ModerationVerdict) -> Vec<&str> {
    verdict.categories().iter().map(|c| c.label()).collect()
}

fn displayed(verdict: &ModerationVerdict) -> Vec<String> {
    verdict.categories().iter().map(|c| c.to_string()).collect()
}

// ============================================================
// Structured policy (default)
// ============================================================

#[test]
fn default_policy_is_structured() {
    assert_eq!(ParsePolicy::default(), ParsePolicy::Structured);
}

#[test]
fn structured_safe_reply() {
    let verdict = parse_moderation_reply("safe", ParsePolicy::Structured);
    assert_eq!(verdict, ModerationVerdict::Safe);
    assert!(verdict.categories().is_empty());
}

#[test]
fn structured_safe_is_case_insensitive() {
    for reply in ["Safe", "SAFE", "  safe\n", "sAfE extra words"] {
        let verdict = parse_moderation_reply(reply, ParsePolicy::Structured);
        assert_eq!(verdict, ModerationVerdict::Safe, "reply: {reply:?}");
    }
}

#[test]
fn structured_unsafe_with_slash_separated_codes() {
    let verdict = parse_moderation_reply("Unsafe\nS1/S4", ParsePolicy::Structured);
    assert_eq!(labels(&verdict), vec!["Violent Crimes", "Child Sexual Exploitation"]);
}

#[test]
fn structured_keeps_order_of_appearance() {
    let verdict = parse_moderation_reply("unsafe\nS12/S3/S1", ParsePolicy::Structured);
    assert_eq!(
        verdict,
        ModerationVerdict::Unsafe(vec![
            ViolatedCategory::Known(CategoryCode::S12),
            ViolatedCategory::Known(CategoryCode::S3),
            ViolatedCategory::Known(CategoryCode::S1),
        ])
    );
}

#[test]
fn structured_unsafe_single_code() {
    let verdict = parse_moderation_reply("unsafe S2", ParsePolicy::Structured);
    assert_eq!(labels(&verdict), vec!["Non-Violent Crimes"]);
}

#[test]
fn structured_accepts_comma_separated_codes() {
    let verdict = parse_moderation_reply("unsafe\nS10,S11", ParsePolicy::Structured);
    assert_eq!(labels(&verdict), vec!["Hate", "Suicide & Self-Harm"]);
}

#[test]
fn structured_matches_codes_ignoring_case() {
    let verdict = parse_moderation_reply("unsafe s4,S99", ParsePolicy::Structured);
    assert_eq!(
        verdict.categories(),
        &[
            ViolatedCategory::Known(CategoryCode::S4),
            ViolatedCategory::Unrecognized("S99".to_string()),
        ]
    );
}

#[test]
fn structured_unsafe_without_codes() {
    let verdict = parse_moderation_reply("unsafe", ParsePolicy::Structured);
    assert_eq!(verdict, ModerationVerdict::Unsafe(Vec::new()));
}

#[test]
fn structured_unknown_code_passes_through() {
    let verdict = parse_moderation_reply("Unsafe S99", ParsePolicy::Structured);
    assert_eq!(labels(&verdict), vec!["S99"]);
    assert_eq!(
        verdict.categories(),
        &[ViolatedCategory::Unrecognized("S99".to_string())]
    );
}

#[test]
fn structured_mixes_known_and_unknown_codes() {
    let verdict = parse_moderation_reply("unsafe\nS9/X1", ParsePolicy::Structured);
    assert_eq!(labels(&verdict), vec!["Indiscriminate Weapons", "X1"]);
}

#[test]
fn structured_empty_reply_is_invalid() {
    let verdict = parse_moderation_reply("", ParsePolicy::Structured);
    assert_eq!(verdict, ModerationVerdict::Invalid);
    assert!(verdict.categories().is_empty());
}

#[test]
fn structured_whitespace_reply_is_invalid() {
    let verdict = parse_moderation_reply(" \n\t ", ParsePolicy::Structured);
    assert_eq!(verdict, ModerationVerdict::Invalid);
}

#[test]
fn structured_unrecognized_verdict_is_invalid() {
    let verdict = parse_moderation_reply("I cannot classify this. S1", ParsePolicy::Structured);
    assert_eq!(verdict, ModerationVerdict::Invalid);
}

// ============================================================
// Substring policy
// ============================================================

#[test]
fn substring_safe_prefix() {
    for reply in ["safe", "Safe.", "  SAFE\n", "safety first"] {
        let verdict = parse_moderation_reply(reply, ParsePolicy::Substring);
        assert_eq!(verdict, ModerationVerdict::Safe, "reply: {reply:?}");
    }
}

#[test]
fn substring_reports_codes_in_taxonomy_order() {
    let verdict =
        parse_moderation_reply("unsafe content flagged S9 and S10", ParsePolicy::Substring);
    let shown = displayed(&verdict);
    assert!(shown.contains(&"S9: Indiscriminate Weapons".to_string()));
    assert!(shown.contains(&"S10: Hate".to_string()));

    let s9 = shown.iter().position(|c| c.starts_with("S9:")).unwrap();
    let s10 = shown.iter().position(|c| c.starts_with("S10:")).unwrap();
    assert!(s9 < s10);
}

#[test]
fn substring_ignores_text_order() {
    let verdict = parse_moderation_reply("unsafe S7 then S2", ParsePolicy::Substring);
    assert_eq!(displayed(&verdict), vec!["S2: Non-Violent Crimes", "S7: Privacy"]);
}

#[test]
fn substring_is_a_literal_scan() {
    // "S10" contains "S1", so both are reported
    let verdict = parse_moderation_reply("unsafe S10", ParsePolicy::Substring);
    assert_eq!(displayed(&verdict), vec!["S1: Violent Crimes", "S10: Hate"]);
}

#[test]
fn substring_drops_unknown_codes() {
    let verdict = parse_moderation_reply("unsafe X7", ParsePolicy::Substring);
    assert_eq!(verdict, ModerationVerdict::Unsafe(Vec::new()));
}

#[test]
fn substring_never_returns_invalid() {
    let verdict = parse_moderation_reply("", ParsePolicy::Substring);
    assert_eq!(verdict, ModerationVerdict::Unsafe(Vec::new()));
}

// ============================================================
// Lenient policy
// ============================================================

#[test]
fn lenient_uses_structured_result_when_verdict_is_clear() {
    let verdict = parse_moderation_reply("unsafe\nS3/S99", ParsePolicy::Lenient);
    assert_eq!(labels(&verdict), vec!["Sex-Related Crimes", "S99"]);
}

#[test]
fn lenient_falls_back_to_substring_scan() {
    let verdict =
        parse_moderation_reply("The content is unsafe because of S5.", ParsePolicy::Lenient);
    assert_eq!(displayed(&verdict), vec!["S5: Defamation"]);
}

#[test]
fn lenient_fallback_still_honours_safe_prefix() {
    let verdict = parse_moderation_reply("safe.", ParsePolicy::Lenient);
    assert_eq!(verdict, ModerationVerdict::Safe);
}

#[test]
fn lenient_empty_reply_is_invalid() {
    assert_eq!(parse_moderation_reply("  ", ParsePolicy::Lenient), ModerationVerdict::Invalid);
}

// ============================================================
// Policy names
// ============================================================

#[test]
fn policy_from_str_accepts_known_names() {
    assert_eq!("structured".parse::<ParsePolicy>().unwrap(), ParsePolicy::Structured);
    assert_eq!("Substring".parse::<ParsePolicy>().unwrap(), ParsePolicy::Substring);
    assert_eq!(" lenient ".parse::<ParsePolicy>().unwrap(), ParsePolicy::Lenient);
    assert!("strict".parse::<ParsePolicy>().is_err());
}

#[test]
fn policy_display_round_trips() {
    for policy in [ParsePolicy::Structured, ParsePolicy::Substring, ParsePolicy::Lenient] {
        assert_eq!(policy.to_string().parse::<ParsePolicy>().unwrap(), policy);
    }
}

#[test]
fn verdict_json_shape() {
    let verdict = parse_moderation_reply("unsafe S4", ParsePolicy::Structured);
    let value = serde_json::to_value(&verdict).unwrap();
    assert_eq!(value["verdict"], "unsafe");
    assert_eq!(value["categories"][0]["code"], "S4");
    assert_eq!(value["categories"][0]["label"], "Child Sexual Exploitation");
    assert_eq!(value["categories"][0]["known"], true);

    let safe = serde_json::to_value(&ModerationVerdict::Safe).unwrap();
    assert_eq!(safe["verdict"], "safe");
    assert!(safe["categories"].as_array().unwrap().is_empty());
}
