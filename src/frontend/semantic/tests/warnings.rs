//! Unused binding warnings

use super::*;
use crate::util::diagnostic::{codes, Diagnostic, Severity};

fn unused(source: &str) -> Vec<String> {
    warnings(source)
        .into_iter()
        .filter_map(|e| match e {
            SemanticError::UnusedBinding { name, .. } => Some(name),
            _ => None,
        })
        .collect()
}

#[test]
fn test_unused_let_in_binding() {
    assert_eq!(unused("让 x = 1 在 2"), ["x"]);
    assert!(unused("让 x = 1 在 x").is_empty());
}

#[test]
fn test_unused_pattern_variable() {
    assert_eq!(unused("匹配 [1] 与 | h :: t -> h | [] -> 0"), ["t"]);
}

#[test]
fn test_underscore_prefix_silences() {
    assert!(unused("让 _x = 1 在 2").is_empty());
    assert!(unused("匹配 [1] 与 | h :: _t -> h | [] -> 0").is_empty());
}

#[test]
fn test_top_level_and_parameters_never_warn() {
    assert!(unused("让 x = 1\n让 f y = 0").is_empty());
    assert!(unused("让 g = 函数 z -> 0").is_empty());
}

#[test]
fn test_self_calls_do_not_count_as_uses() {
    assert_eq!(unused("让 递归 f n = f n 在 1"), ["f"]);
    assert!(unused("让 递归 f n = f n 在 f 1").is_empty());
}

#[test]
fn test_warning_points_at_the_binding() {
    let source = "让 y = (让 未用 = 1 在 2)";
    let warnings = warnings(source);
    let span = warnings[0].span();
    assert_eq!(&source[span.start.offset..span.end.offset], "未用");
}

#[test]
fn test_warnings_do_not_count_as_errors() {
    let output = analyze_src("让 x = 1 在 2");
    assert!(!output.has_errors());
    assert_eq!(output.warnings().count(), 1);
}

#[test]
fn test_warn_unused_can_be_disabled() {
    let options = AnalyzerOptions {
        warn_unused: false,
        ..AnalyzerOptions::default()
    };
    let output = analyze_src_with("让 x = 1 在 2", &options);
    assert!(output.errors.is_empty());
}

#[test]
fn test_warning_diagnostic() {
    let output = analyze_src("让 x = 1 在 2");
    let diagnostics: Vec<Diagnostic> = output.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].code, codes::UNUSED_BINDING);
    assert_eq!(
        diagnostics[0].suggestion.as_deref(),
        Some("rename it to `_x` if this is intentional")
    );
}
