//! Integration tests for `lex`, `parse`, `explain` and `config`

use serde_json::Value;
use tempfile::TempDir;

use crate::{create_test_file, luoyan, stderr, stdout};

#[test]
fn test_lex_text() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "a.ly", "让 甲 = 1");

    let output = luoyan(temp_dir.path(), &["lex", "a.ly"]);

    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        [
            "1:1\tkeyword `让`",
            "1:3\tidentifier `甲`",
            "1:5\t`=`",
            "1:7\tinteger `1`",
            "1:8\tend of file",
        ]
    );
}

#[test]
fn test_lex_json() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "a.ly", "「如果」 『文』");

    let output = luoyan(temp_dir.path(), &["lex", "--format", "json", "a.ly"]);

    assert!(output.status.success());
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let tokens = report["tokens"].as_array().unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0]["kind"], "identifier `如果`");
    assert_eq!(tokens[0]["text"], "「如果」");
    assert_eq!(tokens[1]["kind"], "string literal");
    assert_eq!(tokens[2]["kind"], "end of file");
    assert_eq!(report["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_lex_error_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "a.ly", "『未闭合");

    let output = luoyan(temp_dir.path(), &["lex", "a.ly"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error[E0003]"));
    assert!(stdout(&output).ends_with("end of file\n"));
}

#[test]
fn test_parse_json() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "a.ly", "让 甲 = 1\n打印 甲");

    let output = luoyan(temp_dir.path(), &["parse", "--format", "json", "a.ly"]);

    assert!(output.status.success());
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["module"]["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "a.ly", "让 = 1");

    let output = luoyan(temp_dir.path(), &["parse", "--format", "json", "a.ly"]);

    assert_eq!(output.status.code(), Some(1));
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(report["module"].is_null());
    assert_eq!(report["diagnostics"][0]["code"], "E0010");
}

#[test]
fn test_parse_does_not_analyze() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "a.ly", "打印 未定义");

    let output = luoyan(temp_dir.path(), &["parse", "a.ly"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("未定义"));
}

#[test]
fn test_explain() {
    let temp_dir = TempDir::new().unwrap();

    let output = luoyan(temp_dir.path(), &["explain", "e1001"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "E1001 [Semantic]: unbound variable");

    let output = luoyan(temp_dir.path(), &["explain", "E9999"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown error code"));
}

#[test]
fn test_config_prints_effective_settings() {
    let temp_dir = TempDir::new().unwrap();

    let output = luoyan(temp_dir.path(), &["--format", "json", "config"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("enumeration: ordinal_lookahead"));
    assert!(text.contains("format: json"));
    assert!(text.contains("use_colors: false"));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "luoyan.ron", "(format: xml)");

    let output = luoyan(temp_dir.path(), &["config"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid configuration in"));
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().unwrap();

    let output = luoyan(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
