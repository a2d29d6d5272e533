//! Integration tests for the `luoyan check` command

use serde_json::Value;
use tempfile::TempDir;

use crate::{create_test_file, luoyan, stderr, stdout};

#[test]
fn test_check_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(
        temp_dir.path(),
        "valid.ly",
        "让 递归 阶乘 n = 如果 n <= 1 那么 1 否则 n * 阶乘 (n - 1)\n打印 (阶乘 5)\n",
    );

    let output = luoyan(temp_dir.path(), &["check", "valid.ly"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("checked 1 file(s): 0 error(s), 0 warning(s)"));
}

#[test]
fn test_check_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "invalid.ly", "让 计数器 = 1\n打印 计数期\n");

    let output = luoyan(temp_dir.path(), &["check", "invalid.ly"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("error[E1001]: unbound variable `计数期`"));
    assert!(stderr.contains(" --> invalid.ly:2:4"));
    assert!(stderr.contains("help: did you mean `计数器`?"));
}

#[test]
fn test_check_reports_every_stage() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "broken.ly", "打印 甲\n让 = 1\n让 乙 = @\n");

    let output = luoyan(temp_dir.path(), &["check", "--format", "json", "broken.ly"]);

    assert_eq!(output.status.code(), Some(1));
    let reports: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let codes: Vec<&str> = reports[0]["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes.first(), Some(&"E1001"));
    assert!(codes.contains(&"E0010"));
    assert!(codes.contains(&"E0001"));
}

#[test]
fn test_check_walks_directories() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "src/a.ly", "打印 1\n");
    create_test_file(temp_dir.path(), "src/sub/b.ly", "打印 未定义\n");
    create_test_file(temp_dir.path(), "src/notes.txt", "打印 未定义\n");

    let output = luoyan(temp_dir.path(), &["check", "--format", "json", "src"]);

    assert_eq!(output.status.code(), Some(1));
    let reports: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["file"].as_str().unwrap().ends_with("a.ly"));
    assert_eq!(reports[0]["errors"], 0);
    assert!(reports[1]["file"].as_str().unwrap().ends_with("b.ly"));
    assert_eq!(reports[1]["errors"], 1);
    assert_eq!(reports[1]["diagnostics"][0]["span"]["start"]["line"], 1);
}

#[test]
fn test_check_multiple_paths() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "one.ly", "让 甲 = 1\n");
    create_test_file(temp_dir.path(), "two.ly", "设 乙 为 列开始 1 其一 列结束\n");

    let output = luoyan(temp_dir.path(), &["check", "one.ly", "two.ly"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("checked 2 file(s)"));
}

#[test]
fn test_warnings_do_not_fail_the_check() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "warn.ly", "打印 (让 未用 = 1 在 2)\n");

    let output = luoyan(temp_dir.path(), &["check", "warn.ly"]);

    assert!(output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("warning[W1001]: unused binding `未用`"));
    assert!(stderr.contains("0 error(s), 1 warning(s)"));
}

#[test]
fn test_project_config_is_discovered() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "warn.ly", "打印 (让 未用 = 1 在 2)\n");
    create_test_file(temp_dir.path(), "luoyan.ron", "(analyzer: (warn_unused: false))");

    let output = luoyan(temp_dir.path(), &["check", "warn.ly"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("0 error(s), 0 warning(s)"));
}

#[test]
fn test_explicit_config_file() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(temp_dir.path(), "list.ly", "让 甲 = 【其一 1 其二 2】\n");
    create_test_file(
        temp_dir.path(),
        "strict.ron",
        "(parser: (enumeration: modern_only), format: json)",
    );

    let default = luoyan(temp_dir.path(), &["check", "list.ly"]);
    assert!(default.status.success(), "{}", stderr(&default));

    let strict = luoyan(temp_dir.path(), &["--config", "strict.ron", "check", "list.ly"]);
    assert_eq!(strict.status.code(), Some(1));
    let reports: Value = serde_json::from_str(&stdout(&strict)).unwrap();
    assert!(reports[0]["errors"].as_u64().unwrap() >= 1);
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let output = luoyan(temp_dir.path(), &["check", "absent.ly"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read: absent.ly"));
}
