//! The modern and classical dialects through the whole pipeline

use luoyan::frontend::parser::ast::StmtKind;
use luoyan::{compile, compile_all, CompileOutput, CompilerConfig};

const MODERN: &str = "\
让 递归 阶乘 n = 如果 n <= 1 那么 1 否则 n * 阶乘 (n - 1)
让 数列 = [1, 2, 3]
让 n = 长度 数列
匹配 n 与 | 0 -> 『零』 | _ -> 『多』
";

const CLASSICAL: &str = "\
夫「阶乘」者受「n」焉算法乃
  如果 n 小于等于 1 那么 1 否则 n 乘 阶乘 (n 减 1)
也
设 数列 为 列开始 1 其一 2 其二 3 其三 列结束
设 n 为 长度 数列
观 n 之性
  若 0 则 『零』
  余者 则 『多』
观毕
";

fn kinds(output: &CompileOutput) -> Vec<StmtKind> {
    output
        .module()
        .expect("module")
        .items
        .iter()
        .map(|stmt| stmt.kind.clone())
        .collect()
}

#[test]
fn test_both_dialects_compile_cleanly() {
    for source in [MODERN, CLASSICAL] {
        let output = compile("program.ly", source);
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    }
}

#[test]
fn test_dialects_produce_the_same_program() {
    let modern = compile("modern.ly", MODERN);
    let classical = compile("classical.ly", CLASSICAL);
    assert_eq!(kinds(&modern).len(), 4);
    assert_eq!(kinds(&modern), kinds(&classical));
}

#[test]
fn test_compile_all_matches_sequential_compilation() {
    let units = [("modern.ly", MODERN), ("classical.ly", CLASSICAL)];
    let outputs = compile_all(&units, &CompilerConfig::default());
    assert_eq!(outputs.len(), 2);
    for (output, (name, source)) in outputs.iter().zip(units) {
        let sequential = compile(name, source);
        assert_eq!(output.name, name);
        assert_eq!(output.diagnostics, sequential.diagnostics);
        assert_eq!(kinds(output), kinds(&sequential));
    }
}

#[test]
fn test_every_broken_statement_is_reported() {
    let source = "让 = 1\n让 = 2\n让 = 3\n打印 1";
    let output = compile("broken.ly", source);
    assert!(output.error_count() >= 3);
    // 后面的正确语句依然被解析
    assert!(output.module().is_some_and(|m| !m.items.is_empty()));
}

#[test]
fn test_diagnostics_are_ordered_by_position() {
    let output = compile("mixed.ly", "打印 甲\n让 = 1\n打印 乙 @\n长度 1 2");
    let offsets: Vec<usize> = output
        .diagnostics
        .iter()
        .map(|d| d.span.start.offset)
        .collect();
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]), "{:?}", offsets);
    assert!(output.error_count() >= 4);
}
