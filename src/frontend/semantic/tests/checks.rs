//! Arity, constructor, duplicate binding and assignment checks

use super::*;

fn arity_errors(source: &str) -> Vec<(String, usize, usize)> {
    errors(source)
        .into_iter()
        .filter_map(|e| match e {
            SemanticError::ArityMismatch {
                name,
                expected,
                found,
                ..
            } => Some((name, expected, found)),
            _ => None,
        })
        .collect()
}

fn duplicates(source: &str) -> Vec<String> {
    errors(source)
        .into_iter()
        .filter_map(|e| match e {
            SemanticError::DuplicateBinding { name, .. } => Some(name),
            _ => None,
        })
        .collect()
}

#[test]
fn test_builtin_arity() {
    assert_eq!(arity_errors("长度 [1] [2]"), [("长度".to_string(), 1, 2)]);
    assert!(arity_errors("打印 1").is_empty());
}

#[test]
fn test_user_function_arity() {
    assert_eq!(
        arity_errors("让 相加 a b = a + b\n相加 1"),
        [("相加".to_string(), 2, 1)]
    );
    assert!(arity_errors("让 相加 a b = a + b\n相加 1 2").is_empty());
}

#[test]
fn test_lambda_binding_arity() {
    assert_eq!(
        arity_errors("让 f = 函数 x -> x\nf 1 2"),
        [("f".to_string(), 1, 2)]
    );
}

#[test]
fn test_zero_arity_call_with_unit() {
    assert_clean("打印 (读取 ())");
    assert_clean("打印 (读取())");
    assert_eq!(arity_errors("读取 1"), [("读取".to_string(), 0, 1)]);
}

#[test]
fn test_error_span_covers_the_call() {
    let source = "让 x = 长度 [1] [2]";
    let errors = errors(source);
    let span = errors[0].span();
    assert_eq!(&source[span.start.offset..span.end.offset], "长度 [1] [2]");
}

#[test]
fn test_constructor_arity_in_expressions() {
    let types = "类型 形状 = 点 | 圆 之 浮点 | 方 之 浮点 * 浮点\n";
    assert_clean(&format!("{}让 a = 点\n让 b = 圆 1.0\n让 c = 方 1.0 2.0", types));
    assert_eq!(
        arity_errors(&format!("{}让 b = 圆 1.0 2.0", types)),
        [("圆".to_string(), 1, 2)]
    );
}

#[test]
fn test_constructor_patterns() {
    let source = "类型 选项 = 无 | 有 之 整数\n让 x = 有 1\n匹配 x 与 | 有 n -> n | 无 -> 0";
    assert_clean(source);

    let output = analyze_src(source);
    let analyzed = &output.module;
    let StmtKind::Expr(Expr {
        kind: ExprKind::Match { branches, .. },
        ..
    }) = &analyzed.module.items[2].kind
    else {
        panic!("expected match");
    };
    // 无 is a constant constructor, not a fresh binding
    let resolution = analyzed.annotations.resolution(branches[1].pattern.id).unwrap();
    assert!(matches!(
        &resolution.kind,
        BindingKind::Constructor { arity: 0, type_name } if type_name == "选项"
    ));
}

#[test]
fn test_constructor_pattern_arity() {
    let source = "类型 选项 = 无 | 有 之 整数\n匹配 有 1 与 | 有 a b -> a | 无 -> 0";
    assert_eq!(arity_errors(source), [("有".to_string(), 1, 2)]);
}

#[test]
fn test_unknown_constructor() {
    let errors = errors("让 x = 1\n匹配 x 与 | 某 y -> y | _ -> 0");
    assert!(matches!(
        errors.as_slice(),
        [SemanticError::UnknownConstructor { name, .. }] if name == "某"
    ));
}

#[test]
fn test_unknown_type() {
    let errors = errors("让 x : 整型 = 1");
    assert!(matches!(
        errors.as_slice(),
        [SemanticError::UnknownType { name, .. }] if name == "整型"
    ));
    assert!(super::errors("让 x : int 列表 = [1]").is_empty());
}

#[test]
fn test_user_types_are_known() {
    assert_clean("类型 点 = { 横 : 整数; 纵 : 整数 }\n让 p : 点 = { 横 = 1; 纵 = 2 }");
    assert_clean("类型 树 = 叶 | 节点 之 树 * 整数 * 树\n让 t = 节点 叶 1 叶");
    assert_clean("类型 坐标 = 整数 * 整数\n让 f (p : 坐标) = p");
}

#[test]
fn test_types_and_values_are_separate_namespaces() {
    let errors = errors("类型 点 = 整数 * 整数\n打印 点");
    assert_eq!(unbound_names(&errors), ["点"]);
}

#[test]
fn test_duplicate_bindings() {
    assert_eq!(duplicates("让 f x x = x"), ["x"]);
    assert_eq!(duplicates("匹配 (1, 2) 与 | (a, a) -> a"), ["a"]);
    assert_eq!(duplicates("类型 t = 甲 | 甲"), ["甲"]);
    assert_eq!(duplicates("类型 p = { x : 整数; x : 整数 }"), ["x"]);
    assert_eq!(duplicates("让 r = { a = 1; a = 2 }"), ["a"]);
    // 顶层重新绑定是遮蔽，不是重复
    assert_eq!(duplicates("让 x = 1\n让 x = 2"), Vec::<String>::new());
}

#[test]
fn test_assignment_targets() {
    assert_clean("让 计数 = 0\n计数 <- 计数 + 1");

    let invalid = |source: &str| {
        errors(source)
            .iter()
            .filter(|e| matches!(e, SemanticError::InvalidAssignmentTarget { .. }))
            .count()
    };
    assert_eq!(invalid("1 <- 2"), 1);
    assert_eq!(invalid("打印 <- 1"), 1);
    assert_eq!(invalid("让 f x = x\nf <- 1"), 1);
    assert_eq!(invalid("让 x = 0\nx <- 1"), 0);
}

#[test]
fn test_assignment_keeps_type() {
    let errors = errors("让 x = 1\nx <- 『甲』");
    assert!(matches!(
        errors.as_slice(),
        [SemanticError::TypeMismatch { expected: Ty::Int, found: Ty::String, .. }]
    ));
}

#[test]
fn test_analysis_continues_after_errors() {
    let errors = errors("打印 甲\n打印 乙\n长度 1 2\n让 x : 无此类型 = 1");
    assert_eq!(errors.len(), 4);
}
