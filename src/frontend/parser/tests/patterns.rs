//! Pattern tests

use super::build::*;
use super::*;

/// Pattern of the single branch in `匹配 x 与 <pattern> -> 0`
fn pattern(source: &str) -> Pattern {
    let text = format!("匹配 x 与 {} -> 0", source);
    match expr(&text).kind {
        ExprKind::Match { mut branches, .. } => {
            assert_eq!(branches.len(), 1, "source: {}", source);
            branches.remove(0).pattern
        }
        other => panic!("expected match, got {:?}", other),
    }
}

fn head_tail(
    head: Pattern,
    tail: Pattern,
) -> Pattern {
    p(PatternKind::HeadTail {
        head: Box::new(head),
        tail: Box::new(tail),
    })
}

#[test]
fn test_simple_patterns() {
    assert_eq!(pattern("_"), p(PatternKind::Wildcard));
    assert_eq!(pattern("42"), p(PatternKind::Literal(Literal::Int(42))));
    assert_eq!(pattern("-3"), p(PatternKind::Literal(Literal::Int(-3))));
    assert_eq!(pattern("-1.5"), p(PatternKind::Literal(Literal::Float(-1.5))));
    assert_eq!(pattern("『甲』"), p(PatternKind::Literal(Literal::String("甲".into()))));
    assert_eq!(pattern("真"), p(PatternKind::Literal(Literal::Bool(true))));
    assert_eq!(pattern("甲"), bind("甲"));
    assert_eq!(pattern("()"), p(PatternKind::Literal(Literal::Unit)));
}

#[test]
fn test_cons_pattern_is_right_associative() {
    assert_eq!(pattern("h :: t"), head_tail(bind("h"), bind("t")));
    assert_eq!(
        pattern("a :: b :: c"),
        head_tail(bind("a"), head_tail(bind("b"), bind("c")))
    );
}

#[test]
fn test_head_tail_spellings_are_equal() {
    let expected = pattern("h :: t");
    assert_eq!(pattern("[h, ...t]"), expected);
    assert_eq!(pattern("有首有尾 首名为 h 尾名为 t"), expected);
    assert_eq!(pattern("[a, b, ...rest]"), pattern("a :: b :: rest"));
}

#[test]
fn test_list_patterns() {
    assert_eq!(pattern("[]"), p(PatternKind::List(vec![])));
    assert_eq!(pattern("空空如也"), pattern("[]"));
    assert_eq!(
        pattern("【a、b】"),
        p(PatternKind::List(vec![bind("a"), bind("b")]))
    );
}

#[test]
fn test_tuple_pattern() {
    assert_eq!(
        pattern("(a, _)"),
        p(PatternKind::Tuple(vec![bind("a"), p(PatternKind::Wildcard)]))
    );
    assert_eq!(pattern("(a)"), bind("a"));
}

#[test]
fn test_constructor_patterns() {
    assert_eq!(
        pattern("有 x"),
        p(PatternKind::Constructor {
            name: ident("有"),
            args: vec![bind("x")],
        })
    );
    match pattern("节点 左 (值, _) 右").kind {
        PatternKind::Constructor { name, args } => {
            assert_eq!(name.name, "节点");
            assert_eq!(args.len(), 3);
            assert!(matches!(args[1].kind, PatternKind::Tuple(_)));
        }
        other => panic!("expected constructor, got {:?}", other),
    }
}

#[test]
fn test_constructor_inside_cons() {
    assert_eq!(
        pattern("有 x :: t"),
        head_tail(
            p(PatternKind::Constructor {
                name: ident("有"),
                args: vec![bind("x")],
            }),
            bind("t")
        )
    );
}

#[test]
fn test_guard() {
    let expected = p(PatternKind::Guard {
        pattern: Box::new(bind("n")),
        condition: Box::new(bin(BinOp::Gt, var("n"), int(0))),
    });
    assert_eq!(pattern("n 当 n > 0"), expected);
    assert_eq!(pattern("n when n > 0"), expected);
}

#[test]
fn test_invalid_pattern() {
    let output = parse_src("匹配 x 与 + -> 1");
    assert!(matches!(
        output.errors.first(),
        Some(SyntaxError::ExpectedToken { expected, .. }) if expected == &["pattern".to_string()]
    ));
}
