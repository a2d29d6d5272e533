//! Expression tests - 优先级、结合性、函数应用

use super::build::*;
use super::*;

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(
        expr("1 + 2 * 3"),
        bin(BinOp::Add, int(1), bin(BinOp::Mul, int(2), int(3)))
    );
}

#[test]
fn test_word_operators_parse_like_symbols() {
    assert_eq!(expr("1 加 2 乘 3"), expr("1 + 2 * 3"));
    assert_eq!(expr("甲 大于等于 乙 且 非 丙"), expr("甲 >= 乙 && !丙"));
}

#[test]
fn test_left_associativity() {
    assert_eq!(
        expr("1 - 2 - 3"),
        bin(BinOp::Sub, bin(BinOp::Sub, int(1), int(2)), int(3))
    );
    assert_eq!(
        expr("8 / 4 / 2"),
        bin(BinOp::Div, bin(BinOp::Div, int(8), int(4)), int(2))
    );
}

#[test]
fn test_logical_precedence() {
    assert_eq!(
        expr("a < b && c || d"),
        bin(
            BinOp::Or,
            bin(BinOp::And, bin(BinOp::Lt, var("a"), var("b")), var("c")),
            var("d")
        )
    );
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let neg_a = e(ExprKind::UnaryOp {
        op: UnOp::Neg,
        operand: Box::new(var("a")),
    });
    assert_eq!(expr("-a * b"), bin(BinOp::Mul, neg_a, var("b")));
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        expr("(1 + 2) * 3"),
        bin(BinOp::Mul, bin(BinOp::Add, int(1), int(2)), int(3))
    );
}

#[test]
fn test_juxtaposition_collects_arguments() {
    let expected = call(var("f"), vec![var("x"), var("y")]);
    assert_eq!(expr("f x y"), expected);
    assert_eq!(expr("f(x, y)"), expected);
    assert_eq!(expr("f（x，y）"), expected);
}

#[test]
fn test_application_binds_tighter_than_operators() {
    assert_eq!(
        expr("f x + 1"),
        bin(BinOp::Add, call(var("f"), vec![var("x")]), int(1))
    );
    assert_eq!(
        expr("阶乘 (n - 1)"),
        call(var("阶乘"), vec![bin(BinOp::Sub, var("n"), int(1))])
    );
}

#[test]
fn test_spaced_parenthesis_is_an_argument() {
    let call_expr = expr("f (1, 2)");
    match call_expr.kind {
        ExprKind::FunctionCall { args, .. } => {
            assert_eq!(args.len(), 1);
            assert!(matches!(args[0].kind, ExprKind::Tuple(_)));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_application_stops_at_line_end() {
    let items = stmts("打印 x\ny");
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0],
        StmtKind::Expr(call(var("打印"), vec![var("x")]))
    );
}

#[test]
fn test_literals_are_not_callable() {
    // 1 2 is two statements' worth of tokens, not an application
    let output = parse_src("1 2");
    assert!(output.errors.is_empty());
    assert_eq!(output.module.map(|m| m.items.len()), Some(2));
}

#[test]
fn test_unit_tuple_and_annotation() {
    assert_eq!(expr("()").kind, ExprKind::Literal(Literal::Unit));
    assert!(matches!(expr("(1, 2, 3)").kind, ExprKind::Tuple(ref items) if items.len() == 3));
    assert!(matches!(
        expr("（甲 ： 整数）").kind,
        ExprKind::TypeAnnotation { .. }
    ));
}

#[test]
fn test_conditional() {
    let neg_one = e(ExprKind::UnaryOp {
        op: UnOp::Neg,
        operand: Box::new(int(1)),
    });
    assert_eq!(
        expr("如果 x > 0 那么 1 否则 -1"),
        e(ExprKind::Conditional {
            condition: Box::new(bin(BinOp::Gt, var("x"), int(0))),
            then_branch: Box::new(int(1)),
            else_branch: Some(Box::new(neg_one)),
        })
    );
    assert_eq!(expr("if x then 1 else 2"), expr("如果 x 那么 1 否则 2"));
}

#[test]
fn test_conditional_without_else() {
    match expr("如果 真 那么 打印 1").kind {
        ExprKind::Conditional { else_branch, .. } => assert!(else_branch.is_none()),
        other => panic!("expected conditional, got {:?}", other),
    }
}

#[test]
fn test_lambda() {
    match expr("函数 x y -> x + y").kind {
        ExprKind::Lambda { params, body } => {
            let names: Vec<_> = params.iter().map(|p| p.name.name.as_str()).collect();
            assert_eq!(names, ["x", "y"]);
            assert_eq!(*body, bin(BinOp::Add, var("x"), var("y")));
        }
        other => panic!("expected lambda, got {:?}", other),
    }
    assert_eq!(expr("fun x → x"), expr("函数 x -> x"));
}

#[test]
fn test_let_in() {
    match expr("让 x = 1 在 x + 1").kind {
        ExprKind::LetIn { binding, body } => {
            assert_eq!(binding.name().name, "x");
            assert!(matches!(*binding, Definition::Let(_)));
            assert_eq!(*body, bin(BinOp::Add, var("x"), int(1)));
        }
        other => panic!("expected let-in, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    let inner = e(ExprKind::Assign {
        target: Box::new(var("b")),
        value: Box::new(int(1)),
    });
    assert_eq!(
        expr("a <- b <- 1"),
        e(ExprKind::Assign {
            target: Box::new(var("a")),
            value: Box::new(inner),
        })
    );
    assert_eq!(expr("a ← 1"), expr("a := 1"));
}

#[test]
fn test_cons_is_right_associative() {
    assert_eq!(
        expr("1 :: 2 :: 空空如也"),
        bin(
            BinOp::Cons,
            int(1),
            bin(BinOp::Cons, int(2), list(vec![]))
        )
    );
}

#[test]
fn test_field_access() {
    match expr("点.横 + 1").kind {
        ExprKind::BinaryOp { left, .. } => match left.kind {
            ExprKind::FieldAccess { target, field } => {
                assert_eq!(*target, var("点"));
                assert_eq!(field.name, "横");
            }
            other => panic!("expected field access, got {:?}", other),
        },
        other => panic!("expected binary op, got {:?}", other),
    }
}

#[test]
fn test_record() {
    match expr("{ 名 = \"甲\"; 龄 = 3 }").kind {
        ExprKind::Record(fields) => {
            let names: Vec<_> = fields.iter().map(|f| f.name.name.as_str()).collect();
            assert_eq!(names, ["名", "龄"]);
            assert_eq!(fields[1].value, int(3));
        }
        other => panic!("expected record, got {:?}", other),
    }
}

#[test]
fn test_spans_cover_operands() {
    let parsed = expr("1 + 23");
    assert_eq!(parsed.span.start.offset, 0);
    assert_eq!(parsed.span.end.offset, 6);
}

#[test]
fn test_node_ids_are_unique() {
    let parsed = expr("f 1 (2 + 3)");
    let mut ids = vec![parsed.id];
    if let ExprKind::FunctionCall { callee, args } = &parsed.kind {
        ids.push(callee.id);
        ids.extend(args.iter().map(|a| a.id));
    }
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
    assert_eq!(count, 4);
}
