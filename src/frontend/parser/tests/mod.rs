//! Parser tests module
//!
//! - expressions: 优先级、结合性、函数应用
//! - lists: 现代列表与古雅体列表的等价性
//! - patterns: 模式
//! - matches: 匹配表达式（两种方言）
//! - functions: 三种函数定义语法
//! - statements: 绑定、类型定义、模块
//! - recovery: 错误恢复
//! - properties: 属性测试

mod expressions;
mod patterns;
mod properties;

use crate::frontend::lexer::tokenize;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::{
    parse, parse_expression, parse_expression_with_options, parse_with_options, ParseOutput,
    ParserOptions, SyntaxError,
};

/// Lex and parse, asserting the source is lexically clean
pub(crate) fn parse_src(source: &str) -> ParseOutput {
    let lexed = tokenize(source);
    assert!(lexed.errors.is_empty(), "lexical errors: {:?}", lexed.errors);
    parse(&lexed.tokens)
}

pub(crate) fn parse_src_with(
    source: &str,
    options: &ParserOptions,
) -> ParseOutput {
    parse_with_options(&tokenize(source).tokens, options)
}

/// Parse a module that must be free of errors
pub(crate) fn module(source: &str) -> Module {
    let output = parse_src(source);
    assert!(output.errors.is_empty(), "syntax errors: {:?}", output.errors);
    output.module.expect("module")
}

/// Kinds of the top-level statements
pub(crate) fn stmts(source: &str) -> Vec<StmtKind> {
    module(source).items.into_iter().map(|s| s.kind).collect()
}

/// Parse a single expression that must be valid
pub(crate) fn expr(source: &str) -> Expr {
    match parse_expression(&tokenize(source).tokens) {
        Ok(expr) => expr,
        Err(errors) => panic!("failed to parse {:?}: {:?}", source, errors),
    }
}

pub(crate) fn expr_with(
    source: &str,
    options: &ParserOptions,
) -> Result<Expr, Vec<SyntaxError>> {
    parse_expression_with_options(&tokenize(source).tokens, options)
}

/// Detached node constructors for expected trees; ids and spans are ignored
pub(crate) mod build {
    use crate::frontend::parser::ast::*;
    use crate::util::span::Span;

    pub fn e(kind: ExprKind) -> Expr {
        Expr {
            id: NodeId(0),
            kind,
            span: Span::dummy(),
        }
    }

    pub fn int(n: i64) -> Expr {
        e(ExprKind::Literal(Literal::Int(n)))
    }

    pub fn var(name: &str) -> Expr {
        e(ExprKind::Identifier(name.to_string()))
    }

    pub fn bin(
        op: BinOp,
        left: Expr,
        right: Expr,
    ) -> Expr {
        e(ExprKind::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn call(
        callee: Expr,
        args: Vec<Expr>,
    ) -> Expr {
        e(ExprKind::FunctionCall {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn list(items: Vec<Expr>) -> Expr {
        e(ExprKind::List(items))
    }

    pub fn ident(name: &str) -> Ident {
        Ident {
            id: NodeId(0),
            name: name.to_string(),
            span: Span::dummy(),
        }
    }

    pub fn p(kind: PatternKind) -> Pattern {
        Pattern {
            id: NodeId(0),
            kind,
            span: Span::dummy(),
        }
    }

    pub fn bind(name: &str) -> Pattern {
        p(PatternKind::Binding(name.to_string()))
    }
}
