//! Semantic analyzer tests
//!
//! - scopes: 作用域与名字解析
//! - checks: 元数、构造器、重复绑定、赋值目标
//! - typing: 字面量层面的类型一致性
//! - warnings: 未使用的绑定

mod checks;
mod warnings;

use crate::frontend::lexer::tokenize;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::parse;
use crate::frontend::semantic::{
    analyze, analyze_with_options, AnalysisOutput, AnalyzerOptions, BindingKind, SemanticError, Ty,
};

fn parse_module(source: &str) -> Module {
    let lexed = tokenize(source);
    assert!(lexed.errors.is_empty(), "lexical errors: {:?}", lexed.errors);
    let parsed = parse(&lexed.tokens);
    assert!(parsed.errors.is_empty(), "syntax errors: {:?}", parsed.errors);
    parsed.module.expect("module")
}

pub(crate) fn analyze_src(source: &str) -> AnalysisOutput {
    analyze(parse_module(source))
}

pub(crate) fn analyze_src_with(
    source: &str,
    options: &AnalyzerOptions,
) -> AnalysisOutput {
    analyze_with_options(parse_module(source), options)
}

/// Errors only, warnings dropped
pub(crate) fn errors(source: &str) -> Vec<SemanticError> {
    analyze_src(source)
        .errors
        .into_iter()
        .filter(|e| !e.is_warning())
        .collect()
}

pub(crate) fn warnings(source: &str) -> Vec<SemanticError> {
    analyze_src(source)
        .errors
        .into_iter()
        .filter(SemanticError::is_warning)
        .collect()
}

/// Assert the source analyzes without any error or warning
pub(crate) fn assert_clean(source: &str) {
    let output = analyze_src(source);
    assert!(output.errors.is_empty(), "{:?}: {:?}", source, output.errors);
}

/// Type recorded for the last top-level expression statement
pub(crate) fn last_expr_type(source: &str) -> Option<Ty> {
    let output = analyze_src(source);
    let analyzed = &output.module;
    let expr = analyzed.module.items.iter().rev().find_map(|stmt| match &stmt.kind {
        StmtKind::Expr(expr) => Some(expr),
        _ => None,
    })?;
    analyzed.annotations.type_of(expr.id).cloned()
}

pub(crate) fn unbound_names(errors: &[SemanticError]) -> Vec<&str> {
    errors
        .iter()
        .filter_map(|e| match e {
            SemanticError::UnboundVariable { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect()
}
