//! Statement parsing

use super::ast::*;
use super::state::*;
use super::SyntaxError;
use crate::frontend::lexer::{Delimiter, Keyword, Operator, TokenKind};
use crate::util::span::Span;

impl<'a> ParserState<'a> {
    /// Parse statements until `stop` holds, recovering from errors
    ///
    /// Each failed statement is followed by a skip to the next statement
    /// boundary, so one broken statement costs one diagnostic, not the rest
    /// of the file.
    pub(crate) fn parse_items(
        &mut self,
        stop: impl Fn(&Self) -> bool,
    ) -> Vec<Stmt> {
        let mut items = Vec::new();

        loop {
            self.skip_separators();
            if self.at_end() || stop(self) {
                break;
            }

            let before = self.position();
            let errors_before = self.error_count();
            match self.parse_stmt() {
                Some(stmt) => {
                    tracing::trace!(span = %stmt.span.start, "statement parsed");
                    items.push(stmt);
                }
                None => {
                    if self.error_count() == errors_before {
                        self.error_unexpected();
                    }
                    self.synchronize();
                }
            }

            // Guarantee progress on tokens nothing can consume
            if self.position() == before && !self.at_end() {
                self.error_unexpected();
                self.bump();
            }
        }

        items
    }

    /// Parse a statement
    pub fn parse_stmt(&mut self) -> Option<Stmt> {
        let start = self.start_span();

        match self.kind() {
            TokenKind::Keyword(Keyword::Let) => self.parse_let_stmt(start),
            TokenKind::Keyword(Keyword::Set) => self.parse_set_stmt(start),
            TokenKind::Keyword(Keyword::FuncIntro) => self.parse_wenyan_fn(start),
            TokenKind::Keyword(Keyword::Define) => self.parse_natural_fn(start),
            TokenKind::Keyword(Keyword::Type) => self.parse_type_def(start),
            TokenKind::Keyword(Keyword::Module) => self.parse_module_def(start),
            _ => {
                let expr = self.parse_expression(BP_LOWEST)?;
                let span = expr.span;
                Some(self.stmt(StmtKind::Expr(expr), span))
            }
        }
    }

    /// `让 [递归] name param* [: T] (=|为) e [在 body]`
    fn parse_let_stmt(
        &mut self,
        start: Span,
    ) -> Option<Stmt> {
        let definition = self.parse_let_definition()?;

        if self.skip_keyword(Keyword::In) {
            let expr = self.finish_let_in(definition, start)?;
            let span = expr.span;
            return Some(self.stmt(StmtKind::Expr(expr), span));
        }

        let kind = match definition {
            Definition::Let(binding) => StmtKind::Let(binding),
            Definition::Function(def) => StmtKind::Function(def),
        };
        let span = self.span_from(start);
        Some(self.stmt(kind, span))
    }

    /// The definition part of `让 …`, shared by statements and let-in
    pub(crate) fn parse_let_definition(&mut self) -> Option<Definition> {
        self.expect_keyword(Keyword::Let)?;
        let recursive = self.skip_keyword(Keyword::Rec);
        let name = self.expect_ident()?;
        let params = self.parse_params()?;

        let return_type = if self.skip_delimiter_where(Delimiter::is_colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect_one_of(&[
            TokenKind::Operator(Operator::Equals),
            TokenKind::Keyword(Keyword::As),
        ])?;
        let value = self.parse_expression(BP_LOWEST)?;

        Some(if params.is_empty() && !recursive {
            Definition::Let(LetBinding {
                name,
                ty: return_type,
                value,
            })
        } else {
            Definition::Function(FunctionDef {
                name,
                params,
                return_type,
                body: value,
                recursive,
            })
        })
    }

    /// Parameters: `x`, `_`, `「参数」` or `(x : T)`
    pub(crate) fn parse_params(&mut self) -> Option<Vec<Param>> {
        let mut params = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Identifier { .. } => {
                    let name = self.expect_ident()?;
                    params.push(Param { name, ty: None });
                }
                TokenKind::Keyword(Keyword::Wildcard) => {
                    let span = self.bump().span;
                    let name = self.ident("_".to_string(), span);
                    params.push(Param { name, ty: None });
                }
                TokenKind::Delimiter(Delimiter::LParen | Delimiter::FullLParen) => {
                    let open = self.bump_opener()?;
                    let name = self.expect_ident()?;
                    self.expect_colon()?;
                    let ty = self.parse_type()?;
                    self.expect_closer(open)?;
                    params.push(Param { name, ty: Some(ty) });
                }
                _ => break,
            }
        }
        Some(params)
    }

    /// `设 name 为 e`
    fn parse_set_stmt(
        &mut self,
        start: Span,
    ) -> Option<Stmt> {
        self.bump(); // consume 设
        let name = self.expect_ident()?;
        self.expect_keyword(Keyword::As)?;
        let value = self.parse_expression(BP_LOWEST)?;

        let span = self.span_from(start);
        Some(self.stmt(
            StmtKind::Let(LetBinding {
                name,
                ty: None,
                value,
            }),
            span,
        ))
    }

    /// `夫 name 者 受 param* 焉 算法 乃 e 也`
    fn parse_wenyan_fn(
        &mut self,
        start: Span,
    ) -> Option<Stmt> {
        self.bump(); // consume 夫
        let name = self.expect_ident()?;
        self.expect_keyword(Keyword::Subject)?;
        self.expect_keyword(Keyword::Receives)?;
        let params = self.parse_params()?;
        self.expect_keyword(Keyword::ParamsEnd)?;
        self.expect_keyword(Keyword::Algorithm)?;
        self.expect_keyword(Keyword::BodyIntro)?;
        let body = self.parse_expression(BP_LOWEST)?;
        self.expect_keyword(Keyword::FuncEnd)?;

        let span = self.span_from(start);
        Some(self.stmt(
            StmtKind::Function(FunctionDef {
                name,
                params,
                return_type: None,
                body,
                recursive: true,
            }),
            span,
        ))
    }

    /// `定义 name 接受 p {、 p} ： e`
    fn parse_natural_fn(
        &mut self,
        start: Span,
    ) -> Option<Stmt> {
        self.bump(); // consume 定义
        let name = self.expect_ident()?;
        self.expect_keyword(Keyword::Accepts)?;

        let mut params = Vec::new();
        loop {
            let name = self.expect_ident()?;
            params.push(Param { name, ty: None });
            if !self.skip_delimiter_where(Delimiter::is_comma) {
                break;
            }
        }

        self.expect_colon()?;
        let body = self.parse_expression(BP_LOWEST)?;

        let span = self.span_from(start);
        Some(self.stmt(
            StmtKind::Function(FunctionDef {
                name,
                params,
                return_type: None,
                body,
                recursive: true,
            }),
            span,
        ))
    }

    /// `类型 name = T`, `类型 name = [|] A | B 之 T`, `类型 name = { f : T; … }`
    fn parse_type_def(
        &mut self,
        start: Span,
    ) -> Option<Stmt> {
        self.bump(); // consume 类型
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Operator(Operator::Equals))?;

        let body = if self.at_delimiter(Delimiter::LBrace) {
            TypeDefBody::Record(self.parse_record_fields()?)
        } else if self.at_variant_list() {
            TypeDefBody::Variants(self.parse_variants()?)
        } else {
            TypeDefBody::Alias(self.parse_type()?)
        };

        let span = self.span_from(start);
        Some(self.stmt(StmtKind::TypeDef(TypeDef { name, body }), span))
    }

    /// A leading `|`, or a name followed by `|` or `之`
    fn at_variant_list(&self) -> bool {
        if self.at_delimiter_where(Delimiter::is_pipe) {
            return true;
        }
        matches!(self.kind(), TokenKind::Identifier { .. })
            && match &self.peek().kind {
                TokenKind::Delimiter(d) => d.is_pipe(),
                TokenKind::Keyword(Keyword::Of) => true,
                _ => false,
            }
    }

    fn parse_variants(&mut self) -> Option<Vec<Variant>> {
        self.skip_delimiter_where(Delimiter::is_pipe);

        let mut variants = Vec::new();
        loop {
            let name = self.expect_ident()?;
            let payload = if self.skip_keyword(Keyword::Of) {
                Some(self.parse_type()?)
            } else {
                None
            };
            variants.push(Variant { name, payload });
            if !self.skip_delimiter_where(Delimiter::is_pipe) {
                break;
            }
        }
        Some(variants)
    }

    fn parse_record_fields(&mut self) -> Option<Vec<FieldDecl>> {
        let open = self.bump_opener()?;

        let mut fields = Vec::new();
        while !self.at_delimiter_where(Delimiter::is_closing) && !self.at_end() {
            let name = self.expect_ident()?;
            self.expect_colon()?;
            let ty = self.parse_type()?;
            fields.push(FieldDecl { name, ty });
            if !self.skip_delimiter_where(|d| d.is_comma() || d.is_separator()) {
                break;
            }
        }

        self.expect_closer(open)?;
        if fields.is_empty() {
            self.error(SyntaxError::InvalidSyntax {
                reason: "a record type needs at least one field".to_string(),
                span: open.span,
            });
            return None;
        }
        Some(fields)
    }

    /// `模块 name = 结构 stmt* 结束`
    fn parse_module_def(
        &mut self,
        start: Span,
    ) -> Option<Stmt> {
        self.bump(); // consume 模块
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Operator(Operator::Equals))?;
        self.expect_keyword(Keyword::Struct)?;

        let items = self.parse_items(|state| state.at_keyword(Keyword::End));
        self.expect_keyword(Keyword::End)?;

        let span = self.span_from(start);
        Some(self.stmt(StmtKind::Module(ModuleDef { name, items }), span))
    }
}
