//! Parser state and token stream management

use super::ast::*;
use super::{ParserOptions, SyntaxError};
use crate::frontend::lexer::{
    ClassicalMarker, Delimiter, Keyword, Operator, Token, TokenKind, TokenStream,
};
use crate::util::span::Span;

/// Binding power levels for Pratt parser
pub const BP_LOWEST: u8 = 0;
pub const BP_ASSIGN: u8 = 10;
pub const BP_OR: u8 = 20;
pub const BP_AND: u8 = 30;
pub const BP_CMP: u8 = 40;
pub const BP_CONS: u8 = 45;
pub const BP_ADD: u8 = 50;
pub const BP_MUL: u8 = 60;
pub const BP_UNARY: u8 = 70;
pub const BP_APPLY: u8 = 80;
pub const BP_POSTFIX: u8 = 90;
pub const BP_HIGHEST: u8 = 100;

/// Keywords that begin a statement; error recovery stops in front of them
const STATEMENT_STARTS: &[Keyword] = &[
    Keyword::Let,
    Keyword::Set,
    Keyword::FuncIntro,
    Keyword::Define,
    Keyword::Type,
    Keyword::Module,
];

/// Parser state: cursor, diagnostics, node-id counter and options
#[derive(Debug)]
pub struct ParserState<'a> {
    stream: TokenStream<'a>,
    errors: Vec<SyntaxError>,
    next_id: u32,
    options: ParserOptions,
    /// Span of the most recently consumed token
    last_span: Span,
}

impl<'a> ParserState<'a> {
    pub fn new(
        tokens: &'a [Token],
        options: ParserOptions,
    ) -> Self {
        let stream = TokenStream::new(tokens);
        let last_span = Span::point(stream.current().span.start);
        Self {
            stream,
            errors: Vec::new(),
            next_id: 0,
            options,
            last_span,
        }
    }

    #[inline]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    #[inline]
    pub fn at_end(&self) -> bool {
        self.stream.at_eof()
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.stream.current()
    }

    #[inline]
    pub fn kind(&self) -> &'a TokenKind {
        self.stream.kind()
    }

    #[inline]
    pub fn peek(&self) -> &'a Token {
        self.stream.peek()
    }

    #[inline]
    pub fn peek_nth(
        &self,
        n: usize,
    ) -> &'a Token {
        self.stream.peek_nth(n)
    }

    /// Tokens consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.stream.position()
    }

    /// Consume the current token
    #[inline]
    pub fn bump(&mut self) -> &'a Token {
        let token = self.stream.bump();
        if !token.is_eof() {
            self.last_span = token.span;
        }
        token
    }

    #[inline]
    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.kind() == kind
    }

    #[inline]
    pub fn at_keyword(
        &self,
        keyword: Keyword,
    ) -> bool {
        matches!(self.kind(), TokenKind::Keyword(k) if *k == keyword)
    }

    #[inline]
    pub fn at_operator(
        &self,
        op: Operator,
    ) -> bool {
        matches!(self.kind(), TokenKind::Operator(o) if *o == op)
    }

    #[inline]
    pub fn at_delimiter(
        &self,
        delim: Delimiter,
    ) -> bool {
        matches!(self.kind(), TokenKind::Delimiter(d) if *d == delim)
    }

    /// Current token is a delimiter satisfying `pred`
    #[inline]
    pub fn at_delimiter_where(
        &self,
        pred: impl Fn(Delimiter) -> bool,
    ) -> bool {
        matches!(self.kind(), TokenKind::Delimiter(d) if pred(*d))
    }

    /// `->` `→` `=>` `⇒`
    #[inline]
    pub fn at_arrow(&self) -> bool {
        self.at_operator(Operator::Arrow) || self.at_operator(Operator::FatArrow)
    }

    /// Skip a specific token
    #[inline]
    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn skip_keyword(
        &mut self,
        keyword: Keyword,
    ) -> bool {
        self.skip(&TokenKind::Keyword(keyword))
    }

    #[inline]
    pub fn skip_delimiter_where(
        &mut self,
        pred: impl Fn(Delimiter) -> bool,
    ) -> bool {
        if self.at_delimiter_where(pred) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Expect a specific token, report error if not found
    pub fn expect(
        &mut self,
        kind: &TokenKind,
    ) -> Option<&'a Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            self.error_expected(&[kind.describe()]);
            None
        }
    }

    #[inline]
    pub fn expect_keyword(
        &mut self,
        keyword: Keyword,
    ) -> Option<&'a Token> {
        self.expect(&TokenKind::Keyword(keyword))
    }

    /// Expect the first of several alternatives that matches
    pub fn expect_one_of(
        &mut self,
        kinds: &[TokenKind],
    ) -> Option<&'a Token> {
        if kinds.iter().any(|k| self.at(k)) {
            Some(self.bump())
        } else {
            let expected: Vec<String> = kinds.iter().map(TokenKind::describe).collect();
            self.error_expected(&expected);
            None
        }
    }

    /// `:` or `：`
    pub fn expect_colon(&mut self) -> Option<&'a Token> {
        self.expect_one_of(&[
            TokenKind::Delimiter(Delimiter::Colon),
            TokenKind::Delimiter(Delimiter::FullColon),
        ])
    }

    /// Identifier, plain or quoted
    pub fn expect_ident(&mut self) -> Option<Ident> {
        match self.kind() {
            TokenKind::Identifier { name, .. } => {
                let span = self.bump().span;
                Some(self.ident(name.clone(), span))
            }
            _ => {
                self.error_expected(&["identifier".to_string()]);
                None
            }
        }
    }

    /// Current token starts on the line where the previous token ended
    #[inline]
    pub fn on_same_line(&self) -> bool {
        self.current().span.start.line == self.last_span.end.line
    }

    /// Current token touches the previous one, with no trivia between
    #[inline]
    pub fn is_adjacent(&self) -> bool {
        self.current().span.start.offset == self.last_span.end.offset
    }

    // ------------------------------------------------------------------
    // Spans and node construction
    // ------------------------------------------------------------------

    #[inline]
    pub fn start_span(&self) -> Span {
        self.current().span
    }

    /// Span from `start` to the end of the last consumed token
    #[inline]
    pub fn span_from(
        &self,
        start: Span,
    ) -> Span {
        if self.last_span.end.offset < start.start.offset {
            return start;
        }
        Span::new(start.start, self.last_span.end)
    }

    #[inline]
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn expr(
        &mut self,
        kind: ExprKind,
        span: Span,
    ) -> Expr {
        Expr {
            id: self.next_id(),
            kind,
            span,
        }
    }

    pub fn pattern(
        &mut self,
        kind: PatternKind,
        span: Span,
    ) -> Pattern {
        Pattern {
            id: self.next_id(),
            kind,
            span,
        }
    }

    pub fn type_expr(
        &mut self,
        kind: TypeExprKind,
        span: Span,
    ) -> TypeExpr {
        TypeExpr {
            id: self.next_id(),
            kind,
            span,
        }
    }

    pub fn stmt(
        &mut self,
        kind: StmtKind,
        span: Span,
    ) -> Stmt {
        Stmt {
            id: self.next_id(),
            kind,
            span,
        }
    }

    pub fn ident(
        &mut self,
        name: String,
        span: Span,
    ) -> Ident {
        Ident {
            id: self.next_id(),
            name,
            span,
        }
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    pub fn error(
        &mut self,
        error: SyntaxError,
    ) {
        tracing::trace!(%error, "syntax error");
        self.errors.push(error);
    }

    /// `expected X or Y, found <current>`
    pub fn error_expected(
        &mut self,
        expected: &[String],
    ) {
        let token = self.current();
        self.error(SyntaxError::ExpectedToken {
            expected: expected.to_vec(),
            found: token.kind.describe(),
            span: token.span,
        });
    }

    pub fn error_unexpected(&mut self) {
        let token = self.current();
        self.error(SyntaxError::UnexpectedToken {
            found: token.kind.describe(),
            span: token.span,
        });
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    /// Skip to the next statement boundary
    ///
    /// A separator is consumed; a statement keyword or `结束` is left in
    /// place unless it is where recovery started. Statements also end at a
    /// line break, so a token that opens a later line and can begin an
    /// expression statement stops recovery too.
    pub fn synchronize(&mut self) {
        let start = self.position();
        let line = self.current().span.start.line;
        while !self.at_end() {
            let moved = self.position() > start;
            match self.kind() {
                TokenKind::Delimiter(d) if d.is_separator() => {
                    self.bump();
                    return;
                }
                TokenKind::Keyword(k)
                    if (STATEMENT_STARTS.contains(k) || *k == Keyword::End) && moved =>
                {
                    return;
                }
                _ if moved
                    && self.current().span.start.line > line
                    && !self.on_same_line()
                    && self.at_line_statement_start() =>
                {
                    return;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Current token can begin an expression statement
    ///
    /// Continuation tokens (closers, `|`, operators, `那么`, `也`, …) are
    /// excluded so a broken multi-line form is skipped as a whole.
    fn at_line_statement_start(&self) -> bool {
        match self.kind() {
            TokenKind::Identifier { .. }
            | TokenKind::IntLiteral(_)
            | TokenKind::FloatLiteral(_)
            | TokenKind::StringLiteral(_) => true,
            TokenKind::Keyword(k) => matches!(
                k,
                Keyword::If
                    | Keyword::Match
                    | Keyword::Observe
                    | Keyword::Fun
                    | Keyword::True
                    | Keyword::False
            ),
            TokenKind::Delimiter(d) => matches!(
                d,
                Delimiter::LParen
                    | Delimiter::FullLParen
                    | Delimiter::LBracket
                    | Delimiter::LLenticular
                    | Delimiter::LBrace
            ),
            TokenKind::Classical(m) => {
                matches!(m, ClassicalMarker::ListStart | ClassicalMarker::EmptyList)
            }
            TokenKind::Operator(_) | TokenKind::Eof => false,
        }
    }

    /// Consume any run of statement separators
    pub fn skip_separators(&mut self) {
        while self.skip_delimiter_where(Delimiter::is_separator) {}
    }

    /// Current token begins a statement keyword form
    #[inline]
    pub fn at_statement_keyword(&self) -> bool {
        matches!(self.kind(), TokenKind::Keyword(k) if STATEMENT_STARTS.contains(k))
    }
}
