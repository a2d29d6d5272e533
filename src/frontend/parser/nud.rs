//! Prefix expression parsing (nud - null denotation)

use super::ast::*;
use super::state::*;
use super::SyntaxError;
use crate::frontend::lexer::{ClassicalMarker, Delimiter, Keyword, Operator, TokenKind};
use crate::util::span::Span;

/// Prefix parser for the current token
pub(crate) type PrefixFn<'a> = fn(&mut ParserState<'a>) -> Option<Expr>;

impl<'a> ParserState<'a> {
    /// Get prefix parser for current token
    pub(crate) fn prefix_info(&self) -> Option<PrefixFn<'a>> {
        match self.kind() {
            // Literals
            TokenKind::IntLiteral(_)
            | TokenKind::FloatLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::Keyword(Keyword::True | Keyword::False) => Some(Self::parse_literal),
            TokenKind::Identifier { .. } => Some(Self::parse_identifier),
            // Unary operators
            TokenKind::Operator(Operator::Sub | Operator::Add | Operator::Not) => {
                Some(Self::parse_unary)
            }
            // Unit, grouping, tuple, annotation, or （其一 …）
            TokenKind::Delimiter(Delimiter::LParen | Delimiter::FullLParen) => {
                Some(Self::parse_paren)
            }
            TokenKind::Delimiter(Delimiter::LBracket | Delimiter::LLenticular) => {
                Some(Self::parse_bracket_list)
            }
            TokenKind::Delimiter(Delimiter::LBrace) => Some(Self::parse_record),
            TokenKind::Classical(ClassicalMarker::ListStart) => Some(Self::parse_classical_list),
            TokenKind::Classical(ClassicalMarker::EmptyList) => Some(Self::parse_empty_list),
            TokenKind::Keyword(Keyword::If) => Some(Self::parse_conditional),
            TokenKind::Keyword(Keyword::Match) => Some(Self::parse_match),
            TokenKind::Keyword(Keyword::Observe) => Some(Self::parse_observe),
            TokenKind::Keyword(Keyword::Fun) => Some(Self::parse_lambda),
            TokenKind::Keyword(Keyword::Let) => Some(Self::parse_let_in),
            _ => None,
        }
    }

    /// Tokens that can begin a juxtaposed argument
    pub(crate) fn starts_atom(&self) -> bool {
        match self.kind() {
            TokenKind::IntLiteral(_)
            | TokenKind::FloatLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::Identifier { .. }
            | TokenKind::Keyword(Keyword::True | Keyword::False)
            | TokenKind::Classical(ClassicalMarker::ListStart | ClassicalMarker::EmptyList) => true,
            TokenKind::Delimiter(d) => matches!(
                d,
                Delimiter::LParen
                    | Delimiter::FullLParen
                    | Delimiter::LBracket
                    | Delimiter::LLenticular
                    | Delimiter::LBrace
            ),
            _ => false,
        }
    }

    /// Literal token as an AST literal
    pub(crate) fn literal_here(&self) -> Option<Literal> {
        match self.kind() {
            TokenKind::IntLiteral(n) => Some(Literal::Int(*n)),
            TokenKind::FloatLiteral(n) => Some(Literal::Float(*n)),
            TokenKind::StringLiteral(s) => Some(Literal::String(s.clone())),
            TokenKind::Keyword(Keyword::True) => Some(Literal::Bool(true)),
            TokenKind::Keyword(Keyword::False) => Some(Literal::Bool(false)),
            _ => None,
        }
    }

    fn parse_literal(&mut self) -> Option<Expr> {
        let literal = self.literal_here()?;
        let span = self.bump().span;
        Some(self.expr(ExprKind::Literal(literal), span))
    }

    fn parse_identifier(&mut self) -> Option<Expr> {
        let name = match self.kind() {
            TokenKind::Identifier { name, .. } => name.clone(),
            _ => return None,
        };
        let span = self.bump().span;
        Some(self.expr(ExprKind::Identifier(name), span))
    }

    /// Parse unary operator expression
    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.start_span();
        let op = match self.kind() {
            TokenKind::Operator(Operator::Sub) => UnOp::Neg,
            TokenKind::Operator(Operator::Add) => UnOp::Plus,
            TokenKind::Operator(Operator::Not) => UnOp::Not,
            _ => return None,
        };
        self.bump();

        let operand = self.parse_expression(BP_UNARY)?;
        let span = start.to(operand.span);
        Some(self.expr(
            ExprKind::UnaryOp {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `()`, `( e )`, `( e , … )`, `( e : T )`
    fn parse_paren(&mut self) -> Option<Expr> {
        if self.at_enumeration_opener() {
            return self.parse_enumeration();
        }

        let start = self.start_span();
        let open = self.bump_opener()?;

        // Unit: ()
        if self.at_delimiter_where(Delimiter::is_closing) {
            self.expect_closer(open)?;
            let span = self.span_from(start);
            return Some(self.expr(ExprKind::Literal(Literal::Unit), span));
        }

        let first = self.parse_expression(BP_LOWEST)?;

        // Type annotation: (e : T)
        if self.skip_delimiter_where(Delimiter::is_colon) {
            let ty = self.parse_type()?;
            self.expect_closer(open)?;
            let span = self.span_from(start);
            return Some(self.expr(
                ExprKind::TypeAnnotation {
                    expr: Box::new(first),
                    ty,
                },
                span,
            ));
        }

        // Tuple: (a, b, c)
        if self.skip_delimiter_where(Delimiter::is_comma) {
            let mut elements = vec![first];
            while !self.at_delimiter_where(Delimiter::is_closing) && !self.at_end() {
                elements.push(self.parse_expression(BP_LOWEST)?);
                if !self.skip_delimiter_where(Delimiter::is_comma) {
                    break;
                }
            }
            self.expect_closer(open)?;
            let span = self.span_from(start);
            return Some(self.expr(ExprKind::Tuple(elements), span));
        }

        // Grouping keeps the inner node
        self.expect_closer(open)?;
        Some(first)
    }

    /// `{ 名 = e ; … }`
    fn parse_record(&mut self) -> Option<Expr> {
        let start = self.start_span();
        let open = self.bump_opener()?;

        let mut fields = Vec::new();
        while !self.at_delimiter_where(Delimiter::is_closing) && !self.at_end() {
            let name = self.expect_ident()?;
            self.expect(&TokenKind::Operator(Operator::Equals))?;
            let value = self.parse_expression(BP_LOWEST)?;
            fields.push(FieldInit { name, value });
            if !self.skip_delimiter_where(|d| d.is_comma() || d.is_separator()) {
                break;
            }
        }

        self.expect_closer(open)?;
        let span = self.span_from(start);
        Some(self.expr(ExprKind::Record(fields), span))
    }

    /// `如果 c 那么 a [否则 b]`
    fn parse_conditional(&mut self) -> Option<Expr> {
        let start = self.start_span();
        self.bump(); // consume 如果

        let condition = self.parse_expression(BP_LOWEST)?;
        self.expect_keyword(Keyword::Then)?;
        let then_branch = self.parse_expression(BP_LOWEST)?;
        let else_branch = if self.skip_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression(BP_LOWEST)?))
        } else {
            None
        };

        let span = self.span_from(start);
        Some(self.expr(
            ExprKind::Conditional {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch,
            },
            span,
        ))
    }

    /// `匹配 e 与 [|] p -> e | p -> e …`
    fn parse_match(&mut self) -> Option<Expr> {
        let start = self.start_span();
        self.bump(); // consume 匹配

        let scrutinee = self.parse_expression(BP_LOWEST)?;
        self.expect_keyword(Keyword::With)?;
        self.skip_delimiter_where(Delimiter::is_pipe);

        let mut branches = Vec::new();
        loop {
            let branch_start = self.start_span();
            let pattern = self.parse_pattern()?;
            if !self.at_arrow() {
                self.error_expected(&[
                    TokenKind::Operator(Operator::Arrow).describe(),
                    TokenKind::Operator(Operator::FatArrow).describe(),
                ]);
                return None;
            }
            self.bump();
            let body = self.parse_expression(BP_LOWEST)?;
            branches.push(self.branch(pattern, body, branch_start));

            if !self.skip_delimiter_where(Delimiter::is_pipe) {
                break;
            }
        }

        let span = self.span_from(start);
        Some(self.expr(
            ExprKind::Match {
                scrutinee: Box::new(scrutinee),
                branches,
            },
            span,
        ))
    }

    /// `观 e 之性 若 p 则 e … [余者 [则] e] 观毕`
    fn parse_observe(&mut self) -> Option<Expr> {
        let start = self.start_span();
        self.bump(); // consume 观

        let scrutinee = self.parse_expression(BP_LOWEST)?;
        self.expect_keyword(Keyword::NatureOf)?;

        let mut branches = Vec::new();
        while self.at_keyword(Keyword::Case) {
            let branch_start = self.start_span();
            self.bump(); // consume 若
            let pattern = self.parse_pattern()?;
            self.expect_keyword(Keyword::Yields)?;
            let body = self.parse_expression(BP_LOWEST)?;
            branches.push(self.branch(pattern, body, branch_start));
        }

        // 余者: catch-all branch
        if self.at_keyword(Keyword::Otherwise) {
            let branch_start = self.start_span();
            self.bump();
            let pattern = self.pattern(PatternKind::Wildcard, branch_start);
            self.skip_keyword(Keyword::Yields);
            let body = self.parse_expression(BP_LOWEST)?;
            branches.push(self.branch(pattern, body, branch_start));
        }

        if branches.is_empty() {
            self.error_expected(&[
                TokenKind::Keyword(Keyword::Case).describe(),
                TokenKind::Keyword(Keyword::Otherwise).describe(),
            ]);
            return None;
        }
        self.expect_keyword(Keyword::ObserveEnd)?;

        let span = self.span_from(start);
        Some(self.expr(
            ExprKind::Match {
                scrutinee: Box::new(scrutinee),
                branches,
            },
            span,
        ))
    }

    fn branch(
        &mut self,
        pattern: Pattern,
        body: Expr,
        start: Span,
    ) -> MatchBranch {
        MatchBranch {
            id: self.next_id(),
            span: start.to(body.span),
            pattern,
            body,
        }
    }

    /// `函数 params -> body`
    fn parse_lambda(&mut self) -> Option<Expr> {
        let start = self.start_span();
        self.bump(); // consume 函数

        let params = self.parse_params()?;
        if params.is_empty() {
            self.error(SyntaxError::InvalidSyntax {
                reason: "a lambda needs at least one parameter".to_string(),
                span: self.current().span,
            });
            return None;
        }
        if !self.at_arrow() {
            self.error_expected(&[TokenKind::Operator(Operator::Arrow).describe()]);
            return None;
        }
        self.bump();
        let body = self.parse_expression(BP_LOWEST)?;

        let span = self.span_from(start);
        Some(self.expr(
            ExprKind::Lambda {
                params,
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `让 定义 在 e` in expression position
    fn parse_let_in(&mut self) -> Option<Expr> {
        let start = self.start_span();
        let definition = self.parse_let_definition()?;
        self.expect_keyword(Keyword::In)?;
        self.finish_let_in(definition, start)
    }

    /// Body of a let-in whose `在` has been consumed
    pub(crate) fn finish_let_in(
        &mut self,
        definition: Definition,
        start: Span,
    ) -> Option<Expr> {
        let body = self.parse_expression(BP_LOWEST)?;
        let span = self.span_from(start);
        Some(self.expr(
            ExprKind::LetIn {
                binding: Box::new(definition),
                body: Box::new(body),
            },
            span,
        ))
    }
}
